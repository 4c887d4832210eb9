use crate::categories::Category;
use crate::errors::Result;
use crate::ratios::ratios_model::CategoryRatio;
use crate::ratios::ratios_traits::{RatioRepositoryTrait, RatioServiceTrait};
use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Maintains the globally shared per-category ratios that drive budget
/// recommendations.
pub struct RatioService {
    repository: Arc<dyn RatioRepositoryTrait>,
}

impl RatioService {
    pub fn new(repository: Arc<dyn RatioRepositoryTrait>) -> Self {
        RatioService { repository }
    }
}

#[async_trait]
impl RatioServiceTrait for RatioService {
    fn get_ratios(&self) -> Result<Vec<CategoryRatio>> {
        self.repository.get_ratios()
    }

    async fn record_observation(&self, category: Category, percentage: Decimal) -> Result<()> {
        debug!("Merging {}% observation into the {} ratio", percentage, category);
        self.repository.merge_observation(category, percentage).await
    }

    async fn recompute_ratios(&self) -> Result<()> {
        info!("Recomputing category ratios from all stored budgets");
        self.repository.recompute_from_budgets().await
    }
}
