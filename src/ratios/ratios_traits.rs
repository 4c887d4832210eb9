use crate::categories::Category;
use crate::errors::Result;
use crate::ratios::ratios_model::CategoryRatio;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for category-ratio repository operations
#[async_trait]
pub trait RatioRepositoryTrait: Send + Sync {
    fn get_ratios(&self) -> Result<Vec<CategoryRatio>>;
    async fn merge_observation(&self, category: Category, percentage: Decimal) -> Result<()>;
    async fn recompute_from_budgets(&self) -> Result<()>;
}

/// Trait for category-ratio service operations
#[async_trait]
pub trait RatioServiceTrait: Send + Sync {
    fn get_ratios(&self) -> Result<Vec<CategoryRatio>>;
    async fn record_observation(&self, category: Category, percentage: Decimal) -> Result<()>;
    async fn recompute_ratios(&self) -> Result<()>;
}
