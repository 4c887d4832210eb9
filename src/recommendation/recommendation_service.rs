use crate::constants::RECOMMENDATION_MINIMUM_AMOUNT;
use crate::errors::Result;
use crate::recommendation::recommendation_errors::RecommendationError;
use crate::recommendation::recommendation_model::BudgetAllocation;
use crate::recommendation::recommendation_traits::{
    RecommendationRepositoryTrait, RecommendationServiceTrait,
};
use crate::users::UserRepositoryTrait;
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Builds a ready-to-use budget plan from the globally learned category
/// ratios when a user supplies only a total amount.
pub struct RecommendationService {
    repository: Arc<dyn RecommendationRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl RecommendationService {
    pub fn new(
        repository: Arc<dyn RecommendationRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        RecommendationService {
            repository,
            user_repository,
        }
    }
}

#[async_trait]
impl RecommendationServiceTrait for RecommendationService {
    async fn recommend(
        &self,
        user_id: &str,
        total_amount: Decimal,
    ) -> Result<Vec<BudgetAllocation>> {
        self.user_repository.get_user_by_id(user_id)?;

        let minimum = Decimal::from(RECOMMENDATION_MINIMUM_AMOUNT);
        if total_amount < minimum {
            return Err(RecommendationError::AmountTooSmall {
                amount: total_amount,
                minimum,
            }
            .into());
        }

        debug!(
            "Recommending a budget split of {} for user {}",
            total_amount, user_id
        );
        self.repository
            .allocate_for_user(user_id.to_string(), total_amount)
            .await
    }
}
