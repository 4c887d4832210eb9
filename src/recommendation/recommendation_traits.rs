use crate::errors::Result;
use crate::recommendation::recommendation_model::BudgetAllocation;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for recommendation repository operations
#[async_trait]
pub trait RecommendationRepositoryTrait: Send + Sync {
    async fn allocate_for_user(
        &self,
        user_id: String,
        total_amount: Decimal,
    ) -> Result<Vec<BudgetAllocation>>;
}

/// Trait for recommendation service operations
#[async_trait]
pub trait RecommendationServiceTrait: Send + Sync {
    async fn recommend(
        &self,
        user_id: &str,
        total_amount: Decimal,
    ) -> Result<Vec<BudgetAllocation>>;
}
