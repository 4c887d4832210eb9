use crate::budgets::budgets_errors::BudgetError;
use crate::budgets::budgets_model::{Budget, BudgetPlan};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::ratios::RatioServiceTrait;
use crate::users::UserRepositoryTrait;
use async_trait::async_trait;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

/// Budget setup and maintenance. Creation also feeds each submitted split
/// into the global category ratios so future recommendations reflect it.
pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    ratio_service: Arc<dyn RatioServiceTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        ratio_service: Arc<dyn RatioServiceTrait>,
    ) -> Self {
        BudgetService {
            budget_repository,
            user_repository,
            ratio_service,
        }
    }

    fn validate_plans(plans: &[BudgetPlan]) -> Result<()> {
        if plans.is_empty() {
            return Err(ValidationError::InvalidInput(
                "budget setup requires at least one entry".to_string(),
            )
            .into());
        }
        for plan in plans {
            if plan.amount < Decimal::ZERO {
                return Err(ValidationError::InvalidInput(format!(
                    "budget amount for {} must not be negative",
                    plan.category
                ))
                .into());
            }
            if let (Some(start), Some(end)) = (plan.start_date, plan.end_date) {
                if start > end {
                    return Err(BudgetError::InvalidWindow { start, end }.into());
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budgets(&self, user_id: &str, plans: Vec<BudgetPlan>) -> Result<Vec<Budget>> {
        self.user_repository.get_user_by_id(user_id)?;
        Self::validate_plans(&plans)?;

        let total: Decimal = plans.iter().map(|plan| plan.amount).sum();
        let created = self
            .budget_repository
            .insert_budgets(user_id.to_string(), plans.clone())
            .await?;
        debug!("Created {} budgets for user {}", created.len(), user_id);

        // Feed each category's share of this plan into the global ratios.
        // A zero-total plan carries no share information and is skipped.
        if total > Decimal::ZERO {
            for plan in &plans {
                let share = (plan.amount / total).round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                ) * Decimal::ONE_HUNDRED;
                self.ratio_service
                    .record_observation(plan.category, share)
                    .await?;
            }
        }

        Ok(created)
    }

    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.user_repository.get_user_by_id(user_id)?;
        self.budget_repository.get_budgets_by_user(user_id)
    }

    async fn update_budget_amount(
        &self,
        user_id: &str,
        budget_id: &str,
        amount: Decimal,
    ) -> Result<Budget> {
        self.user_repository.get_user_by_id(user_id)?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "budget amount must not be negative".to_string(),
            )
            .into());
        }

        let budget = self.budget_repository.get_budget_by_id(budget_id)?;
        if budget.user_id != user_id {
            return Err(BudgetError::NotOwner(budget_id.to_string()).into());
        }

        self.budget_repository
            .update_amount(budget_id.to_string(), amount)
            .await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        self.user_repository.get_user_by_id(user_id)?;
        let budget = self.budget_repository.get_budget_by_id(budget_id)?;
        if budget.user_id != user_id {
            return Err(BudgetError::NotOwner(budget_id.to_string()).into());
        }

        self.budget_repository
            .delete_budget(budget_id.to_string())
            .await?;
        Ok(())
    }
}
