use crate::budgets::budgets_model::{Budget, BudgetPlan};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget_by_id(&self, budget_id: &str) -> Result<Budget>;
    fn get_budgets_by_user(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_budgets_active_on(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Budget>>;
    async fn insert_budgets(&self, user_id: String, plans: Vec<BudgetPlan>) -> Result<Vec<Budget>>;
    async fn update_amount(&self, budget_id: String, amount: Decimal) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: String) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn create_budgets(&self, user_id: &str, plans: Vec<BudgetPlan>) -> Result<Vec<Budget>>;
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    async fn update_budget_amount(
        &self,
        user_id: &str,
        budget_id: &str,
        amount: Decimal,
    ) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
}
