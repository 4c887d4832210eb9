use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::expenses::expenses_model::{
    CategoryAmount, DailyExpensePlan, Expense, ExpenseDraft, ExpenseFilters, ExpenseSummary,
    ExpenseUpdate, NewExpense, SpendingReview,
};

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_expense_by_id(&self, expense_id: &str) -> Result<Expense>;
    fn search_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>>;
    fn sum_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Decimal>;
    fn sum_expenses_per_category(
        &self,
        user_id: &str,
        filters: &ExpenseFilters,
    ) -> Result<Vec<CategoryAmount>>;

    /// Non-excluded expenses for one user in the inclusive date range.
    fn get_expenses_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>>;

    /// Non-excluded expenses for one user on the named weekday, up to and
    /// including `date`.
    fn get_weekday_expenses_through(
        &self,
        user_id: &str,
        date: NaiveDate,
        weekday: &str,
    ) -> Result<Vec<Expense>>;

    /// Non-excluded expenses across all users on one date.
    fn get_expenses_on_date(&self, date: NaiveDate) -> Result<Vec<Expense>>;

    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense_id: String, update: ExpenseUpdate) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: String) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    async fn create_expense(&self, user_id: &str, draft: ExpenseDraft) -> Result<Expense>;
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    fn get_expenses(&self, user_id: &str, filters: ExpenseFilters) -> Result<ExpenseSummary>;
    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
    fn daily_spending_review(&self, today: NaiveDate) -> Result<Vec<SpendingReview>>;
    fn recommend_daily_expenses(&self, today: NaiveDate) -> Result<Vec<DailyExpensePlan>>;
}
