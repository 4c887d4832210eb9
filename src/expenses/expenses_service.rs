use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::budgets::BudgetRepositoryTrait;
use crate::categories::Category;
use crate::constants::{BUDGET_DAYS_PER_MONTH, DAILY_RECOMMENDATION_FLOOR, DISPLAY_DECIMAL_PRECISION};
use crate::errors::{Result, ValidationError};
use crate::expenses::expenses_errors::ExpenseError;
use crate::expenses::expenses_model::{
    consumption_ratio, days_left_in_month, weekday_name, CategoryAmount, DailyExpensePlan,
    Expense, ExpenseDraft, ExpenseFilters, ExpenseSummary, ExpenseUpdate, NewExpense,
    SpendingReview,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::users::UserRepositoryTrait;

/// Expense entry, inquiry and the two daily digests. Each new entry snapshots
/// the budget standing for its category on the entry date.
pub struct ExpenseService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            expense_repository,
            budget_repository,
            user_repository,
        }
    }

    fn owned_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        let expense = self.expense_repository.get_expense_by_id(expense_id)?;
        if expense.user_id != user_id {
            return Err(ExpenseError::NotOwner(expense_id.to_string()).into());
        }
        Ok(expense)
    }

    fn one_day_filters(date: NaiveDate) -> ExpenseFilters {
        ExpenseFilters {
            start_date: Some(date),
            end_date: Some(date),
            ..ExpenseFilters::default()
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    async fn create_expense(&self, user_id: &str, draft: ExpenseDraft) -> Result<Expense> {
        self.user_repository.get_user_by_id(user_id)?;
        if draft.amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount(draft.amount).into());
        }

        // Snapshot of the budget standing on the entry date. Later budget
        // edits do not rewrite expense history.
        let budget_total: Decimal = self
            .budget_repository
            .get_budgets_active_on(user_id, draft.expense_date)?
            .iter()
            .filter(|budget| budget.category == draft.category.as_str())
            .map(|budget| budget.amount_decimal())
            .sum();
        let expense_ratio = consumption_ratio(draft.amount, budget_total);

        let new_expense = NewExpense {
            id: None,
            user_id: user_id.to_string(),
            category: draft.category.as_str().to_string(),
            amount: draft.amount.to_string(),
            expense_date: draft.expense_date,
            description: draft.description,
            excluding: draft.excluding,
            budget_total_amount: budget_total.to_string(),
            day_of_week: weekday_name(draft.expense_date.weekday()).to_string(),
            expense_ratio,
            created_at: None,
            updated_at: None,
        };
        let expense = self.expense_repository.insert_expense(new_expense).await?;
        debug!(
            "Recorded expense {} of {} for user {}",
            expense.id, expense.amount, user_id
        );
        Ok(expense)
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.user_repository.get_user_by_id(user_id)?;
        self.owned_expense(user_id, expense_id)
    }

    fn get_expenses(&self, user_id: &str, filters: ExpenseFilters) -> Result<ExpenseSummary> {
        self.user_repository.get_user_by_id(user_id)?;
        if let (Some(start), Some(end)) = (filters.start_date, filters.end_date) {
            if start > end {
                return Err(ValidationError::InvalidInput(
                    "expense search start date is after its end date".to_string(),
                )
                .into());
            }
        }

        let expenses = self.expense_repository.search_expenses(user_id, &filters)?;
        let total = self.expense_repository.sum_expenses(user_id, &filters)?;
        let totals_by_category = self
            .expense_repository
            .sum_expenses_per_category(user_id, &filters)?;
        Ok(ExpenseSummary {
            expenses,
            total,
            totals_by_category,
        })
    }

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        self.user_repository.get_user_by_id(user_id)?;
        if let Some(amount) = update.amount {
            if amount <= Decimal::ZERO {
                return Err(ExpenseError::NonPositiveAmount(amount).into());
            }
        }
        self.owned_expense(user_id, expense_id)?;
        self.expense_repository
            .update_expense(expense_id.to_string(), update)
            .await
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        self.user_repository.get_user_by_id(user_id)?;
        self.owned_expense(user_id, expense_id)?;
        self.expense_repository
            .delete_expense(expense_id.to_string())
            .await?;
        Ok(())
    }

    fn daily_spending_review(&self, today: NaiveDate) -> Result<Vec<SpendingReview>> {
        let filters = Self::one_day_filters(today);
        let mut reviews = Vec::new();
        for user in self.user_repository.get_users()? {
            let expenses = self.expense_repository.search_expenses(&user.id, &filters)?;
            if expenses.is_empty() {
                continue;
            }
            let total = self.expense_repository.sum_expenses(&user.id, &filters)?;
            let totals_by_category = self
                .expense_repository
                .sum_expenses_per_category(&user.id, &filters)?;

            let budget_sum: Decimal = self
                .budget_repository
                .get_budgets_active_on(&user.id, today)?
                .iter()
                .map(|budget| budget.amount_decimal())
                .sum();
            let expected = (budget_sum / Decimal::from(BUDGET_DAYS_PER_MONTH))
                .round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                );
            let ratio = if expected.is_zero() {
                None
            } else {
                ((total / expected).round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                ) * Decimal::ONE_HUNDRED)
                    .to_f64()
            };

            for entry in &totals_by_category {
                info!(
                    "User {} spent {} on {} today",
                    user.id, entry.amount, entry.category
                );
            }
            info!(
                "User {} spent {} today against an expected daily budget of {}",
                user.id, total, expected
            );
            reviews.push(SpendingReview {
                user_id: user.id,
                review_date: today,
                total,
                expected,
                ratio,
                totals_by_category,
            });
        }
        Ok(reviews)
    }

    fn recommend_daily_expenses(&self, today: NaiveDate) -> Result<Vec<DailyExpensePlan>> {
        let days_left = days_left_in_month(today);
        let filters = Self::one_day_filters(today);
        let mut plans = Vec::new();
        for user in self.user_repository.get_users()? {
            let budgets = self.budget_repository.get_budgets_active_on(&user.id, today)?;
            let spent: HashMap<Category, Decimal> = self
                .expense_repository
                .sum_expenses_per_category(&user.id, &filters)?
                .into_iter()
                .map(|entry| (entry.category, entry.amount))
                .collect();

            let mut amounts = Vec::new();
            for category in Category::ALL {
                let budget_sum: Decimal = budgets
                    .iter()
                    .filter(|budget| budget.category == category.as_str())
                    .map(|budget| budget.amount_decimal())
                    .sum();
                if !budgets.iter().any(|budget| budget.category == category.as_str()) {
                    continue;
                }

                let mut remaining =
                    budget_sum - spent.get(&category).copied().unwrap_or(Decimal::ZERO);
                if remaining < Decimal::ZERO {
                    // An overspent category still gets a small allowance
                    // rather than a negative one.
                    remaining = Decimal::from(DAILY_RECOMMENDATION_FLOOR);
                }
                let amount = (remaining / Decimal::from(days_left)).round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                info!(
                    "User {} can spend {} on {} per day through month end",
                    user.id, amount, category
                );
                amounts.push(CategoryAmount { category, amount });
            }
            plans.push(DailyExpensePlan {
                user_id: user.id,
                plan_date: today,
                days_left,
                amounts,
            });
        }
        Ok(plans)
    }
}
