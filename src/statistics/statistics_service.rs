use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::expenses::{weekday_name, Expense, ExpenseRepositoryTrait};
use crate::statistics::statistics_model::{
    average_or_one, category_totals, comparison_ratio, peer_comparison, period_ratios,
    total_or_one, CategoryPeriodRatio,
};
use crate::statistics::statistics_traits::StatisticsServiceTrait;
use crate::users::UserRepositoryTrait;

/// Spending statistics over the expense history. The period comparisons look
/// at the month ending today versus the month before it; the weekday and peer
/// comparisons look at today's entries.
pub struct StatisticsService {
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl StatisticsService {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        StatisticsService {
            expense_repository,
            user_repository,
        }
    }

    /// One query over the two-month window, split at the one-month mark.
    /// The boundary date itself belongs to the current period.
    fn load_periods(&self, user_id: &str, today: NaiveDate) -> Result<(Vec<Expense>, Vec<Expense>)> {
        let this_period_start = months_back(today, 1);
        let window_start = months_back(today, 2);
        let rows = self
            .expense_repository
            .get_expenses_between(user_id, window_start, today)?;
        Ok(rows
            .into_iter()
            .partition(|expense| expense.expense_date >= this_period_start))
    }
}

fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

impl StatisticsServiceTrait for StatisticsService {
    fn category_ratios(&self, user_id: &str, today: NaiveDate) -> Result<Vec<CategoryPeriodRatio>> {
        self.user_repository.get_user_by_id(user_id)?;
        let (this_period, last_period) = self.load_periods(user_id, today)?;
        let ratios = period_ratios(&category_totals(&this_period), &category_totals(&last_period));
        debug!(
            "Computed {} category period ratios for user {}",
            ratios.len(),
            user_id
        );
        Ok(ratios)
    }

    fn period_total_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64> {
        self.user_repository.get_user_by_id(user_id)?;
        let (this_period, last_period) = self.load_periods(user_id, today)?;
        Ok(comparison_ratio(
            total_or_one(&this_period),
            total_or_one(&last_period),
        ))
    }

    fn weekday_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64> {
        self.user_repository.get_user_by_id(user_id)?;
        let weekday = weekday_name(today.weekday());
        let rows = self
            .expense_repository
            .get_weekday_expenses_through(user_id, today, weekday)?;
        let (today_rows, past_rows): (Vec<Expense>, Vec<Expense>) = rows
            .into_iter()
            .partition(|expense| expense.expense_date == today);

        let today_amounts: Vec<Decimal> = today_rows
            .iter()
            .map(|expense| expense.amount_decimal())
            .collect();
        let past_amounts: Vec<Decimal> = past_rows
            .iter()
            .map(|expense| expense.amount_decimal())
            .collect();
        Ok(comparison_ratio(
            average_or_one(&today_amounts),
            average_or_one(&past_amounts),
        ))
    }

    fn peer_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64> {
        self.user_repository.get_user_by_id(user_id)?;
        let rows = self.expense_repository.get_expenses_on_date(today)?;
        let (mine_rows, other_rows): (Vec<Expense>, Vec<Expense>) = rows
            .into_iter()
            .partition(|expense| expense.user_id == user_id);

        // Rows recorded without a budget carry no ratio and drop out.
        let mine: Vec<f64> = mine_rows
            .iter()
            .filter_map(|expense| expense.expense_ratio)
            .collect();
        let others: Vec<f64> = other_rows
            .iter()
            .filter_map(|expense| expense.expense_ratio)
            .collect();
        Ok(peer_comparison(&mine, &others))
    }
}
