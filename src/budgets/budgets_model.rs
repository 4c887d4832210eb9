use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// A per-user, per-category budget entry. The optional validity window is
/// inclusive on both ends; a missing bound is open-ended on that side.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl Budget {
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }

    /// True when `date` falls inside the validity window.
    pub fn window_contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| date <= end)
    }

    /// True when this budget's window shares at least one day with the
    /// given window.
    pub fn window_overlaps(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        windows_overlap(self.start_date, self.end_date, start, end)
    }
}

/// Inclusive interval overlap test where a missing bound is open-ended.
pub fn windows_overlap(
    start_a: Option<NaiveDate>,
    end_a: Option<NaiveDate>,
    start_b: Option<NaiveDate>,
    end_b: Option<NaiveDate>,
) -> bool {
    let a_starts_in_time = match (start_a, end_b) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };
    let b_starts_in_time = match (start_b, end_a) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    };
    a_starts_in_time && b_starts_in_time
}

/// Input for inserting a budget row
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One requested budget line in a setup call.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub category: Category,
    pub amount: Decimal,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}
