use chrono::{Datelike, NaiveDate, Weekday};
use diesel::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// A single spending entry. `budget_total_amount` and `expense_ratio` are
/// snapshots of the matching budget standing on the entry date; later budget
/// edits leave them untouched.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub excluding: bool,
    pub budget_total_amount: String,
    pub day_of_week: String,
    pub expense_ratio: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn budget_total_decimal(&self) -> Decimal {
        self.budget_total_amount.parse().unwrap_or(Decimal::ZERO)
    }
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub excluding: bool,
    pub budget_total_amount: String,
    pub day_of_week: String,
    pub expense_ratio: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Client payload for recording an expense. The budget snapshot fields are
/// derived at creation time, never supplied.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub category: Category,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub excluding: bool,
}

/// Partial update for an expense. `None` leaves the field unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub excluding: Option<bool>,
}

/// Search criteria for an expense inquiry. Every field is optional; missing
/// amount bounds fall back to zero and the inquiry maximum.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: Decimal,
}

/// Inquiry result: the matching rows plus totals over the non-excluded ones.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub expenses: Vec<Expense>,
    pub total: Decimal,
    pub totals_by_category: Vec<CategoryAmount>,
}

/// One user's end-of-day spending digest. `ratio` compares the day's total
/// against the expected daily budget, as a percentage; it is `None` when the
/// user has no active budget to measure against.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReview {
    pub user_id: String,
    pub review_date: NaiveDate,
    pub total: Decimal,
    pub expected: Decimal,
    pub ratio: Option<f64>,
    pub totals_by_category: Vec<CategoryAmount>,
}

/// Per-category daily spending allowance for the rest of the month.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpensePlan {
    pub user_id: String,
    pub plan_date: NaiveDate,
    pub days_left: i64,
    pub amounts: Vec<CategoryAmount>,
}

/// Weekday label as stored on expense rows.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Share of the budget consumed by a single expense, as a percentage.
/// `None` when no budget covers the entry, so the row records that the
/// ratio was unmeasurable rather than zero.
pub fn consumption_ratio(amount: Decimal, budget_total: Decimal) -> Option<f64> {
    if budget_total.is_zero() {
        return None;
    }
    ((amount / budget_total).round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    ) * Decimal::ONE_HUNDRED)
        .to_f64()
}

/// Number of days from `date` through the end of its month, counting `date`
/// itself.
pub fn days_left_in_month(date: NaiveDate) -> i64 {
    let next_month_start = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let last_day = next_month_start.and_then(|first| first.pred_opt()).unwrap_or(date);
    (last_day - date).num_days() + 1
}
