use diesel::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::categories::Category;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::ratios::ratios_errors::RatioError;

/// Globally shared allocation ratio for one category, learned from every
/// submitted budget plan. The nightly recompute stores the category's
/// fraction of the global budget pot; the per-plan merge stores a running
/// mean of observed percentages. The two writers keep their own scale.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::category_ratios)]
#[diesel(primary_key(category))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CategoryRatio {
    pub category: String,
    pub ratio: f64,
    pub count: i32,
    pub updated_at: String,
}

/// Running (online) mean update: `(avg*n + observation) / (n+1)`.
pub fn running_mean(average: f64, count: i32, observation: f64) -> f64 {
    (average * count as f64 + observation) / (count as f64 + 1.0)
}

/// Derives each category's share of the global budget pot, rounded to
/// 2 decimal places half-up. Categories without any budget get a share
/// of 0. A zero total leaves every share undefined and is reported as
/// missing recommendation data.
pub fn compute_global_ratios(
    category_totals: &HashMap<Category, Decimal>,
    total: Decimal,
) -> std::result::Result<Vec<(Category, f64)>, RatioError> {
    if total.is_zero() {
        return Err(RatioError::NoRecommendationData);
    }
    Ok(Category::ALL
        .iter()
        .map(|&category| {
            let amount = category_totals
                .get(&category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let share = (amount / total)
                .round_dp_with_strategy(
                    DISPLAY_DECIMAL_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                )
                .to_f64()
                .unwrap_or(0.0);
            (category, share)
        })
        .collect())
}
