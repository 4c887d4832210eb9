//! Comparison arithmetic behind the spending statistics.
//!
//! Missing data is masked with one rather than surfaced as an error, so a
//! ratio against an empty side degenerates to a comparison against a unit
//! amount instead of dividing by zero.

use std::collections::HashMap;

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PEER_RATIO_PRECISION};
use crate::expenses::Expense;

/// This-period spending measured against the previous period, per category,
/// as a percentage.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPeriodRatio {
    pub category: Category,
    pub ratio: f64,
}

/// Sums expense amounts per category. Rows with an unknown category label
/// are dropped.
pub fn category_totals(expenses: &[Expense]) -> HashMap<Category, Decimal> {
    let mut totals = HashMap::new();
    for expense in expenses {
        if let Ok(category) = expense.category.parse::<Category>() {
            *totals.entry(category).or_insert(Decimal::ZERO) += expense.amount_decimal();
        }
    }
    totals
}

/// Per-category comparison over every category present in either period, in
/// canonical order. A category absent from one side counts as a unit amount
/// on that side.
pub fn period_ratios(
    this_period: &HashMap<Category, Decimal>,
    last_period: &HashMap<Category, Decimal>,
) -> Vec<CategoryPeriodRatio> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            if !this_period.contains_key(category) && !last_period.contains_key(category) {
                return None;
            }
            let this_amount = this_period.get(category).copied().unwrap_or(Decimal::ONE);
            let last_amount = last_period.get(category).copied().unwrap_or(Decimal::ONE);
            Some(CategoryPeriodRatio {
                category: *category,
                ratio: comparison_ratio(this_amount, last_amount),
            })
        })
        .collect()
}

/// `this / last` as a rounded percentage.
pub fn comparison_ratio(this_amount: Decimal, last_amount: Decimal) -> f64 {
    ((this_amount / last_amount).round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    ) * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

/// Total of the rows, or one when there are none.
pub fn total_or_one(expenses: &[Expense]) -> Decimal {
    if expenses.is_empty() {
        return Decimal::ONE;
    }
    expenses.iter().map(|expense| expense.amount_decimal()).sum()
}

/// Rounded mean of the amounts, or one when there are none.
pub fn average_or_one(amounts: &[Decimal]) -> Decimal {
    if amounts.is_empty() {
        return Decimal::ONE;
    }
    let total: Decimal = amounts.iter().sum();
    (total / Decimal::from(amounts.len())).round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Mean of stored consumption ratios, or one when there are none.
pub fn ratio_average_or_one(ratios: &[f64]) -> Decimal {
    if ratios.is_empty() {
        return Decimal::ONE;
    }
    let total: f64 = ratios.iter().sum();
    Decimal::from_f64(total / ratios.len() as f64).unwrap_or(Decimal::ONE)
}

/// My average consumption ratio against everyone else's, as a percentage.
/// The peer divide carries one extra digit of precision so small differences
/// between averages stay visible.
pub fn peer_comparison(mine: &[f64], others: &[f64]) -> f64 {
    let my_average = ratio_average_or_one(mine);
    let peer_average = ratio_average_or_one(others);
    let divisor = if peer_average.is_zero() {
        Decimal::ONE
    } else {
        peer_average
    };
    ((my_average / divisor).round_dp_with_strategy(
        PEER_RATIO_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    ) * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}
