//! Pure allocation arithmetic behind budget recommendations.

use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use crate::categories::Category;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::recommendation::recommendation_model::BudgetAllocation;

/// Allocates `total` across categories proportionally to their stored ratio
/// percentages, in canonical category order. Categories without a stored
/// ratio receive no allocation.
pub fn allocate_by_ratio(total: Decimal, ratios: &HashMap<Category, f64>) -> Vec<BudgetAllocation> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            ratios.get(&category).map(|&ratio| {
                let fraction = Decimal::from_f64(ratio / 100.0).unwrap_or(Decimal::ZERO);
                BudgetAllocation {
                    category,
                    amount: (total * fraction).round_dp_with_strategy(
                        DISPLAY_DECIMAL_PRECISION,
                        RoundingStrategy::MidpointAwayFromZero,
                    ),
                }
            })
        })
        .collect()
}

/// Splits `remaining` into `count` near-equal parts. Every part but the last
/// is `remaining / count` rounded to cents half-up; the last part absorbs
/// the rounding residue so the parts always sum to exactly `remaining`.
pub fn equal_shares(remaining: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }
    let share = (remaining / Decimal::from(count)).round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let mut shares = vec![share; count];
    shares[count - 1] = remaining - share * Decimal::from(count - 1);
    shares
}
