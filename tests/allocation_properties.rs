use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use mybudget_core::ratios::running_mean;
use mybudget_core::recommendation::{allocate_by_ratio, equal_shares};
use mybudget_core::Category;

proptest! {
    #[test]
    fn equal_shares_always_sum_back_to_the_remainder(
        cents in 1i64..=1_000_000,
        count in 1usize..=10,
    ) {
        let remaining = Decimal::new(cents, 2);
        let shares = equal_shares(remaining, count);
        prop_assert_eq!(shares.len(), count);
        let sum: Decimal = shares.iter().copied().sum();
        prop_assert_eq!(sum, remaining);
    }

    #[test]
    fn allocations_plus_equal_shares_recover_the_total(
        total_units in 1000i64..=1_000_000,
        ratios in proptest::collection::vec(0.0f64..20.0, 5),
    ) {
        let total = Decimal::from(total_units);
        let ratio_map: HashMap<Category, f64> =
            Category::ALL.iter().copied().zip(ratios).collect();

        let allocations = allocate_by_ratio(total, &ratio_map);
        let allocated: Decimal = allocations.iter().map(|allocation| allocation.amount).sum();
        let remaining = total - allocated;
        prop_assume!(remaining > Decimal::ZERO);

        let shares = equal_shares(remaining, allocations.len());
        let grand_total: Decimal = allocations
            .iter()
            .zip(&shares)
            .map(|(allocation, share)| allocation.amount + share)
            .sum();
        prop_assert_eq!(grand_total, total);
    }

    #[test]
    fn allocations_come_back_in_canonical_order_and_whole_cents(
        total_units in 1000i64..=1_000_000,
        ratios in proptest::collection::vec(0.0f64..20.0, 5),
    ) {
        let total = Decimal::from(total_units);
        let ratio_map: HashMap<Category, f64> =
            Category::ALL.iter().copied().zip(ratios).collect();

        let allocations = allocate_by_ratio(total, &ratio_map);
        let order: Vec<Category> = allocations.iter().map(|allocation| allocation.category).collect();
        prop_assert_eq!(order, Category::ALL.to_vec());
        for allocation in &allocations {
            prop_assert!(allocation.amount >= Decimal::ZERO);
            prop_assert_eq!(allocation.amount, allocation.amount.round_dp(2));
        }
    }

    #[test]
    fn running_mean_tracks_the_arithmetic_mean(
        observations in proptest::collection::vec(0.0f64..100.0, 1..20),
    ) {
        let mut average = 0.0;
        let mut count = 0i32;
        for observation in &observations {
            average = running_mean(average, count, *observation);
            count += 1;
        }
        let expected: f64 = observations.iter().sum::<f64>() / observations.len() as f64;
        prop_assert!((average - expected).abs() < 1e-6);
    }
}
