#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal_macros::dec;

    use crate::categories::Category;
    use crate::ratios::ratios_errors::RatioError;
    use crate::ratios::ratios_model::{compute_global_ratios, running_mean};

    #[test]
    fn running_mean_matches_the_arithmetic_mean() {
        let mut average = 40.0;
        average = running_mean(average, 1, 60.0);
        assert_eq!(average, 50.0);

        average = running_mean(average, 2, 20.0);
        assert_eq!(average, 40.0);
    }

    #[test]
    fn running_mean_treats_count_zero_as_a_fresh_row() {
        assert_eq!(running_mean(0.0, 0, 35.0), 35.0);
    }

    #[test]
    fn global_ratios_are_fractions_of_the_total() {
        let mut totals = HashMap::new();
        totals.insert(Category::Food, dec!(4000));
        totals.insert(Category::Housing, dec!(6000));

        let shares = compute_global_ratios(&totals, dec!(10000)).unwrap();

        assert_eq!(shares.len(), Category::ALL.len());
        assert!(shares.contains(&(Category::Food, 0.4)));
        assert!(shares.contains(&(Category::Housing, 0.6)));
        assert!(shares.contains(&(Category::Education, 0.0)));
    }

    #[test]
    fn global_ratios_round_half_up() {
        let mut totals = HashMap::new();
        totals.insert(Category::Food, dec!(125));

        // 125 / 1000 = 0.125, which rounds up to 0.13
        let shares = compute_global_ratios(&totals, dec!(1000)).unwrap();

        assert!(shares.contains(&(Category::Food, 0.13)));
    }

    #[test]
    fn global_ratios_reject_a_zero_total() {
        let result = compute_global_ratios(&HashMap::new(), dec!(0));
        assert!(matches!(result, Err(RatioError::NoRecommendationData)));
    }

    #[test]
    fn global_ratios_are_stable_across_reruns() {
        let mut totals = HashMap::new();
        totals.insert(Category::Transportation, dec!(300));
        totals.insert(Category::Other, dec!(700));

        let first = compute_global_ratios(&totals, dec!(1000)).unwrap();
        let second = compute_global_ratios(&totals, dec!(1000)).unwrap();

        assert_eq!(first, second);
    }
}
