#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::categories::Category;
    use crate::errors::{Error, Result};
    use crate::recommendation::allocation::{allocate_by_ratio, equal_shares};
    use crate::recommendation::{
        BudgetAllocation, RecommendationError, RecommendationRepositoryTrait,
        RecommendationService, RecommendationServiceTrait,
    };
    use crate::users::{NewUser, User, UserError, UserRepositoryTrait};

    struct StubUserRepository;

    #[async_trait]
    impl UserRepositoryTrait for StubUserRepository {
        fn get_user_by_id(&self, user_id: &str) -> Result<User> {
            if user_id == "u1" {
                Ok(User {
                    id: "u1".to_string(),
                    email: "u1@example.com".to_string(),
                    created_at: String::new(),
                    updated_at: String::new(),
                })
            } else {
                Err(UserError::NotFound(user_id.to_string()).into())
            }
        }

        fn get_users(&self) -> Result<Vec<User>> {
            unimplemented!("not used by these tests")
        }

        async fn create_user(&self, _new_user: NewUser) -> Result<User> {
            unimplemented!("not used by these tests")
        }
    }

    #[derive(Default)]
    struct CountingRepository {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecommendationRepositoryTrait for CountingRepository {
        async fn allocate_for_user(
            &self,
            _user_id: String,
            total_amount: Decimal,
        ) -> Result<Vec<BudgetAllocation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![BudgetAllocation {
                category: Category::Food,
                amount: total_amount,
            }])
        }
    }

    #[tokio::test]
    async fn recommend_rejects_amounts_below_the_floor() {
        let repository = Arc::new(CountingRepository::default());
        let service = RecommendationService::new(repository.clone(), Arc::new(StubUserRepository));

        let result = service.recommend("u1", dec!(999)).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::Recommendation(RecommendationError::AmountTooSmall { .. })
        ));
        assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recommend_accepts_the_exact_floor() {
        let repository = Arc::new(CountingRepository::default());
        let service = RecommendationService::new(repository.clone(), Arc::new(StubUserRepository));

        let allocations = service.recommend("u1", dec!(1000)).await.unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recommend_requires_an_existing_user() {
        let repository = Arc::new(CountingRepository::default());
        let service = RecommendationService::new(repository.clone(), Arc::new(StubUserRepository));

        let result = service.recommend("ghost", dec!(5000)).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::User(UserError::NotFound(_))
        ));
        assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn allocate_by_ratio_follows_stored_percentages() {
        let mut ratios = HashMap::new();
        ratios.insert(Category::Food, 40.0);
        ratios.insert(Category::Housing, 60.0);

        let allocations = allocate_by_ratio(dec!(10000), &ratios);

        assert_eq!(
            allocations,
            vec![
                BudgetAllocation {
                    category: Category::Food,
                    amount: dec!(4000),
                },
                BudgetAllocation {
                    category: Category::Housing,
                    amount: dec!(6000),
                },
            ]
        );
    }

    #[test]
    fn allocate_by_ratio_rounds_each_line_half_up() {
        let mut ratios = HashMap::new();
        ratios.insert(Category::Food, 33.335);

        let allocations = allocate_by_ratio(dec!(1000), &ratios);

        assert_eq!(allocations[0].amount, dec!(333.35));
    }

    #[test]
    fn equal_shares_sum_to_the_remainder_exactly() {
        let shares = equal_shares(dec!(10), 3);
        assert_eq!(shares, vec![dec!(3.33), dec!(3.33), dec!(3.34)]);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(10));

        // a sub-cent split still balances, at the cost of the last share
        let shares = equal_shares(dec!(0.02), 4);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(0.02));

        assert!(equal_shares(dec!(5), 0).is_empty());
    }
}
