use rust_decimal::Decimal;
use thiserror::Error;

/// Custom error type for recommendation operations
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Total amount {amount} is below the recommendation minimum of {minimum}")]
    AmountTooSmall { amount: Decimal, minimum: Decimal },
}
