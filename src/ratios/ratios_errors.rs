use thiserror::Error;

/// Custom error type for category-ratio operations
#[derive(Debug, Error)]
pub enum RatioError {
    #[error("No budget data available to compute recommendation ratios")]
    NoRecommendationData,
}
