pub mod allocation;
pub mod recommendation_errors;
pub mod recommendation_model;
pub mod recommendation_repository;
pub mod recommendation_service;
pub mod recommendation_traits;

pub use allocation::{allocate_by_ratio, equal_shares};
pub use recommendation_errors::RecommendationError;
pub use recommendation_model::BudgetAllocation;
pub use recommendation_repository::RecommendationRepository;
pub use recommendation_service::RecommendationService;
pub use recommendation_traits::{RecommendationRepositoryTrait, RecommendationServiceTrait};

#[cfg(test)]
mod recommendation_service_tests;
