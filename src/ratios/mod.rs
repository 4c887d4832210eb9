pub mod ratios_errors;
pub mod ratios_model;
pub mod ratios_repository;
pub mod ratios_service;
pub mod ratios_traits;

pub use ratios_errors::RatioError;
pub use ratios_model::{compute_global_ratios, running_mean, CategoryRatio};
pub use ratios_repository::RatioRepository;
pub use ratios_service::RatioService;
pub use ratios_traits::{RatioRepositoryTrait, RatioServiceTrait};

#[cfg(test)]
mod ratios_service_tests;
