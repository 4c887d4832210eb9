pub mod users_errors;
pub mod users_model;
pub mod users_repository;
pub mod users_service;
pub mod users_traits;

pub use users_errors::UserError;
pub use users_model::{NewUser, User};
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};

#[cfg(test)]
mod users_service_tests;
