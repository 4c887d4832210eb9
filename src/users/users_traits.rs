use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user_by_id(&self, user_id: &str) -> Result<User>;
    fn get_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user_by_id(&self, user_id: &str) -> Result<User>;
    fn get_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, email: &str) -> Result<User>;
}
