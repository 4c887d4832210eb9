use crate::errors::{Result, ValidationError};
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        self.repository.get_user_by_id(user_id)
    }

    fn get_users(&self) -> Result<Vec<User>> {
        self.repository.get_users()
    }

    async fn create_user(&self, email: &str) -> Result<User> {
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        debug!("Creating user with email {}", email);

        let new_user = NewUser {
            id: None,
            email: email.trim().to_string(),
            created_at: None,
            updated_at: None,
        };
        self.repository.create_user(new_user).await
    }
}
