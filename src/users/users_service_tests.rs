#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    use async_trait::async_trait;

    use crate::errors::{Error, Result, ValidationError};
    use crate::users::{NewUser, User, UserError, UserRepositoryTrait, UserService, UserServiceTrait};

    #[derive(Default)]
    struct InMemoryUserRepository {
        users: RwLock<HashMap<String, User>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for InMemoryUserRepository {
        fn get_user_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .read()
                .unwrap()
                .get(user_id)
                .cloned()
                .ok_or_else(|| UserError::NotFound(user_id.to_string()).into())
        }

        fn get_users(&self) -> Result<Vec<User>> {
            Ok(self.users.read().unwrap().values().cloned().collect())
        }

        async fn create_user(&self, new_user: NewUser) -> Result<User> {
            let mut users = self.users.write().unwrap();
            if users.values().any(|user| user.email == new_user.email) {
                return Err(UserError::DuplicateEmail(new_user.email).into());
            }
            let id = new_user
                .id
                .unwrap_or_else(|| format!("user-{}", users.len() + 1));
            let user = User {
                id: id.clone(),
                email: new_user.email,
                created_at: new_user.created_at.unwrap_or_default(),
                updated_at: new_user.updated_at.unwrap_or_default(),
            };
            users.insert(id, user.clone());
            Ok(user)
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::default()))
    }

    #[tokio::test]
    async fn create_user_trims_and_stores_the_email() {
        let service = service();
        let user = service.create_user("  ana@example.com ").await.unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(service.get_user_by_id(&user.id).unwrap(), user);
    }

    #[tokio::test]
    async fn create_user_rejects_blank_emails() {
        let service = service();
        for email in ["", "   "] {
            let err = service.create_user(email).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::MissingField(_))
            ));
        }
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_emails() {
        let service = service();
        service.create_user("ana@example.com").await.unwrap();
        let err = service.create_user("ana@example.com").await.unwrap_err();
        assert!(matches!(err, Error::User(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn unknown_users_surface_not_found() {
        let service = service();
        let err = service.get_user_by_id("ghost").unwrap_err();
        assert!(matches!(err, Error::User(UserError::NotFound(_))));
    }
}
