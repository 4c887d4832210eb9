use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_errors::UserError;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::UserRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .optional()?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))?;
        Ok(user)
    }

    fn get_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table.load::<User>(&mut conn)?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let existing: Option<User> = users::table
                    .filter(users::email.eq(&new_user.email))
                    .first::<User>(conn)
                    .optional()?;
                if existing.is_some() {
                    return Err(UserError::DuplicateEmail(new_user.email).into());
                }

                let id = new_user
                    .id
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let now = Utc::now().to_rfc3339();
                let new_user = NewUser {
                    id: Some(id.clone()),
                    email: new_user.email,
                    created_at: Some(now.clone()),
                    updated_at: Some(now),
                };

                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)?;

                Ok(users::table.find(&id).first::<User>(conn)?)
            })
            .await
    }
}
