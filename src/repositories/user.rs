//! UserRepository - Console accounts

use super::{Create, PoolType, Read};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use sqlx::Error;
use tracing::{info, instrument};

pub struct UserRepository {
    connection_pool: PoolType,
}

impl UserRepository {
    pub fn new(connection_pool: PoolType) -> UserRepository {
        Self { connection_pool }
    }

    /// Emails are unique, the lookup is an exact match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, email, password, is_admin FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    /// Creates the admin account, or promotes an existing account with the
    /// same email and resets its password. `password` is already hashed.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<User, Error> {
        sqlx::query(
            r#"
            INSERT INTO users (email, password, is_admin) VALUES (?, ?, 1)
            ON CONFLICT(email) DO UPDATE SET password = excluded.password, is_admin = 1
            "#,
        )
        .bind(email)
        .bind(password)
        .execute(&self.connection_pool)
        .await?;

        info!("Admin account ready");
        self.find_by_email(email).await?.ok_or(Error::RowNotFound)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    /// Self-registered accounts are never admins
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let result = sqlx::query("INSERT INTO users (email, password, is_admin) VALUES (?, ?, 0)")
            .bind(&data.email)
            .bind(&data.password)
            .execute(&self.connection_pool)
            .await?;

        Ok(User {
            user_id: result.last_insert_rowid(),
            email: data.email.clone(),
            password: data.password.clone(),
            is_admin: false,
        })
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, email, password, is_admin FROM users WHERE user_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
