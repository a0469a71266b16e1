//! User repository
//!
//! - lookups: single-row SELECT, absent row is `Ok(None)`
//! - create: INSERT ... RETURNING, unique email violation maps to Conflict

use sqlx::PgPool;

use crate::error::{DbError, Result};
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by exact (case-sensitive) email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        tracing::debug!(params = 1, "user lookup by email");
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i32) -> Result<Option<User>> {
        tracing::debug!(params = 1, "user lookup by id");
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user, returning the stored row with its generated id.
    ///
    /// Relies on the UNIQUE constraint for email rather than check-then-insert.
    pub async fn create(&self, user: &NewUser) -> Result<User> {
        tracing::debug!(params = 3, "user insert");
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.password())
        .fetch_one(self.pool)
        .await
        .map_err(|err| DbError::from_insert("user", err))
    }
}
