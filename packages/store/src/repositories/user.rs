//! User repository
//!
//! Account lookups and mutations. Username lookup is an exact,
//! case-sensitive equality match. Credentials are hashed here, on the way
//! in, so plaintext never reaches storage.

use async_trait::async_trait;
use sqlx::PgPool;

use super::utils::USER_COLUMNS;
use crate::error::{StoreError, StoreResult};
use crate::models::{ChangePasswordRequest, RegisterUser, User};
use crate::password::{hash_password, verify_password};

/// Storage capability for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List all users, ordered by username.
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Fetch a single user by id. Absence is `Ok(None)`, never an error.
    async fn get(&self, user_id: i32) -> StoreResult<Option<User>>;

    /// Fetch a single user by exact username.
    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Create a user from a registration payload. The password is hashed
    /// before insertion; a username collision is a
    /// [`StoreError::DuplicateUsername`].
    async fn create(&self, registration: &RegisterUser) -> StoreResult<User>;

    /// Overwrite the credential of the row identified by `user.id`.
    /// `change.current_password` must match the supplied record's stored
    /// hash; a missing id is a [`StoreError::ZeroRowsAffected`].
    async fn update_password(
        &self,
        user: &User,
        change: &ChangePasswordRequest,
    ) -> StoreResult<User>;
}

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn reload(&self, user_id: i32) -> StoreResult<User> {
        self.get(user_id)
            .await?
            .ok_or(StoreError::ZeroRowsAffected {
                entity: "users",
                id: user_id,
            })
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY username ASC", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn get(&self, user_id: i32) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn create(&self, registration: &RegisterUser) -> StoreResult<User> {
        let password_hash = hash_password(&registration.password)?;

        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING user_id",
        )
        .bind(&registration.username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(registration.username.clone())
            }
            _ => StoreError::from_sqlx(e),
        })?;

        tracing::info!(user_id, username = %registration.username, "user registered");

        self.reload(user_id).await
    }

    async fn update_password(
        &self,
        user: &User,
        change: &ChangePasswordRequest,
    ) -> StoreResult<User> {
        if !verify_password(&change.current_password, &user.password_hash)? {
            return Err(StoreError::Credential(
                "current password does not match".to_string(),
            ));
        }

        let new_hash = hash_password(&change.new_password)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(&new_hash)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ZeroRowsAffected {
                entity: "users",
                id: user.id,
            });
        }

        tracing::info!(user_id = user.id, "password updated");

        self.reload(user.id).await
    }
}
