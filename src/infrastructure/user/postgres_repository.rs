//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::StoreError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, registered_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.email))?;

        Ok(UserId::new(id))
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password, registered_at
            FROM users
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_read_error)?;

        row_to_user(&row)
    }
}

/// Translate driver errors on reads, isolating the "no rows" case
pub(crate) fn map_read_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::storage(other.to_string()),
    }
}

/// Translate driver errors on inserts, isolating unique violations
pub(crate) fn map_write_error(err: sqlx::Error, key: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::conflict(format!("'{}' already exists", key))
        }
        _ => StoreError::storage(err.to_string()),
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, StoreError> {
    let id: i64 = row.try_get("id").map_err(map_read_error)?;
    let name: String = row.try_get("name").map_err(map_read_error)?;
    let email: String = row.try_get("email").map_err(map_read_error)?;
    let password_hash: String = row.try_get("password").map_err(map_read_error)?;
    let registered_at: DateTime<Utc> = row.try_get("registered_at").map_err(map_read_error)?;

    Ok(User::new(
        UserId::new(id),
        name,
        email,
        password_hash,
        registered_at,
    ))
}
