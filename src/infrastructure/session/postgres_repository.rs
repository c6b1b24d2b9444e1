//! PostgreSQL refresh session repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::session::{RefreshSession, SessionRepository};
use crate::domain::{StoreError, UserId};
use crate::infrastructure::user::{map_read_error, map_write_error};

/// PostgreSQL implementation of SessionRepository
#[derive(Debug, Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: RefreshSession) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.user_id().value())
        .bind(session.token())
        .bind(session.expires_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "refresh token"))?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<RefreshSession, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, token, expires_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(map_read_error)?;

        let user_id: i64 = row.try_get("user_id").map_err(map_read_error)?;
        let token: String = row.try_get("token").map_err(map_read_error)?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(map_read_error)?;

        Ok(RefreshSession::new(UserId::new(user_id), token, expires_at))
    }
}
