//! In-memory refresh session repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::{RefreshSession, SessionRepository};
use crate::domain::StoreError;

/// In-memory implementation of SessionRepository, keyed by token value
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, RefreshSession>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemorySessionRepository {
    /// Number of stored sessions, expired ones included
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: RefreshSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(session.token()) {
            return Err(StoreError::conflict("Refresh token already exists"));
        }

        sessions.insert(session.token().to_string(), session);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<RefreshSession, StoreError> {
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
