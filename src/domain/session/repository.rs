//! Refresh session repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::RefreshSession;
use crate::domain::StoreError;

/// Durable storage of issued refresh sessions
#[async_trait]
pub trait SessionRepository: Send + Sync + Debug {
    /// Persist a newly issued session
    async fn create(&self, session: RefreshSession) -> Result<(), StoreError>;

    /// Look up a session by its exact token value
    ///
    /// Returns `StoreError::NotFound` when the token is unknown.
    async fn find_by_token(&self, token: &str) -> Result<RefreshSession, StoreError>;
}
