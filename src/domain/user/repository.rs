//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::StoreError;

/// Durable storage of registered users
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user and return the identifier the store assigned
    ///
    /// Email uniqueness is enforced here and reported as `StoreError::Conflict`.
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError>;

    /// Find the user whose email and stored credential both match
    ///
    /// Returns `StoreError::NotFound` when no row matches.
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;
}
