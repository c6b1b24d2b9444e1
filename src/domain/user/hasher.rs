//! Credential hasher trait

use std::fmt::Debug;

use crate::domain::HashingError;

#[cfg(test)]
use mockall::automock;

/// One-way transform of a plaintext password into its stored form
///
/// Implementations must be deterministic: the user store matches rows on
/// `(email, hash)`.
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into its stored representation
    fn hash(&self, password: &str) -> Result<String, HashingError>;
}
