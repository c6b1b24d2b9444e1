//! User entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned numeric user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Output of the credential hasher, never plaintext
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user registered now
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            registered_at: Utc::now(),
        }
    }
}

/// Registered user
///
/// Created once at sign-up and never mutated by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    /// Hashed credential - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            registered_at,
        }
    }

    /// Materialize a persisted user from its pre-insert form
    pub fn from_new(id: UserId, user: NewUser) -> Self {
        Self::new(id, user.name, user.email, user.password_hash, user.registered_at)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_from_new() {
        let new_user = NewUser::new("Ann", "ann@x.com", "hashed");
        let registered_at = new_user.registered_at;
        let user = User::from_new(UserId::new(7), new_user);

        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.name(), "Ann");
        assert_eq!(user.email(), "ann@x.com");
        assert_eq!(user.password_hash(), "hashed");
        assert_eq!(user.registered_at(), registered_at);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = User::from_new(UserId::new(1), NewUser::new("Ann", "ann@x.com", "hashed_pw"));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_pw"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"id\":1"));
    }
}
