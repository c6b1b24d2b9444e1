use std::collections::BTreeMap;

use thiserror::Error;

/// Errors surfaced by user and session store adapters
///
/// Adapters translate their backend-specific "no rows" condition into
/// `NotFound`; callers never inspect driver errors directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Failure of the credential hasher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Password hashing failed: {message}")]
pub struct HashingError {
    message: String,
}

impl HashingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure to deliver an audit event
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("Audit delivery failed: {message}")]
    Delivery { message: String },

    #[error("Audit sink rejected event with status {status}")]
    Rejected { status: u16 },
}

impl AuditError {
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Access token encode/verify failures
///
/// None of the messages carry key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Unexpected signing method: {0}")]
    WrongSigningMethod(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token subject is missing or invalid")]
    InvalidSubject,

    #[error("Failed to encode token")]
    Encoding,
}

/// Field-level input constraint violations, keyed by field name
#[derive(Debug, Error, Clone, PartialEq, Eq, Default)]
#[error("Validation failed for fields: {}", self.field_names().join(", "))]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// Errors returned by the session manager to its callers
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Failed to hash password")]
    HashingFailed(#[source] HashingError),

    #[error("Failed to store user: {0}")]
    StoreWriteFailed(#[source] StoreError),

    #[error("Failed to read from store: {0}")]
    StoreReadFailed(#[source] StoreError),

    #[error("User not found")]
    UserNotFound,

    #[error("Refresh session not found")]
    SessionNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Failed to store refresh session: {0}")]
    SessionWriteFailed(#[source] StoreError),

    #[error("Failed to issue access token")]
    TokenIssueFailed(#[source] TokenError),

    /// Every token verification failure collapses here; the kind is kept for logs
    #[error("Unauthenticated")]
    Unauthenticated(#[source] TokenError),
}

impl AuthError {
    /// The underlying token failure kind, when this is an authentication failure
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            Self::Unauthenticated(kind) | Self::TokenIssueFailed(kind) => Some(kind),
            _ => None,
        }
    }
}
