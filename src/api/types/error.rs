//! JSON error envelope and the mapping from session errors to HTTP statuses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;

use crate::domain::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    fields: None,
                    code: None,
                },
            },
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    /// Attach per-field validation messages
    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.response.error.fields = Some(fields);
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => Self::bad_request("Validation failed")
                .with_code("validation_failed")
                .with_fields(errors.fields().clone()),
            AuthError::UserNotFound => {
                Self::not_found("User not found").with_code("user_not_found")
            }
            AuthError::SessionNotFound => {
                Self::not_found("Refresh session not found").with_code("session_not_found")
            }
            AuthError::RefreshTokenExpired => {
                Self::unauthorized("Refresh token expired").with_code("refresh_token_expired")
            }
            AuthError::Unauthenticated(_) => {
                Self::unauthorized("Unauthenticated").with_code("unauthenticated")
            }
            other => {
                error!(error = %other, "Request failed with an internal error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StoreError, TokenError, ValidationErrors};

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Missing cookie");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.error.message, "Missing cookie");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::SessionNotFound, StatusCode::NOT_FOUND),
            (AuthError::RefreshTokenExpired, StatusCode::UNAUTHORIZED),
            (
                AuthError::Unauthenticated(TokenError::Expired),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AuthError::StoreReadFailed(StoreError::storage("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::SessionWriteFailed(StoreError::storage("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_validation_fields_are_exposed() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Email is invalid");

        let api_err = ApiError::from(AuthError::Validation(errors));

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        let fields = api_err.response.error.fields.unwrap();
        assert_eq!(fields.get("email").map(String::as_str), Some("Email is invalid"));
    }

    #[test]
    fn test_unauthenticated_hides_kind() {
        let api_err = ApiError::from(AuthError::Unauthenticated(TokenError::InvalidSignature));
        let json = serde_json::to_string(&api_err.response).unwrap();

        assert!(json.contains("authentication_error"));
        assert!(!json.to_lowercase().contains("signature"));
    }

    #[test]
    fn test_internal_errors_are_not_echoed() {
        let api_err =
            ApiError::from(AuthError::StoreWriteFailed(StoreError::storage("pg: relation users")));

        assert_eq!(api_err.response.error.message, "Internal server error");
    }
}
