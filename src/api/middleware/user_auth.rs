//! Access gate: bearer-token authentication for protected routes

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{AuthError, UserId};

const BEARER_SCHEME: &str = "Bearer";

/// Reasons a request is turned away at the gate
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Missing or malformed Authorization header")]
    MissingOrMalformedCredential,

    #[error(transparent)]
    Rejected(#[from] AuthError),
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingOrMalformedCredential => {
                ApiError::unauthorized("Missing or malformed Authorization header")
                    .with_code("missing_credential")
            }
            GateError::Rejected(err) => err.into(),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Subject of a verified access token, stored in request extensions by
/// [`require_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Extractor that requires a valid access token
///
/// Reads the `Authorization: Bearer <token>` header and resolves the token
/// subject. Reuses the subject when [`require_auth`] already ran.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub UserId);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = GateError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(AuthenticatedUser(user_id)) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(RequireUser(*user_id));
        }

        authenticate(&parts.headers, state).map(RequireUser)
    }
}

/// Middleware form of the gate; rejected requests never reach the inner service
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, GateError> {
    let user_id = authenticate(request.headers(), &state)?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<UserId, GateError> {
    let token = extract_bearer_token(headers)?;

    state.auth_service.parse_token(token).map_err(|err| {
        if let Some(kind) = err.token_error() {
            warn!(kind = %kind, "Rejected access token");
        }
        GateError::from(err)
    })
}

/// Extract the credential from `Authorization: Bearer <token>`
///
/// The header must split on a single space into exactly the scheme and a
/// non-empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GateError::MissingOrMalformedCredential)?
        .to_str()
        .map_err(|_| GateError::MissingOrMalformedCredential)?;

    let mut parts = value.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => {
            debug!("Authorization header is not a bearer credential");
            Err(GateError::MissingOrMalformedCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::AuthServiceTrait;
    use crate::domain::{SignInInput, SignUpInput, TokenError};
    use crate::infrastructure::auth::TokenPair;
    use axum::{http::StatusCode, middleware, routing::get, Extension, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Accepts only the token "good", owned by user 7
    struct StubAuthService;

    #[async_trait::async_trait]
    impl AuthServiceTrait for StubAuthService {
        async fn sign_up(&self, _input: SignUpInput) -> Result<(), AuthError> {
            Ok(())
        }

        async fn sign_in(&self, _input: SignInInput) -> Result<TokenPair, AuthError> {
            Err(AuthError::UserNotFound)
        }

        async fn refresh_tokens(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
            Err(AuthError::SessionNotFound)
        }

        fn parse_token(&self, access_token: &str) -> Result<UserId, AuthError> {
            match access_token {
                "good" => Ok(UserId::new(7)),
                _ => Err(AuthError::Unauthenticated(TokenError::InvalidSignature)),
            }
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    fn is_malformed(result: Result<&str, GateError>) -> bool {
        matches!(result, Err(GateError::MissingOrMalformedCredential))
    }

    async fn unreachable_handler() -> &'static str {
        panic!("handler must not run")
    }

    fn test_state() -> AppState {
        AppState::new(Arc::new(StubAuthService))
    }

    async fn status_for(app: Router, authorization: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with("Bearer eyJhbGciOiJIUzI1NiJ9.test");

        assert_eq!(
            extract_bearer_token(&headers).unwrap(),
            "eyJhbGciOiJIUzI1NiJ9.test"
        );
    }

    #[test]
    fn test_missing_header() {
        assert!(is_malformed(extract_bearer_token(&HeaderMap::new())));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(is_malformed(extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz"))));
        assert!(is_malformed(extract_bearer_token(&headers_with("bearer abc"))));
    }

    #[test]
    fn test_empty_token() {
        assert!(is_malformed(extract_bearer_token(&headers_with("Bearer "))));
        assert!(is_malformed(extract_bearer_token(&headers_with("Bearer"))));
    }

    #[test]
    fn test_extra_spaces_are_rejected() {
        assert!(is_malformed(extract_bearer_token(&headers_with("Bearer  abc"))));
        assert!(is_malformed(extract_bearer_token(&headers_with("Bearer abc def"))));
    }

    #[tokio::test]
    async fn test_middleware_attaches_subject() {
        let app = Router::new()
            .route(
                "/protected",
                get(|Extension(AuthenticatedUser(id)): Extension<AuthenticatedUser>| async move {
                    id.to_string()
                }),
            )
            .layer(middleware::from_fn_with_state(test_state(), require_auth));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Bearer good")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"7");
    }

    #[tokio::test]
    async fn test_middleware_rejects_before_handler() {
        let app = || {
            Router::new()
                .route("/protected", get(unreachable_handler))
                .layer(middleware::from_fn_with_state(test_state(), require_auth))
        };

        assert_eq!(status_for(app(), None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(app(), Some("Token good")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(app(), Some("Bearer bad")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_extractor() {
        let app = || {
            Router::new()
                .route(
                    "/protected",
                    get(|RequireUser(id): RequireUser| async move { id.to_string() }),
                )
                .with_state(test_state())
        };

        assert_eq!(status_for(app(), Some("Bearer good")).await, StatusCode::OK);
        assert_eq!(status_for(app(), Some("Bearer bad")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(app(), None).await, StatusCode::UNAUTHORIZED);
    }
}
