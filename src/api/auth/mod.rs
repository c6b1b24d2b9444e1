//! Authentication API endpoints
//!
//! Sign-up, sign-in and refresh endpoints plus a protected identity probe.
//! The refresh token travels in an HttpOnly cookie scoped to `/auth`.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::api::middleware::{require_auth, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{AuthError, SignInInput, SignUpInput, UserId, REFRESH_SESSION_TTL_DAYS};
use crate::infrastructure::auth::TokenPair;

pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

const REFRESH_COOKIE_PATH: &str = "/auth";

/// Create the authentication router
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/refresh", get(refresh))
        .route(
            "/me",
            get(get_current_user).route_layer(middleware::from_fn_with_state(state, require_auth)),
        )
}

/// Registered user (safe to expose)
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub name: String,
    pub email: String,
}

/// Freshly issued access token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: UserId,
}

/// Register a new account
///
/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpInput>,
) -> Result<Json<SignUpResponse>, ApiError> {
    input.validate().map_err(AuthError::Validation)?;

    let response = SignUpResponse {
        name: input.name.clone(),
        email: input.email.clone(),
    };

    state.auth_service.sign_up(input).await?;

    Ok(Json(response))
}

/// Login with email and password
///
/// POST /auth/sign-in
///
/// Returns the access token in the body and sets the refresh token cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInInput>,
) -> Result<impl IntoResponse, ApiError> {
    input.validate().map_err(AuthError::Validation)?;

    let pair = state.auth_service.sign_in(input).await?;

    Ok(token_response(pair))
}

/// Exchange the refresh token cookie for a new token pair
///
/// GET /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = read_refresh_cookie(&headers).ok_or_else(|| {
        ApiError::bad_request("Missing refresh-token cookie").with_code("missing_refresh_token")
    })?;

    let pair = state.auth_service.refresh_tokens(refresh_token).await?;

    Ok(token_response(pair))
}

/// Get the authenticated user's id
///
/// GET /auth/me
pub async fn get_current_user(RequireUser(user_id): RequireUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user_id })
}

fn token_response(pair: TokenPair) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, refresh_cookie(&pair.refresh_token))],
        Json(TokenResponse {
            token: pair.access_token,
        }),
    )
}

fn refresh_cookie(value: &str) -> String {
    format!(
        "{}={}; Path={}; HttpOnly; SameSite=Strict; Max-Age={}",
        REFRESH_TOKEN_COOKIE,
        value,
        REFRESH_COOKIE_PATH,
        REFRESH_SESSION_TTL_DAYS * 24 * 60 * 60
    )
}

/// Find the refresh token among the request cookies
fn read_refresh_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == REFRESH_TOKEN_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn test_read_refresh_cookie() {
        let headers = headers_with_cookie("theme=dark; refresh-token=abc123; lang=en");
        assert_eq!(read_refresh_cookie(&headers), Some("abc123"));
    }

    #[test]
    fn test_read_refresh_cookie_missing() {
        assert_eq!(read_refresh_cookie(&HeaderMap::new()), None);
        assert_eq!(read_refresh_cookie(&headers_with_cookie("theme=dark")), None);
        assert_eq!(read_refresh_cookie(&headers_with_cookie("refresh-token=")), None);
    }

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("abc123");

        assert!(cookie.starts_with("refresh-token=abc123;"));
        assert!(cookie.contains("Path=/auth"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=2592000"));
    }
}
