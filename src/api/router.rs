use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth::create_auth_router(state.clone()))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
