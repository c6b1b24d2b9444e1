//! Auth Session Gateway
//!
//! Credential authentication with short-lived signed access tokens and
//! long-lived refresh sessions:
//! - Sign-up and sign-in against a user store with deterministic password hashing
//! - HS256 access tokens and CSPRNG refresh tokens persisted as 30-day sessions
//! - A bearer-token gate for protected routes
//! - Best-effort audit events for registrations and logins

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::{AuditSink, PasswordHasher, SessionRepository, UserRepository};
use infrastructure::audit::{HttpAuditSink, TracingAuditSink};
use infrastructure::auth::{DynSessionManager, SessionManager};
use infrastructure::database;
use infrastructure::session::{InMemorySessionRepository, PostgresSessionRepository};
use infrastructure::user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository};

/// Build the session manager and its collaborators from configuration
pub async fn create_session_manager(config: &AppConfig) -> anyhow::Result<DynSessionManager> {
    config
        .auth
        .validate()
        .context("Invalid auth configuration")?;

    let (users, sessions): (Arc<dyn UserRepository>, Arc<dyn SessionRepository>) =
        match &config.database.url {
            Some(url) => {
                info!("Connecting to PostgreSQL...");
                let pool = database::connect(url, &config.database).await?;
                info!("Using PostgreSQL user and session stores");
                (
                    Arc::new(PostgresUserRepository::new(pool.clone())),
                    Arc::new(PostgresSessionRepository::new(pool)),
                )
            }
            None => {
                info!("No database configured, using in-memory stores");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemorySessionRepository::new()),
                )
            }
        };

    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::new(&config.auth.password_salt)?);

    let audit: Arc<dyn AuditSink> = match &config.audit.endpoint {
        Some(endpoint) => {
            let sink = HttpAuditSink::new(endpoint.clone(), config.audit.timeout())?;
            info!(endpoint = sink.endpoint(), "Delivering audit events over HTTP");
            Arc::new(sink)
        }
        None => {
            info!("No audit endpoint configured, audit events go to the log");
            Arc::new(TracingAuditSink::new())
        }
    };

    Ok(SessionManager::new(
        users,
        sessions,
        hasher,
        audit,
        config.auth.jwt_config(),
    ))
}

/// Create application state with the given configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let manager = create_session_manager(config).await?;

    Ok(AppState::new(Arc::new(manager)))
}
