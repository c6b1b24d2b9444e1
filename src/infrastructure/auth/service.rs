//! Session manager: registration, login, refresh and token parsing

use chrono::Utc;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    AuditEvent, AuditSink, AuthError, NewUser, PasswordHasher, RefreshSession, SessionRepository,
    SignInInput, SignUpInput, UserId, UserRepository,
};

use super::jwt::{JwtConfig, JwtService, TokenCodec};
use super::refresh::RefreshTokenGenerator;

/// Access and refresh token handed to a client after sign-in or refresh
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[hidden]")
            .field("refresh_token", &"[hidden]")
            .finish()
    }
}

/// Orchestrates user registration, login and the refresh-session lifecycle
///
/// Collaborators are injected at construction and never change afterwards.
/// Each type parameter may be a trait object, so stores chosen at runtime
/// (`Arc<dyn UserRepository>`) work as well as concrete ones.
pub struct SessionManager<U, S, H, A>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    A: AuditSink + ?Sized,
{
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: Arc<H>,
    audit: Arc<A>,
    tokens: JwtService,
    refresh_tokens: RefreshTokenGenerator,
}

/// Session manager wired with runtime-selected collaborators
pub type DynSessionManager =
    SessionManager<dyn UserRepository, dyn SessionRepository, dyn PasswordHasher, dyn AuditSink>;

impl<U, S, H, A> Debug for SessionManager<U, S, H, A>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    A: AuditSink + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("users", &self.users)
            .field("sessions", &self.sessions)
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl<U, S, H, A> SessionManager<U, S, H, A>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    A: AuditSink + ?Sized,
{
    /// Create a new session manager
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<H>,
        audit: Arc<A>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            audit,
            tokens: JwtService::new(jwt_config),
            refresh_tokens: RefreshTokenGenerator::new(),
        }
    }

    /// Use a custom refresh token generator
    pub fn with_refresh_token_generator(mut self, generator: RefreshTokenGenerator) -> Self {
        self.refresh_tokens = generator;
        self
    }

    /// Register a new user
    ///
    /// `input` is expected to have passed [`SignUpInput::validate`] already.
    pub async fn sign_up(&self, input: SignUpInput) -> Result<(), AuthError> {
        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(AuthError::HashingFailed)?;

        let user_id = self
            .users
            .create(NewUser::new(input.name, input.email, password_hash))
            .await
            .map_err(AuthError::StoreWriteFailed)?;

        info!(user_id = %user_id, "User registered");

        self.record(AuditEvent::user_registered(user_id)).await;

        Ok(())
    }

    /// Authenticate with email and password and open a new refresh session
    ///
    /// Credentials that match no user give `UserNotFound`, whatever their shape.
    pub async fn sign_in(&self, input: SignInInput) -> Result<TokenPair, AuthError> {
        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(AuthError::HashingFailed)?;

        let user = match self
            .users
            .find_by_credentials(&input.email, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                debug!("Sign-in rejected: no user matches the given credentials");
                return Err(AuthError::UserNotFound);
            }
            Err(e) => return Err(AuthError::StoreReadFailed(e)),
        };

        let pair = self.generate_tokens(user.id()).await?;

        info!(user_id = %user.id(), "User signed in");

        self.record(AuditEvent::user_logged_in(user.id())).await;

        Ok(pair)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token is not revoked; it stays usable until it expires.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let session = match self.sessions.find_by_token(refresh_token).await {
            Ok(session) => session,
            Err(e) if e.is_not_found() => return Err(AuthError::SessionNotFound),
            Err(e) => return Err(AuthError::StoreReadFailed(e)),
        };

        if session.is_expired_at(Utc::now()) {
            debug!(user_id = %session.user_id(), "Refresh session expired");
            return Err(AuthError::RefreshTokenExpired);
        }

        self.generate_tokens(session.user_id()).await
    }

    /// Verify an access token and return its subject
    pub fn parse_token(&self, access_token: &str) -> Result<UserId, AuthError> {
        self.tokens.verify(access_token).map_err(|kind| {
            debug!(kind = %kind, "Access token rejected");
            AuthError::Unauthenticated(kind)
        })
    }

    /// Configured access token lifetime
    pub fn access_token_ttl(&self) -> std::time::Duration {
        self.tokens.access_token_ttl()
    }

    async fn generate_tokens(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let access_token = self
            .tokens
            .issue(user_id)
            .map_err(AuthError::TokenIssueFailed)?;

        let refresh_token = self.refresh_tokens.generate();

        // The access token is only released once its refresh session is durable
        self.sessions
            .create(RefreshSession::issue(user_id, refresh_token.clone()))
            .await
            .map_err(AuthError::SessionWriteFailed)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn record(&self, event: AuditEvent) {
        let (entity, action, entity_id) = (event.entity, event.action, event.entity_id);

        if let Err(e) = self.audit.send(event).await {
            warn!(
                entity = entity.as_str(),
                action = action.as_str(),
                entity_id,
                error = %e,
                "Failed to deliver audit event"
            );
        }
    }
}
