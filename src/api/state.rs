//! Application state for shared services

use std::sync::Arc;

use crate::domain::{
    AuditSink, AuthError, PasswordHasher, SessionRepository, SignInInput, SignUpInput, UserId,
    UserRepository,
};
use crate::infrastructure::auth::{SessionManager, TokenPair};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthServiceTrait>) -> Self {
        Self { auth_service }
    }
}

/// Trait for session lifecycle operations
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn sign_up(&self, input: SignUpInput) -> Result<(), AuthError>;
    async fn sign_in(&self, input: SignInInput) -> Result<TokenPair, AuthError>;
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
    fn parse_token(&self, access_token: &str) -> Result<UserId, AuthError>;
}

#[async_trait::async_trait]
impl<U, S, H, A> AuthServiceTrait for SessionManager<U, S, H, A>
where
    U: UserRepository + ?Sized + 'static,
    S: SessionRepository + ?Sized + 'static,
    H: PasswordHasher + ?Sized + 'static,
    A: AuditSink + ?Sized + 'static,
{
    async fn sign_up(&self, input: SignUpInput) -> Result<(), AuthError> {
        SessionManager::sign_up(self, input).await
    }

    async fn sign_in(&self, input: SignInInput) -> Result<TokenPair, AuthError> {
        SessionManager::sign_in(self, input).await
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        SessionManager::refresh_tokens(self, refresh_token).await
    }

    fn parse_token(&self, access_token: &str) -> Result<UserId, AuthError> {
        SessionManager::parse_token(self, access_token)
    }
}
