//! Domain layer - Core entities, collaborator traits and error kinds

pub mod audit;
pub mod error;
pub mod session;
pub mod user;

pub use audit::{AuditAction, AuditEntity, AuditEvent, AuditSink};
pub use error::{AuditError, AuthError, HashingError, StoreError, TokenError, ValidationErrors};
pub use session::{RefreshSession, SessionRepository, REFRESH_SESSION_TTL_DAYS};
pub use user::{
    NewUser, PasswordHasher, SignInInput, SignUpInput, User, UserId, UserRepository,
};

#[cfg(test)]
pub use audit::MockAuditSink;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use user::MockPasswordHasher;
#[cfg(test)]
pub use user::MockUserRepository;
