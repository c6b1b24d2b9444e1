//! Refresh session domain

mod entity;
mod repository;

pub use entity::{RefreshSession, REFRESH_SESSION_TTL_DAYS};
pub use repository::SessionRepository;

#[cfg(test)]
pub use repository::mock::MockSessionRepository;
