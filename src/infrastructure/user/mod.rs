//! User infrastructure module
//!
//! Credential hashers and user store adapters (in-memory and PostgreSQL).

mod password;
mod postgres_repository;
mod repository;

pub use password::{Argon2Hasher, Sha256Hasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;

pub(crate) use postgres_repository::{map_read_error, map_write_error};
