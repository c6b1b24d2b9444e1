//! Refresh session store adapters

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresSessionRepository;
pub use repository::InMemorySessionRepository;
