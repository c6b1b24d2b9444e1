//! Infrastructure layer - Adapters behind the domain traits

pub mod audit;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;
pub mod user;
