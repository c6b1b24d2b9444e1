//! Authentication infrastructure module
//!
//! Access token codec, refresh token generation and the session manager
//! that ties them to the user and session stores.

mod jwt;
mod refresh;
mod service;

pub use jwt::{issue, verify, JwtClaims, JwtConfig, JwtService, TokenCodec};
pub use refresh::{RefreshTokenGenerator, REFRESH_TOKEN_BYTES};
pub use service::{DynSessionManager, SessionManager, TokenPair};
