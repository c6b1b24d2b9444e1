//! Opaque refresh token generation

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes in a refresh token
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generator for high-entropy refresh token values
///
/// Bytes come from the operating system CSPRNG and are hex encoded.
#[derive(Debug, Clone)]
pub struct RefreshTokenGenerator {
    token_bytes: usize,
}

impl RefreshTokenGenerator {
    pub fn new() -> Self {
        Self {
            token_bytes: REFRESH_TOKEN_BYTES,
        }
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    /// Generate a new refresh token value
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.token_bytes];
        OsRng.fill_bytes(&mut random_bytes);

        hex::encode(random_bytes)
    }
}

impl Default for RefreshTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
