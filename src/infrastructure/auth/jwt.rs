//! Signed access tokens (HS256 JWT)

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::{TokenError, UserId};

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID as a decimal string); a non-string value reads as absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_subject"
    )]
    pub sub: Option<String>,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    /// Unique token ID, keeps tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,
}

impl JwtClaims {
    /// Create claims for a subject, valid from now for `ttl`
    ///
    /// Fails with `TokenError::Encoding` when the expiry is out of range.
    pub fn new(subject: UserId, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or(TokenError::Encoding)?;

        Ok(Self {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .as_deref()
            .ok_or(TokenError::InvalidSubject)?
            .parse()
            .map_err(|_| TokenError::InvalidSubject)
    }
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(sub)) => Ok(Some(sub)),
        _ => Ok(None),
    }
}

/// Configuration for access token signing
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Access token lifetime
    pub access_token_ttl: std::time::Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_ttl: std::time::Duration) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl,
        }
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

/// Issue a signed access token for `subject` that expires `ttl` from now
pub fn issue(
    subject: UserId,
    secret: &[u8],
    ttl: std::time::Duration,
) -> Result<String, TokenError> {
    sign(subject, ttl, &EncodingKey::from_secret(secret))
}

/// Verify a token signed with `secret` and return its subject
pub fn verify(token: &str, secret: &[u8]) -> Result<UserId, TokenError> {
    verify_with_key(token, &DecodingKey::from_secret(secret))
}

fn sign(
    subject: UserId,
    ttl: std::time::Duration,
    key: &EncodingKey,
) -> Result<String, TokenError> {
    let ttl = Duration::from_std(ttl).map_err(|_| TokenError::Encoding)?;
    let claims = JwtClaims::new(subject, ttl)?;

    encode(&Header::new(SIGNING_ALGORITHM), &claims, key).map_err(|_| TokenError::Encoding)
}

/// Read the `alg` name from the token header without validating anything else
///
/// Names jsonwebtoken does not know (`none`, typos) still come back verbatim.
fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let segment = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| TokenError::Malformed)?;
    let header: Value = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    header
        .get("alg")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(TokenError::Malformed)
}

fn verify_with_key(token: &str, key: &DecodingKey) -> Result<UserId, TokenError> {
    let algorithm = declared_algorithm(token)?;

    if algorithm != SIGNING_ALGORITHM_NAME {
        return Err(TokenError::WrongSigningMethod(algorithm));
    }

    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;

    let token_data = decode::<JwtClaims>(token, key, &validation).map_err(map_decode_error)?;

    token_data.claims.user_id()
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::WrongSigningMethod("unsupported".to_string())
        }
        _ => TokenError::Malformed,
    }
}

/// Encode and verify access tokens
pub trait TokenCodec: Send + Sync + Debug {
    /// Issue a token for a subject using the configured TTL
    fn issue(&self, subject: UserId) -> Result<String, TokenError>;

    /// Verify a token and return its subject
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;

    /// Configured access token lifetime
    fn access_token_ttl(&self) -> std::time::Duration;
}

/// HMAC-SHA256 token codec keyed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenCodec for JwtService {
    fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        sign(subject, self.config.access_token_ttl, &self.encoding_key)
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        verify_with_key(token, &self.decoding_key)
    }

    fn access_token_ttl(&self) -> std::time::Duration {
        self.config.access_token_ttl
    }
}
