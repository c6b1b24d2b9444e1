use serde::Deserialize;
use std::time::Duration;

use crate::domain::REFRESH_SESSION_TTL_DAYS;
use crate::infrastructure::auth::JwtConfig;

/// Access tokens may not outlive the refresh session they come with
pub const MAX_ACCESS_TOKEN_TTL_SECS: u64 = REFRESH_SESSION_TTL_DAYS as u64 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing and credential hashing settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HMAC secret for access tokens
    pub token_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: u64,
    /// Application-wide salt mixed into password hashes
    pub password_salt: String,
}

/// PostgreSQL settings; without a URL the in-memory stores are used
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Remote audit service; without an endpoint events go to the log
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("auth.token_secret must not be empty")]
    EmptyTokenSecret,

    #[error("auth.access_token_ttl_secs must be greater than zero")]
    ZeroTokenTtl,

    #[error("auth.access_token_ttl_secs must not exceed {max_secs}")]
    TokenTtlTooLong { max_secs: u64 },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            access_token_ttl_secs: 900,
            password_salt: String::new(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[hidden]")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("password_salt", &"[hidden]")
            .finish()
    }
}

impl AuthConfig {
    /// Reject settings the token codec cannot work with
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.token_secret.is_empty() {
            return Err(ConfigValidationError::EmptyTokenSecret);
        }

        if self.access_token_ttl_secs == 0 {
            return Err(ConfigValidationError::ZeroTokenTtl);
        }

        if self.access_token_ttl_secs > MAX_ACCESS_TOKEN_TTL_SECS {
            return Err(ConfigValidationError::TokenTtlTooLong {
                max_secs: MAX_ACCESS_TOKEN_TTL_SECS,
            });
        }

        Ok(())
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.token_secret.clone(), self.access_token_ttl())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 2000,
        }
    }
}

impl AuditConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
