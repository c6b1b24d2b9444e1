mod app_config;

pub use app_config::{
    AppConfig, AuditConfig, AuthConfig, ConfigValidationError, DatabaseConfig, LogFormat,
    LoggingConfig, ServerConfig, MAX_ACCESS_TOKEN_TTL_SECS,
};
