//! Error types for td-core

use thiserror::Error;

/// Core error type for tenantdb
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Tenant id failed validation
    #[error("[C003] Invalid tenant id '{id}': {reason}")]
    InvalidTenantId { id: String, reason: String },

    /// C004: Tenant not present in the store
    #[error("[C004] Unknown tenant '{id}'. Configured tenants: {available}")]
    TenantNotFound { id: String, available: String },

    /// C005: Password environment variable is unset
    #[error("[C005] Environment variable '{var}' (database password) is not set")]
    MissingPasswordEnv { var: String },

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
