//! Error types for td-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Transaction control error (D003)
    #[error("[D003] Transaction control failed: {0}")]
    TransactionError(String),

    /// Catalog metadata query error (D004)
    #[error("[D004] Catalog query failed: {0}")]
    CatalogError(String),

    /// TLS setup error (D005)
    #[error("[D005] TLS configuration failed: {0}")]
    TlsError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// The driver-reported message without the error code prefix.
    pub fn detail(&self) -> &str {
        match self {
            DbError::ConnectionError(msg)
            | DbError::ExecutionError(msg)
            | DbError::TransactionError(msg)
            | DbError::CatalogError(msg)
            | DbError::TlsError(msg) => msg,
        }
    }
}
