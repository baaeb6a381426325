//! Error types for the migration engine.
//!
//! [`MigrateError`] variants abort a run. [`StatementError`] and
//! [`VerificationError`] never do: they are recorded in the run report and
//! logged.

use serde::Serialize;
use thiserror::Error;

/// Fatal migration errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The tenant database could not be reached or the connection info is malformed (G001).
    #[error("[G001] Could not connect to tenant database")]
    Connection(#[source] td_db::DbError),

    /// No migration file could be located (G002).
    #[error("[G002] No migration file found under {root}")]
    NoMigrationFound { root: String },

    /// Repository root is missing or not a directory (G003).
    #[error("[G003] Repository root not found: {path}")]
    RepoNotFound { path: String },

    /// IO error with file path context (G004).
    #[error("[G004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

impl From<td_db::DbError> for MigrateError {
    fn from(err: td_db::DbError) -> Self {
        MigrateError::Connection(err)
    }
}

/// A statement that failed and was rolled back (G005).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("[G005] Statement {} failed: {message}", .index + 1)]
pub struct StatementError {
    /// Zero-based position in the statement list
    pub index: usize,
    /// The statement text
    pub statement: String,
    /// Driver-reported error
    pub message: String,
}

/// A catalog query that failed during verification (G006).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("[G006] Schema verification incomplete ({context}): {message}")]
pub struct VerificationError {
    /// What was being inspected
    pub context: String,
    /// Driver-reported error
    pub message: String,
}
