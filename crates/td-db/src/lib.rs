//! td-db - Database layer for tenantdb
//!
//! This crate provides the [`MigrationConnection`] trait and its
//! implementations: PostgreSQL (tenant databases, always over TLS) and an
//! embedded DuckDB backend used for local dry runs and tests.

pub mod duckdb;
pub mod error;
pub mod postgres;
pub mod tls;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use crate::postgres::PostgresBackend;
pub use error::{DbError, DbResult};
pub use traits::{ColumnDescriptor, MigrationConnection};
