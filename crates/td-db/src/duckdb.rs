//! DuckDB migration backend
//!
//! Runs migrations against an embedded database. Used for dry runs of a
//! migration file without a tenant server, and as the test backend.

use crate::error::{DbError, DbResult};
use crate::traits::{is_nullable_flag, ColumnDescriptor, MigrationConnection};
use ::duckdb::{params, Connection};
use std::path::Path;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn transaction_control(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }
}

impl MigrationConnection for DuckDbBackend {
    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn default_schema(&self) -> &'static str {
        "main"
    }

    fn begin(&mut self) -> DbResult<()> {
        self.transaction_control("BEGIN TRANSACTION")
    }

    fn execute(&mut self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn commit(&mut self) -> DbResult<()> {
        self.transaction_control("COMMIT")
    }

    fn rollback(&mut self) -> DbResult<()> {
        self.transaction_control("ROLLBACK")
    }

    fn table_exists(&mut self, schema: &str, table: &str) -> DbResult<bool> {
        // DuckDB resolves identifiers case-insensitively but stores them as written.
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = ? AND lower(table_name) = lower(?) \
                 AND table_type = 'BASE TABLE'",
                params![schema, table],
                |row| row.get(0),
            )
            .map_err(|e| DbError::CatalogError(format!("table lookup failed: {e}")))?;
        Ok(count > 0)
    }

    fn list_tables(&mut self, schema: &str) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = ? AND table_type = 'BASE TABLE' \
                 ORDER BY table_name",
            )
            .map_err(|e| DbError::CatalogError(format!("prepare failed: {e}")))?;
        let tables = stmt
            .query_map(params![schema], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::CatalogError(format!("table listing failed: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::CatalogError(format!("row error: {e}")))?;
        Ok(tables)
    }

    fn list_columns(&mut self, schema: &str, table: &str) -> DbResult<Vec<ColumnDescriptor>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT column_name, data_type, is_nullable, column_default \
                 FROM information_schema.columns \
                 WHERE table_schema = ? AND table_name = ? \
                 ORDER BY ordinal_position",
            )
            .map_err(|e| DbError::CatalogError(format!("prepare failed: {e}")))?;
        let columns = stmt
            .query_map(params![schema, table], |row| {
                let nullable: String = row.get(2)?;
                Ok(ColumnDescriptor {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    nullable: is_nullable_flag(&nullable),
                    default: row.get(3)?,
                })
            })
            .map_err(|e| DbError::CatalogError(format!("column listing failed: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::CatalogError(format!("row error: {e}")))?;
        Ok(columns)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
