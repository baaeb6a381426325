//! Migration connection trait definition

use crate::error::DbResult;
use serde::Serialize;

/// One column as reported by catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Declared type as the catalog spells it
    pub data_type: String,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Default expression, if any
    pub default: Option<String>,
}

/// Connection that migrations are applied through.
///
/// Methods take `&mut self` because the PostgreSQL client requires exclusive
/// access; a connection is only ever used by one migration run at a time.
/// Catalog lookups bind schema and table names as query parameters.
pub trait MigrationConnection {
    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Schema that unqualified DDL lands in
    fn default_schema(&self) -> &'static str;

    /// Open a transaction
    fn begin(&mut self) -> DbResult<()>;

    /// Execute one statement inside the current transaction
    fn execute(&mut self, sql: &str) -> DbResult<()>;

    /// Commit the current transaction
    fn commit(&mut self) -> DbResult<()>;

    /// Roll back the current transaction
    fn rollback(&mut self) -> DbResult<()>;

    /// Check whether a base table exists
    fn table_exists(&mut self, schema: &str, table: &str) -> DbResult<bool>;

    /// Base tables in `schema`, ordered by name
    fn list_tables(&mut self, schema: &str) -> DbResult<Vec<String>>;

    /// Columns of a table, in ordinal order
    fn list_columns(&mut self, schema: &str, table: &str) -> DbResult<Vec<ColumnDescriptor>>;
}

/// Interpret an `information_schema.columns.is_nullable` value.
pub(crate) fn is_nullable_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("YES")
}
