//! Post-migration schema verification.
//!
//! Reads the table and column inventory back from catalog metadata and checks
//! a list of expected tables. Purely informational: catalog errors are logged
//! and recorded in the snapshot, never returned.

use crate::error::VerificationError;
use serde::Serialize;
use td_core::VerifyConfig;
use td_db::{ColumnDescriptor, MigrationConnection};

/// One table and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    /// Table name
    pub name: String,
    /// Columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,
}

/// Presence check for one expected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedTable {
    /// Table name
    pub name: String,
    /// Whether the catalog lists it
    pub present: bool,
}

/// Schema inventory taken after a migration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaSnapshot {
    /// Schema that was inspected
    pub schema: String,
    /// Base tables, ordered by name
    pub tables: Vec<TableSnapshot>,
    /// Expected-table checklist, in configured order
    pub expected: Vec<ExpectedTable>,
    /// Catalog queries that failed while building the snapshot
    pub errors: Vec<VerificationError>,
}

impl SchemaSnapshot {
    /// Table names, ordered.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Find a table by exact name.
    pub fn table(&self, name: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Expected tables the catalog did not list.
    pub fn missing_expected(&self) -> Vec<&str> {
        self.expected
            .iter()
            .filter(|e| !e.present)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Whether every catalog query succeeded.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Inventory the schema and check the expected tables.
pub fn verify<C>(conn: &mut C, config: &VerifyConfig) -> SchemaSnapshot
where
    C: MigrationConnection + ?Sized,
{
    let schema = config
        .schema
        .clone()
        .unwrap_or_else(|| conn.default_schema().to_string());
    let mut snapshot = SchemaSnapshot {
        schema: schema.clone(),
        ..SchemaSnapshot::default()
    };

    match conn.list_tables(&schema) {
        Ok(names) => {
            for name in names {
                let columns = match conn.list_columns(&schema, &name) {
                    Ok(columns) => columns,
                    Err(e) => {
                        record(&mut snapshot, format!("columns of {schema}.{name}"), e.detail());
                        Vec::new()
                    }
                };
                snapshot.tables.push(TableSnapshot { name, columns });
            }
        }
        Err(e) => record(&mut snapshot, format!("tables in {schema}"), e.detail()),
    }
    log::info!(
        "Schema {schema} has {} table(s): {}",
        snapshot.tables.len(),
        snapshot.table_names().join(", ")
    );

    for name in &config.expected_tables {
        let present = match conn.table_exists(&schema, name) {
            Ok(present) => present,
            Err(e) => {
                record(&mut snapshot, format!("expected table {name}"), e.detail());
                false
            }
        };
        if present {
            log::debug!("Expected table {name}: present");
        } else {
            log::warn!("Expected table {name}: MISSING");
        }
        snapshot.expected.push(ExpectedTable {
            name: name.clone(),
            present,
        });
    }

    snapshot
}

fn record(snapshot: &mut SchemaSnapshot, context: String, message: &str) {
    let err = VerificationError {
        context,
        message: message.to_string(),
    };
    log::warn!("{err}");
    snapshot.errors.push(err);
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod tests;
