//! Tenants command implementation

use anyhow::Result;
use serde::Serialize;
use td_core::TenantStore;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, print_json};

#[derive(Serialize)]
struct TenantRow<'a> {
    id: &'a str,
    database: String,
    ssl_mode: String,
}

/// Execute the tenants command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let store = TenantStore::from_config(&config);

    let mut rows = Vec::with_capacity(store.len());
    for id in store.ids() {
        let tenant = store.get(id)?;
        rows.push(TenantRow {
            id,
            database: tenant.database.describe(),
            ssl_mode: tenant.database.ssl_mode.to_string(),
        });
    }

    if global.json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No tenants configured");
        return Ok(());
    }
    let width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
    for row in &rows {
        println!("{:width$}  {}  (sslmode={})", row.id, row.database, row.ssl_mode);
    }
    Ok(())
}
