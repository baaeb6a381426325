//! Verify command implementation

use anyhow::Result;
use td_migrate::{verify, SchemaSnapshot};

use crate::cli::{GlobalArgs, VerifyArgs};
use crate::commands::common::{load_config, print_json, Target};

/// Execute the verify command
pub(crate) fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let target = Target::resolve(&args.target, &config)?;

    let mut verify_config = config.verify.clone();
    if let Some(schema) = &args.schema {
        verify_config.schema = Some(schema.clone());
    }

    let mut conn = target.connect()?;
    let snapshot = verify(conn.as_mut(), &verify_config);

    if global.json {
        print_json(&snapshot)
    } else {
        print_snapshot(&snapshot);
        Ok(())
    }
}

/// Human-readable schema inventory.
pub(crate) fn print_snapshot(snapshot: &SchemaSnapshot) {
    println!(
        "Schema {}: {} table(s)",
        snapshot.schema,
        snapshot.tables.len()
    );
    for table in &snapshot.tables {
        println!("  {}", table.name);
        for column in &table.columns {
            let null = if column.nullable { "" } else { " NOT NULL" };
            match &column.default {
                Some(default) => println!(
                    "    {} {}{null} DEFAULT {default}",
                    column.name, column.data_type
                ),
                None => println!("    {} {}{null}", column.name, column.data_type),
            }
        }
    }

    if !snapshot.expected.is_empty() {
        println!("Expected tables:");
        for expected in &snapshot.expected {
            let mark = if expected.present { "ok" } else { "MISSING" };
            println!("  {:<8} {}", mark, expected.name);
        }
    }

    for err in &snapshot.errors {
        println!("warning: {err}");
    }
}
