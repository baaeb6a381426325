//! Split command implementation

use anyhow::{Context, Result};
use td_sql::split;

use crate::cli::{GlobalArgs, SplitArgs};
use crate::commands::common::print_json;

/// Execute the split command
pub(crate) fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let statements = split(&text);

    if global.json {
        return print_json(&statements);
    }

    for (i, statement) in statements.iter().enumerate() {
        println!("-- [{}]", i + 1);
        println!("{statement};");
    }
    log::info!("{} statement(s)", statements.len());
    Ok(())
}
