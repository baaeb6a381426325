//! Discover command implementation

use anyhow::Result;
use serde::Serialize;
use td_migrate::discover_migration;

use crate::cli::{DiscoverArgs, GlobalArgs};
use crate::commands::common::{load_config, print_json};

#[derive(Serialize)]
struct Discovered {
    migration_path: String,
}

/// Execute the discover command
pub(crate) fn execute(args: &DiscoverArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let path = discover_migration(&args.repo, &config.discovery.candidate_paths)?;

    if global.json {
        print_json(&Discovered {
            migration_path: path.display().to_string(),
        })
    } else {
        println!("{}", path.display());
        Ok(())
    }
}
