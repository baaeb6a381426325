//! Migrate command implementation

use anyhow::Result;
use td_migrate::{apply_migration, load_migration, run_migrations, MigrationOptions, MigrationRun};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_config, print_json, ExitCode, Target};
use crate::commands::verify::print_snapshot;

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let target = Target::resolve(&args.target, &config)?;

    let mut options = MigrationOptions::from_config(&config);
    if let Some(tenant) = target.tenant() {
        options = options.with_tenant(tenant.clone());
    }

    let run = match &target {
        Target::Postgres { database, .. } => run_migrations(database, &args.repo, &options)?,
        Target::DuckDb(_) => {
            // locate the script first so a missing migration never creates the file
            let source = load_migration(&args.repo, &options.candidate_paths)?;
            let mut conn = target.connect()?;
            apply_migration(conn.as_mut(), &source, &options)
        }
    };

    if global.json {
        print_json(&run)?;
    } else {
        print_run(&run);
    }

    if args.strict && !run.all_succeeded() {
        return Err(ExitCode(2).into());
    }
    Ok(())
}

fn print_run(run: &MigrationRun) {
    println!("Migration: {}", run.migration_path.display());
    if let Some(tenant) = &run.tenant {
        println!("Tenant:    {tenant}");
    }
    println!("Checksum:  {}", run.checksum);
    println!();

    let failures: Vec<_> = run.execution.failures().collect();
    if !failures.is_empty() {
        println!("Failed statements:");
        for failure in failures {
            println!("  {failure}");
        }
        println!();
    }

    print_snapshot(&run.snapshot);
    println!();
    println!("{}", run.summary);
}
