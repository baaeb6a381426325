//! tenantdb CLI - apply a repository's schema migration to a tenant database

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{discover, migrate, split, tenants, verify};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(&cli) {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        if cli.global.json {
            println!("{}", serde_json::json!({ "error": format!("{err:#}") }));
        } else {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Split(args) => split::execute(args, &cli.global),
        Commands::Discover(args) => discover::execute(args, &cli.global),
        Commands::Migrate(args) => migrate::execute(args, &cli.global),
        Commands::Verify(args) => verify::execute(args, &cli.global),
        Commands::Tenants => tenants::execute(&cli.global),
    }
}

/// Route `log` records to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
