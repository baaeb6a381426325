//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tenantdb - apply a repository's schema migration to a tenant database
#[derive(Parser, Debug)]
#[command(name = "tenantdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to tenantdb.yml (default: ./tenantdb.yml if present)
    #[arg(short, long, global = true, env = "TENANTDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a SQL file into statements and print them
    Split(SplitArgs),

    /// Locate the migration script in a repository
    Discover(DiscoverArgs),

    /// Apply a repository's migration to a tenant database
    Migrate(MigrateArgs),

    /// Inventory a tenant database's schema
    Verify(VerifyArgs),

    /// List configured tenants
    Tenants,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL file to split
    pub file: PathBuf,
}

/// Arguments for the discover command
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Repository checkout to search
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,
}

/// Which database a command talks to
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Tenant id from the config file
    #[arg(short, long)]
    pub tenant: Option<String>,

    /// PostgreSQL connection URL
    #[arg(long, env = "TENANTDB_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Local DuckDB file (or :memory:) for dry runs
    #[arg(long)]
    pub duckdb: Option<String>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Repository checkout containing the migration
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Exit non-zero if any statement failed
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Schema to inspect (overrides the config file)
    #[arg(short, long)]
    pub schema: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
