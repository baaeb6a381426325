//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use td_core::{Config, CoreError, DatabaseConfig, TenantId, TenantStore};
use td_db::{DuckDbBackend, MigrationConnection, PostgresBackend};

use crate::cli::{GlobalArgs, TargetArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors (open connections) run first.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main exits without printing it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load `--config`, else `tenantdb.yml` in the working directory, else defaults.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::load_from_dir(Path::new(".")) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { .. }) => {
            log::debug!("No tenantdb.yml in working directory, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load tenantdb.yml"),
    }
}

/// Database a command runs against.
pub(crate) enum Target {
    /// A PostgreSQL tenant database
    Postgres {
        tenant: Option<TenantId>,
        database: DatabaseConfig,
    },
    /// Local DuckDB file or `:memory:`
    DuckDb(String),
}

impl Target {
    /// Resolve the command-line target against the loaded config.
    pub(crate) fn resolve(args: &TargetArgs, config: &Config) -> Result<Self> {
        if let Some(id) = &args.tenant {
            let store = TenantStore::from_config(config);
            let tenant = store.get(id)?;
            return Ok(Target::Postgres {
                tenant: Some(TenantId::parse(id)?),
                database: tenant.database.clone(),
            });
        }
        if let Some(url) = &args.database_url {
            let database = DatabaseConfig::from_url(url.clone());
            database.validate("--database-url")?;
            return Ok(Target::Postgres {
                tenant: None,
                database,
            });
        }
        if let Some(path) = &args.duckdb {
            return Ok(Target::DuckDb(path.clone()));
        }
        anyhow::bail!("one of --tenant, --database-url or --duckdb is required")
    }

    /// Tenant the target belongs to, if any.
    pub(crate) fn tenant(&self) -> Option<&TenantId> {
        match self {
            Target::Postgres { tenant, .. } => tenant.as_ref(),
            Target::DuckDb(_) => None,
        }
    }

    /// Open a connection to the target.
    pub(crate) fn connect(&self) -> Result<Box<dyn MigrationConnection>> {
        match self {
            Target::Postgres { database, .. } => {
                log::info!("Connecting to {}", database.describe());
                let backend = PostgresBackend::connect(database)
                    .context("Could not connect to tenant database")?;
                Ok(Box::new(backend))
            }
            Target::DuckDb(path) => {
                let backend = DuckDbBackend::new(path)
                    .with_context(|| format!("Could not open DuckDB database {path}"))?;
                Ok(Box::new(backend))
            }
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}
