//! End-to-end migration runs.
//!
//! A run locates the migration script in a repository checkout, connects to
//! the tenant database, applies every statement and snapshots the resulting
//! schema. Statement and verification failures end up in the returned
//! [`MigrationRun`]; only discovery and connection failures abort.

use crate::discovery::{load_migration, MigrationSource};
use crate::error::MigrateResult;
use crate::executor::{execute, ExecutionReport};
use crate::verify::{verify, SchemaSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use td_core::{compute_checksum, Config, DatabaseConfig, TenantId, VerifyConfig};
use td_db::{MigrationConnection, PostgresBackend};
use uuid::Uuid;

/// Knobs for a migration run.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Relative paths tried before the recursive search
    pub candidate_paths: Vec<String>,
    /// Post-migration verification settings
    pub verify: VerifyConfig,
    /// Tenant being migrated, recorded in the report
    pub tenant: Option<TenantId>,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MigrationOptions {
    /// Take discovery and verification settings from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            candidate_paths: config.discovery.candidate_paths.clone(),
            verify: config.verify.clone(),
            tenant: None,
        }
    }

    /// Attribute the run to `tenant`.
    pub fn with_tenant(mut self, tenant: TenantId) -> Self {
        self.tenant = Some(tenant);
        self
    }
}

/// Report of one migration run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationRun {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Tenant the run was for, if known
    pub tenant: Option<TenantId>,
    /// Backend type the migration ran against
    pub database: String,
    /// Migration script that was applied
    pub migration_path: PathBuf,
    /// SHA-256 of the migration text
    pub checksum: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// "N of M statements succeeded"
    pub summary: String,
    pub execution: ExecutionReport,
    pub snapshot: SchemaSnapshot,
}

impl MigrationRun {
    /// Whether every statement committed.
    pub fn all_succeeded(&self) -> bool {
        self.execution.failed() == 0
    }
}

/// Migrate a tenant's PostgreSQL database from the script in `repo_root`.
///
/// The script is located before connecting, so a repository without one never
/// touches the database. The connection is closed when the run returns.
pub fn run_migrations(
    database: &DatabaseConfig,
    repo_root: &Path,
    options: &MigrationOptions,
) -> MigrateResult<MigrationRun> {
    let source = load_migration(repo_root, &options.candidate_paths)?;

    log::info!("Connecting to {}", database.describe());
    let mut conn = PostgresBackend::connect(database)?;
    Ok(apply_migration(&mut conn, &source, options))
}

/// Like [`run_migrations`], against an already open connection.
pub fn run_migrations_with<C>(
    conn: &mut C,
    repo_root: &Path,
    options: &MigrationOptions,
) -> MigrateResult<MigrationRun>
where
    C: MigrationConnection + ?Sized,
{
    let source = load_migration(repo_root, &options.candidate_paths)?;
    Ok(apply_migration(conn, &source, options))
}

/// Split, execute and verify a loaded migration script.
pub fn apply_migration<C>(
    conn: &mut C,
    source: &MigrationSource,
    options: &MigrationOptions,
) -> MigrationRun
where
    C: MigrationConnection + ?Sized,
{
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let statements = td_sql::split(&source.text);
    log::info!(
        "Run {run_id}: applying {} statement(s) from {} to {}",
        statements.len(),
        source.path.display(),
        conn.db_type()
    );

    let execution = execute(conn, &statements);
    let snapshot = verify(conn, &options.verify);
    let summary = execution.summary();

    if let Some(tenant) = &options.tenant {
        log::info!("Tenant {tenant}: {summary}");
    }

    MigrationRun {
        run_id,
        tenant: options.tenant.clone(),
        database: conn.db_type().to_string(),
        migration_path: source.path.clone(),
        checksum: compute_checksum(&source.text),
        started_at,
        finished_at: Utc::now(),
        summary,
        execution,
        snapshot,
    }
}
