//! Integration tests for the migration engine against embedded DuckDB.

use std::fs;
use std::path::Path;
use td_core::{DatabaseConfig, TenantId, VerifyConfig};
use td_db::{DuckDbBackend, MigrationConnection};
use td_migrate::{
    load_migration, run_migrations, run_migrations_with, MigrateError, MigrationOptions,
};

const QUIZ_MIGRATION: &str = r#"
-- quiz app schema
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    email VARCHAR NOT NULL
);

CREATE TABLE quizzes (
    id INTEGER PRIMARY KEY,
    owner_id INTEGER,
    title VARCHAR
);

/* intentionally broken */
CREATE TABEL oops (id INTEGER);

CREATE TABLE "Questions" (
    id INTEGER,
    quiz_id INTEGER,
    prompt VARCHAR
);
INSERT INTO users VALUES (1, 'admin@example.com');
"#;

fn write_repo(root: &Path, rel: &str, sql: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, sql).unwrap();
}

fn options(expected: &[&str]) -> MigrationOptions {
    MigrationOptions {
        verify: VerifyConfig {
            schema: None,
            expected_tables: expected.iter().map(|t| t.to_string()).collect(),
        },
        ..MigrationOptions::default()
    }
}

#[test]
fn test_full_run_applies_everything_but_the_broken_statement() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "supabase/migration.sql", QUIZ_MIGRATION);

    let mut db = DuckDbBackend::in_memory().unwrap();
    let opts = options(&["users", "quizzes", "Questions", "friends"])
        .with_tenant(TenantId::parse("acme").unwrap());
    let run = run_migrations_with(&mut db, repo.path(), &opts).unwrap();

    assert_eq!(run.summary, "4 of 5 statements succeeded");
    assert!(!run.all_succeeded());
    assert_eq!(run.database, "duckdb");
    assert_eq!(run.tenant.as_ref().unwrap(), "acme");
    assert_eq!(run.migration_path, repo.path().join("supabase/migration.sql"));

    let failures: Vec<_> = run.execution.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 2);
    assert!(failures[0].statement.starts_with("CREATE TABEL oops"));

    assert_eq!(
        run.snapshot.table_names(),
        vec!["Questions", "quizzes", "users"]
    );
    assert_eq!(run.snapshot.missing_expected(), vec!["friends"]);
    assert!(run.snapshot.is_complete());
    assert!(run.finished_at >= run.started_at);
}

#[test]
fn test_checksum_tracks_migration_text() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "migration.sql", "CREATE TABLE t (id INTEGER);");

    let mut db = DuckDbBackend::in_memory().unwrap();
    let run = run_migrations_with(&mut db, repo.path(), &options(&[])).unwrap();
    assert_eq!(
        run.checksum,
        td_core::compute_checksum("CREATE TABLE t (id INTEGER);")
    );
    assert_eq!(run.checksum.len(), 64);
}

#[test]
fn test_missing_migration_aborts_before_execution() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "README.md", "no sql here");

    let mut db = DuckDbBackend::in_memory().unwrap();
    let err = run_migrations_with(&mut db, repo.path(), &options(&[])).unwrap_err();
    assert!(matches!(err, MigrateError::NoMigrationFound { .. }));
    assert!(db.list_tables("main").unwrap().is_empty());
}

#[test]
fn test_discovery_happens_before_connecting() {
    let repo = tempfile::tempdir().unwrap();
    // Would be a connection failure if the database were contacted first.
    let database = DatabaseConfig::from_url("postgresql://u:p@127.0.0.1:1/postgres");
    let err = run_migrations(&database, repo.path(), &options(&[])).unwrap_err();
    assert!(matches!(err, MigrateError::NoMigrationFound { .. }));
}

#[test]
fn test_unreachable_database_is_connection_error() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "migration.sql", "SELECT 1;");
    let mut database = DatabaseConfig::from_url("postgresql://u:p@127.0.0.1:1/postgres");
    database.connect_timeout_secs = 2;

    let err = run_migrations(&database, repo.path(), &options(&[])).unwrap_err();
    assert!(matches!(err, MigrateError::Connection(_)));
    assert!(err.to_string().starts_with("[G001]"));
}

#[test]
fn test_rerun_is_best_effort() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "db/migration.sql", QUIZ_MIGRATION);
    let mut db = DuckDbBackend::in_memory().unwrap();

    run_migrations_with(&mut db, repo.path(), &options(&[])).unwrap();
    let second = run_migrations_with(&mut db, repo.path(), &options(&[])).unwrap();

    // every CREATE and the duplicate-key INSERT fail; the run still completes
    assert_eq!(second.execution.succeeded(), 0);
    assert_eq!(second.execution.total(), 5);
    assert_eq!(second.snapshot.tables.len(), 3);
}

#[test]
fn test_run_report_json_shape() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "sql/migration.sql", "CREATE TABLE users (id INTEGER);\nBROKEN;");
    let mut db = DuckDbBackend::in_memory().unwrap();
    let run = run_migrations_with(&mut db, repo.path(), &options(&["users"])).unwrap();

    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["summary"], "1 of 2 statements succeeded");
    assert!(json["run_id"].is_string());
    assert!(json["tenant"].is_null());
    assert_eq!(json["execution"]["results"][0]["status"], "succeeded");
    assert_eq!(json["execution"]["results"][0]["table_confirmed"], true);
    assert_eq!(json["execution"]["results"][1]["status"], "failed");
    assert_eq!(json["snapshot"]["schema"], "main");
    assert_eq!(json["snapshot"]["tables"][0]["name"], "users");
    assert_eq!(json["snapshot"]["tables"][0]["columns"][0]["name"], "id");
    assert_eq!(json["snapshot"]["expected"][0]["present"], true);
}

#[test]
fn test_load_migration_uses_configured_candidates() {
    let repo = tempfile::tempdir().unwrap();
    write_repo(repo.path(), "migration.sql", "SELECT 1;");
    write_repo(repo.path(), "custom/schema.sql", "SELECT 2;");

    let source = load_migration(repo.path(), &["custom/schema.sql".to_string()]).unwrap();
    assert_eq!(source.text, "SELECT 2;");
}
