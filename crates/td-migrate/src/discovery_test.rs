use super::*;
use std::fs;

fn touch(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn defaults() -> Vec<String> {
    td_core::config::DEFAULT_CANDIDATE_PATHS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn test_candidate_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a/migration.sql", "SELECT 1;");
    let expected = touch(dir.path(), "supabase/migration.sql", "SELECT 2;");

    let found = discover_migration(dir.path(), &defaults()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_candidates_checked_in_order() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "second.sql", "");
    let first = touch(dir.path(), "first.sql", "");
    let candidates = vec!["first.sql".to_string(), "second.sql".to_string()];
    assert_eq!(discover_migration(dir.path(), &candidates).unwrap(), first);
}

#[test]
fn test_recursive_migration_sql_preferred_over_other_sql() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "aaa/seed.sql", "");
    let expected = touch(dir.path(), "zzz/deep/migration.sql", "");

    let found = discover_migration(dir.path(), &defaults()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_falls_back_to_any_sql_file() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "README.md", "# quiz app");
    let expected = touch(dir.path(), "schema/init.sql", "CREATE TABLE t (id INT);");

    let found = discover_migration(dir.path(), &defaults()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_first_sql_by_sorted_traversal() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b/one.sql", "");
    touch(dir.path(), "c.sql", "");
    let expected = touch(dir.path(), "a/z.sql", "");

    let found = discover_migration(dir.path(), &[]).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_skips_vcs_and_dependency_dirs() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), ".git/hooks/migration.sql", "");
    touch(dir.path(), "node_modules/pkg/migration.sql", "");
    let expected = touch(dir.path(), "sql/schema.sql", "");

    let found = discover_migration(dir.path(), &[]).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_directory_named_like_sql_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("migration.sql")).unwrap();
    let expected = touch(dir.path(), "x/init.sql", "");

    let found = discover_migration(dir.path(), &defaults()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_no_migration_found() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/app.ts", "export {}");

    let err = discover_migration(dir.path(), &defaults()).unwrap_err();
    assert!(matches!(err, MigrateError::NoMigrationFound { .. }));
}

#[test]
fn test_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover_migration(&dir.path().join("nope"), &defaults()).unwrap_err();
    assert!(matches!(err, MigrateError::RepoNotFound { .. }));
}

#[test]
fn test_load_migration_reads_text() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "migration.sql", "CREATE TABLE users (id INT);\n");

    let source = load_migration(dir.path(), &defaults()).unwrap();
    assert_eq!(source.path, dir.path().join("migration.sql"));
    assert_eq!(source.text, "CREATE TABLE users (id INT);\n");
}
