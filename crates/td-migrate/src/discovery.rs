//! Locate the migration script inside a repository checkout.
//!
//! Three strategies, first hit wins:
//! 1. the configured candidate paths, in order;
//! 2. the first file named exactly `migration.sql`;
//! 3. the first file with a `.sql` extension.
//!
//! Searches are depth-first with directory entries sorted by name, so the
//! result does not depend on filesystem enumeration order.

use crate::error::{MigrateError, MigrateResult};
use std::path::{Path, PathBuf};

/// File name preferred by the recursive search.
pub const MIGRATION_FILE_NAME: &str = "migration.sql";

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// A migration script read from disk.
#[derive(Debug, Clone)]
pub struct MigrationSource {
    /// Where the script was found
    pub path: PathBuf,
    /// Full file contents
    pub text: String,
}

/// Find the migration script under `root`.
pub fn discover_migration(root: &Path, candidates: &[String]) -> MigrateResult<PathBuf> {
    if !root.is_dir() {
        return Err(MigrateError::RepoNotFound {
            path: root.display().to_string(),
        });
    }

    for candidate in candidates {
        let path = root.join(candidate);
        if path.is_file() {
            log::info!("Found migration at candidate path {}", path.display());
            return Ok(path);
        }
    }
    log::debug!(
        "No candidate path matched under {}, searching for {}",
        root.display(),
        MIGRATION_FILE_NAME
    );

    if let Some(path) = find_first(root, &|p: &Path| {
        p.file_name().is_some_and(|n| n == MIGRATION_FILE_NAME)
    })? {
        log::info!("Found {} at {}", MIGRATION_FILE_NAME, path.display());
        return Ok(path);
    }

    if let Some(path) = find_first(root, &|p: &Path| p.extension().is_some_and(|e| e == "sql"))? {
        log::info!("Using first SQL file found: {}", path.display());
        return Ok(path);
    }

    Err(MigrateError::NoMigrationFound {
        root: root.display().to_string(),
    })
}

/// Discover the migration script and read it.
pub fn load_migration(root: &Path, candidates: &[String]) -> MigrateResult<MigrationSource> {
    let path = discover_migration(root, candidates)?;
    let text = std::fs::read_to_string(&path).map_err(|e| MigrateError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(MigrationSource { path, text })
}

/// Depth-first search for the first file accepted by `matches`.
///
/// Symlinked directories are not followed.
fn find_first(dir: &Path, matches: &dyn Fn(&Path) -> bool) -> MigrateResult<Option<PathBuf>> {
    let io_err = |e| MigrateError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    };
    let mut entries = std::fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_err)?;
        if file_type.is_dir() {
            if SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip) {
                continue;
            }
            if let Some(found) = find_first(&path, matches)? {
                return Ok(Some(found));
            }
        } else if matches(&path) && path.is_file() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
