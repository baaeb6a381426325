//! Migration engine for tenantdb.
//!
//! Applies a tenant's schema migration in three steps: the migration text is
//! split into statements ([`td_sql::split`]), each statement is applied in its
//! own transaction with failures recorded rather than raised
//! ([`executor::execute`]), and the resulting schema is read back from catalog
//! metadata ([`verify::verify`]). [`runner::run_migrations`] strings the steps
//! together for a tenant database and a repository checkout.

pub mod discovery;
pub mod error;
pub mod executor;
pub mod runner;
pub mod verify;

pub use discovery::{discover_migration, load_migration, MigrationSource};
pub use error::{MigrateError, MigrateResult, StatementError, VerificationError};
pub use executor::{execute, ExecutionReport, ExecutionResult, StatementSuccess};
pub use runner::{apply_migration, run_migrations, run_migrations_with, MigrationOptions, MigrationRun};
pub use verify::{verify, ExpectedTable, SchemaSnapshot, TableSnapshot};
