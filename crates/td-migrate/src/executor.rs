//! Best-effort statement executor.
//!
//! Every statement runs in its own transaction: committed on success, rolled
//! back on failure. A failed statement is recorded and the next one is
//! attempted, so a migration with one broken statement still applies the
//! rest. Results line up one-to-one with the input statements.

use crate::error::StatementError;
use serde::Serialize;
use td_db::{DbError, MigrationConnection};
use td_sql::Statement;

/// Characters of statement text included in log lines.
const LOG_PREVIEW_CHARS: usize = 120;

/// Outcome details of a committed statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSuccess {
    /// For `CREATE TABLE` statements: whether a catalog lookup found the
    /// table afterwards. `None` for other statements or when the lookup failed.
    pub table_confirmed: Option<bool>,
}

/// Result of applying one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Statement committed
    Succeeded(StatementSuccess),
    /// Statement failed and was rolled back
    Failed(StatementError),
}

impl ExecutionResult {
    /// View the outcome as a `Result`.
    pub fn as_result(&self) -> Result<&StatementSuccess, &StatementError> {
        match self {
            ExecutionResult::Succeeded(success) => Ok(success),
            ExecutionResult::Failed(err) => Err(err),
        }
    }

    /// Whether the statement committed.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Succeeded(_))
    }
}

impl From<Result<StatementSuccess, StatementError>> for ExecutionResult {
    fn from(result: Result<StatementSuccess, StatementError>) -> Self {
        match result {
            Ok(success) => ExecutionResult::Succeeded(success),
            Err(err) => ExecutionResult::Failed(err),
        }
    }
}

/// Per-statement results of one execution, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionReport {
    succeeded: usize,
    results: Vec<ExecutionResult>,
}

impl ExecutionReport {
    fn record(&mut self, result: ExecutionResult) {
        if result.is_success() {
            self.succeeded += 1;
        }
        self.results.push(result);
    }

    /// Results, one per input statement.
    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    /// Number of committed statements.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of failed statements.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded
    }

    /// Number of statements attempted.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Errors of the failed statements, in order.
    pub fn failures(&self) -> impl Iterator<Item = &StatementError> {
        self.results.iter().filter_map(|r| r.as_result().err())
    }

    /// "N of M statements succeeded"
    pub fn summary(&self) -> String {
        format!(
            "{} of {} statements succeeded",
            self.succeeded(),
            self.total()
        )
    }
}

/// Apply `statements` in order, one transaction each, never stopping early.
pub fn execute<C>(conn: &mut C, statements: &[Statement]) -> ExecutionReport
where
    C: MigrationConnection + ?Sized,
{
    let total = statements.len();
    let mut report = ExecutionReport::default();

    for (index, statement) in statements.iter().enumerate() {
        log::debug!(
            "[{}/{}] {}",
            index + 1,
            total,
            statement.preview(LOG_PREVIEW_CHARS)
        );

        let result = match apply_statement(conn, index, statement) {
            Ok(()) => Ok(StatementSuccess {
                table_confirmed: confirm_created_table(conn, statement),
            }),
            Err(e) => {
                let err = StatementError {
                    index,
                    statement: statement.as_str().to_string(),
                    message: e.detail().to_string(),
                };
                log::warn!(
                    "{err} (rolled back, continuing)\n  statement: {}",
                    statement.preview(LOG_PREVIEW_CHARS)
                );
                Err(err)
            }
        };
        report.record(result.into());
    }

    log::info!("{}", report.summary());
    report
}

/// BEGIN, run, COMMIT; ROLLBACK if the statement or the commit fails.
fn apply_statement<C>(conn: &mut C, index: usize, statement: &Statement) -> Result<(), DbError>
where
    C: MigrationConnection + ?Sized,
{
    conn.begin()?;

    let outcome = conn
        .execute(statement.as_str())
        .and_then(|()| conn.commit());

    if outcome.is_err() {
        if let Err(rollback_err) = conn.rollback() {
            log::warn!(
                "Rollback after statement {} failed: {rollback_err}",
                index + 1
            );
        }
    }
    outcome
}

/// Look up the table a successful `CREATE TABLE` should have produced.
///
/// Observational only: the answer is logged and reported, never enforced.
/// Temporary tables are not looked up.
fn confirm_created_table<C>(conn: &mut C, statement: &Statement) -> Option<bool>
where
    C: MigrationConnection + ?Sized,
{
    let table = statement.created_table()?;
    if table.temporary {
        // session-private schema, not visible under the default one
        log::debug!("Skipping catalog check for temporary table {}", table.name);
        return None;
    }
    let schema = table
        .schema
        .clone()
        .unwrap_or_else(|| conn.default_schema().to_string());

    match conn.table_exists(&schema, &table.name) {
        Ok(true) => {
            log::info!("Table {schema}.{} created", table.name);
            Some(true)
        }
        Ok(false) => {
            log::warn!(
                "CREATE TABLE succeeded but {schema}.{} is not in the catalog",
                table.name
            );
            Some(false)
        }
        Err(e) => {
            log::warn!("Could not confirm table {schema}.{}: {e}", table.name);
            None
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
