//! Line-oriented migration statement splitter.

use crate::statement::Statement;

/// Statement terminator.
const TERMINATOR: char = ';';

/// Split migration text into executable statements, in source order.
///
/// Lines that are blank, or that start with `--` or `/*` once trimmed, are
/// dropped. Remaining lines are trimmed and joined with single spaces; every
/// line ending in `;` closes the current statement (the `;` is removed). A
/// trailing statement without a terminator is kept.
///
/// # Limitations
///
/// This is not a SQL tokenizer:
/// - comment markers are only recognised at the start of a line, so `--` or
///   `/*` inside a string literal or after code on the same line stay in the
///   statement text;
/// - a block comment spanning several lines only has its first line removed;
/// - a line ending in `;` always ends a statement, even inside a string
///   literal or a function body (`$$ ... $$`).
///
/// # Examples
/// ```
/// let stmts = td_sql::split("CREATE TABLE t (id INT);\n-- comment\nCREATE TABLE u (id INT)");
/// assert_eq!(stmts.len(), 2);
/// assert_eq!(stmts[0].as_str(), "CREATE TABLE t (id INT)");
/// assert_eq!(stmts[1].as_str(), "CREATE TABLE u (id INT)");
/// ```
pub fn split(text: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut buffer = String::new();

    for line in text.lines().map(str::trim) {
        if is_skipped(line) {
            continue;
        }

        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(line);

        if line.ends_with(TERMINATOR) {
            flush(&mut buffer, &mut statements);
        }
    }
    flush(&mut buffer, &mut statements);

    log::debug!("Split migration into {} statement(s)", statements.len());
    statements
}

/// Blank lines and lines opening a comment are not part of any statement.
fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with("--") || line.starts_with("/*")
}

/// Emit the buffered statement (if any) and reset the buffer.
fn flush(buffer: &mut String, statements: &mut Vec<Statement>) {
    let text = buffer.strip_suffix(TERMINATOR).unwrap_or(buffer.as_str()).trim();
    if let Some(statement) = Statement::new(text) {
        statements.push(statement);
    }
    buffer.clear();
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
