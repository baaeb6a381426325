//! Statement and table reference types.

use serde::Serialize;
use std::fmt;

/// One executable SQL statement, trimmed, without its trailing terminator.
///
/// Never empty. The executor treats the text as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    /// Wrap statement text, returning `None` when it is blank.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == text.len() {
            Some(Self(text))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Return the statement text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The table created by this statement, if it is a `CREATE TABLE`.
    ///
    /// Recognises `CREATE [OR REPLACE] [TEMP | TEMPORARY | UNLOGGED] TABLE
    /// [IF NOT EXISTS] name`. Unquoted identifiers are folded to lower case
    /// the way PostgreSQL stores them; quoted identifiers are kept verbatim.
    pub fn created_table(&self) -> Option<TableRef> {
        let (rest, temporary) = table_name_start(&self.0)?;
        let (schema, name) = parse_qualified_name(rest)?;
        Some(TableRef {
            schema,
            name,
            temporary,
        })
    }

    /// First `len` characters of the statement, for log lines.
    pub fn preview(&self, len: usize) -> String {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => format!("{}...", &self.0[..idx]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A possibly schema-qualified table name taken from statement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    /// Schema qualifier, if the statement named one
    pub schema: Option<String>,
    /// Table name as the catalog stores it
    pub name: String,
    /// `TEMP`/`TEMPORARY` table, which lives in a session-private schema
    pub temporary: bool,
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Return the text right after the `CREATE ... TABLE [IF NOT EXISTS]` prefix,
/// and whether the table is temporary.
fn table_name_start(sql: &str) -> Option<(&str, bool)> {
    let mut rest = strip_keyword(sql, "CREATE")?;
    if let Some(r) = strip_keyword(rest, "OR").and_then(|r| strip_keyword(r, "REPLACE")) {
        rest = r;
    }
    let mut temporary = false;
    for modifier in ["TEMPORARY", "TEMP", "UNLOGGED"] {
        if let Some(r) = strip_keyword(rest, modifier) {
            rest = r;
            temporary = modifier != "UNLOGGED";
            break;
        }
    }
    rest = strip_keyword(rest, "TABLE")?;
    if let Some(r) = strip_keyword(rest, "IF")
        .and_then(|r| strip_keyword(r, "NOT"))
        .and_then(|r| strip_keyword(r, "EXISTS"))
    {
        rest = r;
    }
    Some((rest.trim_start(), temporary))
}

/// Strip a leading case-insensitive keyword followed by whitespace or end of input.
fn strip_keyword<'a>(sql: &'a str, keyword: &str) -> Option<&'a str> {
    let sql = sql.trim_start();
    let head = sql.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &sql[keyword.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}

/// Parse `name`, `schema.name` or their double-quoted forms into
/// `(schema, name)`.
fn parse_qualified_name(text: &str) -> Option<(Option<String>, String)> {
    let mut parts = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        let part = if chars.peek() == Some(&'"') {
            chars.next();
            let mut ident = String::new();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        ident.push('"');
                    }
                    Some('"') => break,
                    Some(c) => ident.push(c),
                    None => return None,
                }
            }
            ident
        } else {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' || c == '$' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            ident.to_lowercase()
        };

        if part.is_empty() {
            return None;
        }
        parts.push(part);

        if chars.peek() == Some(&'.') {
            chars.next();
        } else {
            break;
        }
    }

    let name = parts.pop()?;
    Some((parts.pop(), name))
}

#[cfg(test)]
#[path = "statement_test.rs"]
mod tests;
