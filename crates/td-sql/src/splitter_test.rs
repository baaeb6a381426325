use super::*;

fn texts(sql: &str) -> Vec<String> {
    split(sql).into_iter().map(Statement::into_inner).collect()
}

#[test]
fn test_two_statements_with_comment() {
    assert_eq!(
        texts("CREATE TABLE t (id INT);\n-- comment\nCREATE TABLE u (id INT)"),
        vec!["CREATE TABLE t (id INT)", "CREATE TABLE u (id INT)"]
    );
}

#[test]
fn test_empty_input() {
    assert!(split("").is_empty());
    assert!(split("\n\n   \n").is_empty());
    assert!(split("-- only a comment\n/* and another */").is_empty());
}

#[test]
fn test_multiline_statement_joined_with_spaces() {
    let sql = "CREATE TABLE users (\n    id   INT PRIMARY KEY,\n    name TEXT NOT NULL\n);\n";
    assert_eq!(
        texts(sql),
        vec!["CREATE TABLE users ( id   INT PRIMARY KEY, name TEXT NOT NULL )"]
    );
}

#[test]
fn test_comment_lines_inside_statement_dropped() {
    let sql = "CREATE TABLE t (\n  -- the key\n  id INT\n  /* trailing */\n);";
    assert_eq!(texts(sql), vec!["CREATE TABLE t ( id INT )"]);
}

#[test]
fn test_terminator_only_line_closes_statement() {
    assert_eq!(texts("SELECT 1\n;\nSELECT 2;"), vec!["SELECT 1", "SELECT 2"]);
}

#[test]
fn test_lone_terminators_produce_nothing() {
    assert_eq!(texts(";\n  ;  \nSELECT 1;"), vec!["SELECT 1"]);
}

#[test]
fn test_only_one_terminator_stripped() {
    assert_eq!(texts("SELECT 1;;"), vec!["SELECT 1;"]);
}

#[test]
fn test_mid_line_terminator_is_not_a_boundary() {
    // Only line endings are checked.
    assert_eq!(texts("SELECT 1; SELECT 2;"), vec!["SELECT 1; SELECT 2"]);
}

#[test]
fn test_trailing_unterminated_statement_kept() {
    assert_eq!(
        texts("INSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2)"),
        vec!["INSERT INTO t VALUES (1)", "INSERT INTO t VALUES (2)"]
    );
}

#[test]
fn test_crlf_line_endings() {
    assert_eq!(
        texts("SELECT 1;\r\n-- c\r\nSELECT 2;\r\n"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_terminator_inside_function_body_splits() {
    // Known limitation: line-ending terminators inside $$ bodies are boundaries.
    let sql = "CREATE FUNCTION f() RETURNS INT AS $$\nBEGIN\n  RETURN 1;\nEND;\n$$ LANGUAGE plpgsql;";
    assert_eq!(
        texts(sql),
        vec![
            "CREATE FUNCTION f() RETURNS INT AS $$ BEGIN RETURN 1",
            "END",
            "$$ LANGUAGE plpgsql",
        ]
    );
}

#[test]
fn test_comment_marker_inside_string_is_kept() {
    // Known limitation: only line-leading markers are recognised.
    assert_eq!(
        texts("INSERT INTO t VALUES ('a -- b');"),
        vec!["INSERT INTO t VALUES ('a -- b')"]
    );
}

#[test]
fn test_count_matches_terminated_lines() {
    let sql = "\
-- schema for quiz app
CREATE TABLE users (id uuid PRIMARY KEY);
CREATE TABLE quizzes (
  id SERIAL PRIMARY KEY,
  owner uuid REFERENCES users(id)
);

/* seed */
INSERT INTO quizzes (owner) SELECT id FROM users;
ALTER TABLE quizzes ADD COLUMN title TEXT";
    let statements = split(sql);
    let terminated = sql
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("--") && !l.starts_with("/*"))
        .filter(|l| l.ends_with(';'))
        .count();
    assert_eq!(statements.len(), terminated + 1);
    assert!(statements.iter().all(|s| !s.as_str().trim().is_empty()));
    assert!(statements[1].as_str().starts_with("CREATE TABLE quizzes ("));
}
