//! Query log parser
//!
//! Reconstructs the unique SELECT statements of an application log. Each
//! line goes through four stages:
//!
//! 1. lines containing an `insert`, `update` or `delete` word are dropped
//! 2. the text from the first `select` to the end of the line is kept
//! 3. a trailing `[v1,v2,...]` suffix is split off into positional bindings
//! 4. on lines with a binding suffix, the number of `?` placeholders must match
//!    the number of bindings
//!
//! Statements that only differ in their bound values collapse into one
//! [`QueryModel`].
//!
//! # Example
//!
//! ```
//! use explainer_analyzer::parse_lines;
//!
//! let log = [
//!     "[2024-12-13 20:06:25] local.INFO: select * from users where id = ? [100]",
//!     "[2024-12-13 20:06:26] local.INFO: select * from users where id = ? [200]",
//!     "[2024-12-13 20:06:27] local.INFO: insert into users (name) values (?) [john]",
//! ];
//! let queries = parse_lines(log).unwrap();
//! assert_eq!(queries.len(), 1);
//! assert_eq!(queries[0].sql(), "select * from users where id = ?");
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::query::QueryModel;

/// Words that mark a line as a write statement. Matched case-sensitively
/// against whole whitespace-separated tokens, so `INSERT` is not rejected.
const WRITE_COMMANDS: [&str; 3] = ["insert", "update", "delete"];

const SELECT: &str = "select";

/// Errors that abort parsing of a log
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line ends with ']' but has no '[' to open its bindings: {line}")]
    MalformedBindings { line: String },

    #[error("argument number mismatch: {placeholders} \"?\" and {bindings} bindings in query: {sql}")]
    BindingArity {
        sql: String,
        placeholders: usize,
        bindings: usize,
    },

    #[error("failed to read log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for log parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Reads and parses a log file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<QueryModel>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "read query log");
    parse_lines(content.lines())
}

/// Parses raw log lines into unique statements.
///
/// The first occurrence of a statement fixes its position in the output and
/// the last occurrence supplies its bindings.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<QueryModel>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: IndexMap<String, QueryModel> = IndexMap::new();
    let mut rejected = 0usize;

    for line in lines {
        let line = line.as_ref();
        if line.is_empty() {
            continue;
        }
        if is_write_command(line) {
            rejected += 1;
            continue;
        }
        let Some(text) = extract_select(line) else {
            continue;
        };

        let query = construct_query(text)?;
        unique.insert(query.sql().to_string(), query);
    }

    tracing::debug!(
        unique = unique.len(),
        rejected_writes = rejected,
        "parsed query log"
    );

    Ok(unique.into_values().collect())
}

fn is_write_command(line: &str) -> bool {
    line.split_whitespace()
        .any(|word| WRITE_COMMANDS.contains(&word))
}

fn extract_select(line: &str) -> Option<&str> {
    line.find(SELECT).map(|idx| line[idx..].trim())
}

fn has_bindings(text: &str) -> bool {
    text.ends_with(']')
}

fn construct_query(text: &str) -> Result<QueryModel> {
    // Without a binding suffix a `?` can only be literal text.
    if !has_bindings(text) {
        return Ok(QueryModel::new(text));
    }

    let open = text.rfind('[').ok_or_else(|| ParseError::MalformedBindings {
        line: text.to_string(),
    })?;
    let sql = text[..open].trim();
    let bindings = split_bindings(&text[open + 1..text.len() - 1]);

    check_arity(sql, bindings.len())?;
    Ok(QueryModel::with_bindings(sql, bindings))
}

/// Splits the inside of a `[...]` suffix. Values are kept raw, without
/// trimming, and cannot contain a comma.
fn split_bindings(inner: &str) -> Vec<&str> {
    if inner.is_empty() {
        return Vec::new();
    }
    if !inner.contains(',') {
        return vec![inner];
    }
    inner.split([',', ']']).collect()
}

fn check_arity(sql: &str, bindings: usize) -> Result<()> {
    let placeholders = sql.matches('?').count();
    if placeholders != bindings {
        return Err(ParseError::BindingArity {
            sql: sql.to_string(),
            placeholders,
            bindings,
        });
    }
    Ok(())
}
