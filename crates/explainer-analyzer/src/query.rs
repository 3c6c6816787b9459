//! Reconstructed SQL statements
//!
//! A [`QueryModel`] is one unique statement recovered from a log file, with
//! its positional bindings split off. The predicates below are shallow text
//! scans; keywords inside string literals or comments are matched too.

use explainer_core::Value;
use serde::{Deserialize, Serialize};

/// One reconstructed SQL statement and its positional binding values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryModel {
    sql: String,
    bindings: Vec<Value>,
}

impl QueryModel {
    /// Creates a statement without bindings
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }

    /// Creates a statement with raw string bindings, as they appear in a log
    pub fn with_bindings<I, S>(sql: impl Into<String>, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sql: sql.into(),
            bindings: bindings
                .into_iter()
                .map(|b| Value::String(b.into()))
                .collect(),
        }
    }

    /// The statement text, without the binding suffix
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Positional binding values
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// The statement prefixed with `EXPLAIN`
    pub fn as_explain(&self) -> String {
        format!("EXPLAIN {}", self.sql)
    }

    /// Returns true if the statement selects every column
    pub fn has_select_star(&self) -> bool {
        self.sql.to_ascii_lowercase().contains("select *")
    }

    /// Returns true if the statement uses `LIKE` and a string binding carries
    /// a `%` wildcard
    pub fn has_like_pattern(&self) -> bool {
        if !self.sql.to_ascii_lowercase().contains("like") {
            return false;
        }
        self.bindings
            .iter()
            .filter_map(Value::as_str)
            .any(|b| b.contains('%'))
    }

    /// Returns true if a `select` appears between the leading `select` and
    /// the first `from`, i.e. a subquery sits in the select list
    pub fn has_subquery_in_select(&self) -> bool {
        let lower = self.sql.to_ascii_lowercase();
        let Some(select_idx) = lower.find("select") else {
            return false;
        };
        let select_list = &lower[select_idx + "select".len()..];
        let Some(from_idx) = select_list.find("from") else {
            return false;
        };
        select_list[..from_idx].contains("select")
    }

    /// Names following each `join ` keyword, in statement order.
    ///
    /// The keyword is matched case-insensitively and the name, the token up
    /// to the next space, keeps its original case. A trailing `join` with
    /// nothing after it ends the scan.
    pub fn joined_tables(&self) -> Vec<String> {
        const JOIN: &str = "join ";

        // ASCII lowercasing keeps byte offsets aligned with `self.sql`.
        let lower = self.sql.to_ascii_lowercase();
        let mut offset = 0;
        let mut tables = Vec::new();

        while let Some(found) = lower[offset..].find(JOIN) {
            let start = offset + found + JOIN.len();
            let Some(len) = lower[start..].find(' ') else {
                break;
            };
            tables.push(self.sql[start..start + len].to_string());
            offset = start;
        }

        tables
    }
}

impl std::fmt::Display for QueryModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
