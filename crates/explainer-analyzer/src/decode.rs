//! Lenient scalar decoding for positional result rows.
//!
//! Text-protocol results arrive as strings or raw bytes even for numeric
//! columns, so every accessor falls back to parsing the textual form.

use explainer_core::{ExplainerError, Result, Row, Value};

pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn signed(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| text(value).and_then(|s| s.trim().parse().ok()))
}

pub(crate) fn unsigned(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| text(value).and_then(|s| s.trim().parse().ok()))
}

pub(crate) fn float(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| text(value).and_then(|s| s.trim().parse().ok()))
}

/// Fails when `row` has fewer than `expected` columns
pub(crate) fn require_columns(row: &Row, expected: usize, what: &str) -> Result<()> {
    if row.len() < expected {
        return Err(ExplainerError::Decode(format!(
            "{what} row has {} columns, expected at least {expected}",
            row.len()
        )));
    }
    Ok(())
}

/// Reads a non-null text column
pub(crate) fn required_text(row: &Row, index: usize, what: &str) -> Result<String> {
    text(row.get_or_null(index)).ok_or_else(|| {
        let column = row.column_name(index).unwrap_or("?");
        ExplainerError::Decode(format!("{what}: column {index} ({column}) is NULL"))
    })
}
