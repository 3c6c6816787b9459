//! Core types for explainer

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A database value that can represent any scalar SQL type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// Decimal/Numeric (stored as string for precision)
    Decimal(String),
    /// UTF-8 string
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Date (year, month, day)
    Date(NaiveDate),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
}

impl Value {
    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::String(s) | Value::Decimal(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Try to get as u64, rejecting negative numbers
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::String(s) | Value::Decimal(s) => s.trim().parse::<u64>().ok(),
            other => other.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            Value::String(s) | Value::Decimal(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Date(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
        }
    }
}

/// A row from a query result
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values
    pub values: Vec<Value>,
    /// Column names
    columns: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column index, treating a missing column as NULL
    pub fn get_or_null(&self, index: usize) -> &Value {
        const NULL: Value = Value::Null;
        self.values.get(index).unwrap_or(&NULL)
    }

    /// Name of the column at `index`
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Number of values in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ColumnMeta {
    /// Column name
    #[serde(default)]
    pub name: String,
    /// Data type (database-specific string)
    #[serde(default)]
    pub data_type: String,
    /// Column ordinal position (0-based)
    #[serde(default)]
    pub ordinal: usize,
}

/// Query result
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column metadata
    pub columns: Vec<ColumnMeta>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from column names and positional rows
    pub fn from_rows(column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let names: Vec<String> = column_names.iter().map(|c| c.to_string()).collect();
        let columns = names
            .iter()
            .enumerate()
            .map(|(ordinal, name)| ColumnMeta {
                name: name.clone(),
                data_type: String::new(),
                ordinal,
            })
            .collect();
        let rows = rows
            .into_iter()
            .map(|values| Row::new(names.clone(), values))
            .collect();
        Self {
            columns,
            rows,
            execution_time_ms: 0,
        }
    }

    /// Get the first row, if any
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(Value::String("42".into()).as_i64(), Some(42));
        assert_eq!(Value::Decimal("33.33".into()).as_f64(), Some(33.33));
        assert_eq!(Value::Int64(-1).as_u64(), None);
        assert_eq!(Value::String("17".into()).as_u64(), Some(17));
        assert_eq!(Value::Int64(10).as_f64(), Some(10.0));
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_row_access() {
        let result = QueryResult::from_rows(
            &["Field", "Type"],
            vec![vec![Value::String("name".into()), Value::String("varchar(255)".into())]],
        );
        let row = result.first().unwrap();

        assert_eq!(result.columns.len(), 2);
        assert_eq!(row.get(1).and_then(|v| v.as_str()), Some("varchar(255)"));
        assert_eq!(row.column_name(0), Some("Field"));
        assert_eq!(row.column_name(2), None);
        assert_eq!(row.get_or_null(7), &Value::Null);
    }
}
