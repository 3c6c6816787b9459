//! SHOW INDEX / SHOW COLUMNS rows

use explainer_core::{ExplainerError, Result, Row};
use serde::{Deserialize, Serialize};

use crate::decode;

// SHOW INDEX FROM positions
const INDEX_KEY_NAME: usize = 2;
const INDEX_SEQ_IN_INDEX: usize = 3;
const INDEX_COLUMN_NAME: usize = 4;
const INDEX_CARDINALITY: usize = 6;
const INDEX_TYPE: usize = 10;

// SHOW COLUMNS FROM positions
const COLUMN_FIELD: usize = 0;
const COLUMN_TYPE: usize = 1;
const COLUMN_KEY: usize = 3;

/// Text types that are always treated as string columns
const TEXT_TYPES: [&str; 3] = ["tinytext", "mediumtext", "longtext"];

/// One (index, column) pair of a table's index metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key_name: String,
    pub index_type: String,
    pub seq_in_index: u32,
    pub column: String,
    pub cardinality: u64,
}

impl IndexEntry {
    pub fn new(key_name: impl Into<String>, column: impl Into<String>, seq_in_index: u32) -> Self {
        Self {
            key_name: key_name.into(),
            index_type: "BTREE".to_string(),
            seq_in_index,
            column: column.into(),
            cardinality: 0,
        }
    }

    pub fn with_cardinality(mut self, cardinality: u64) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn with_index_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = index_type.into();
        self
    }

    /// Decodes a positional `SHOW INDEX` row. A NULL cardinality (statistics
    /// not collected yet) reads as 0.
    pub fn from_row(row: &Row) -> Result<Self> {
        decode::require_columns(row, INDEX_TYPE + 1, "SHOW INDEX")?;

        let seq = decode::unsigned(row.get_or_null(INDEX_SEQ_IN_INDEX))
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(|| ExplainerError::Decode("SHOW INDEX: invalid Seq_in_index".into()))?;

        Ok(Self {
            key_name: decode::required_text(row, INDEX_KEY_NAME, "SHOW INDEX Key_name")?,
            index_type: decode::required_text(row, INDEX_TYPE, "SHOW INDEX Index_type")?,
            seq_in_index: seq,
            column: decode::text(row.get_or_null(INDEX_COLUMN_NAME)).unwrap_or_default(),
            cardinality: decode::unsigned(row.get_or_null(INDEX_CARDINALITY)).unwrap_or(0),
        })
    }

    pub fn is_fulltext(&self) -> bool {
        self.index_type.eq_ignore_ascii_case("FULLTEXT")
    }
}

/// One column of a table, as reported by `SHOW COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub name: String,
    pub data_type: String,
    pub key: String,
}

impl ColumnEntry {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            key: String::new(),
        }
    }

    /// Decodes a positional `SHOW COLUMNS` row
    pub fn from_row(row: &Row) -> Result<Self> {
        decode::require_columns(row, COLUMN_KEY + 1, "SHOW COLUMNS")?;

        Ok(Self {
            name: decode::required_text(row, COLUMN_FIELD, "SHOW COLUMNS Field")?,
            data_type: decode::required_text(row, COLUMN_TYPE, "SHOW COLUMNS Type")?,
            key: decode::text(row.get_or_null(COLUMN_KEY)).unwrap_or_default(),
        })
    }

    /// Returns true for `varchar(n)`, `tinytext`, `mediumtext` and `longtext`
    pub fn is_string(&self) -> bool {
        self.data_type.contains("varchar") || TEXT_TYPES.contains(&self.data_type.as_str())
    }

    pub fn is_longtext(&self) -> bool {
        self.data_type == "longtext"
    }
}
