//! EXPLAIN plan rows
//!
//! MySQL's traditional EXPLAIN output is one row per accessed table. Only
//! the first row of a statement is graded. Every column may be NULL, so each
//! field is an `Option` with a documented default for the rules.

use explainer_core::{Result, Row, Value};
use serde::{Deserialize, Serialize};

use crate::decode;
use crate::query::QueryModel;

/// Number of EXPLAIN columns without the `partitions` column (MySQL < 5.7)
pub const EXPLAIN_COLUMNS_LEGACY: usize = 11;

/// Number of EXPLAIN columns with the `partitions` column
pub const EXPLAIN_COLUMNS: usize = 12;

/// Row retrieval strategy chosen by the planner (`type` column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessType {
    /// Full table scan
    All,
    /// Full scan of an index tree
    Index,
    /// Index range scan
    Range,
    /// Non-unique index lookup
    Ref,
    /// Unique index lookup per joined row
    EqRef,
    /// At most one matching row, read once
    Const,
    /// Table with a single row
    System,
    /// Anything else (`fulltext`, `index_merge`, ...), lowercased
    Other(String),
}

impl AccessType {
    /// Parses an access type, ignoring case
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "all" => Self::All,
            "index" => Self::Index,
            "range" => Self::Range,
            "ref" => Self::Ref,
            "eq_ref" => Self::EqRef,
            "const" => Self::Const,
            "system" => Self::System,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "ALL",
            Self::Index => "index",
            Self::Range => "range",
            Self::Ref => "ref",
            Self::EqRef => "eq_ref",
            Self::Const => "const",
            Self::System => "system",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AccessType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<AccessType> for String {
    fn from(access_type: AccessType) -> Self {
        access_type.as_str().to_string()
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if a column value looks like an access type. Used to tell
/// the `partitions` column apart from `type`.
fn is_access_type(value: &Value) -> bool {
    decode::text(value).is_some_and(|s| {
        matches!(
            s.to_lowercase().as_str(),
            "all" | "index" | "range" | "ref" | "eq_ref" | "const" | "system" | "null" | "fulltext"
        )
    })
}

/// One EXPLAIN output row bound to the statement that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    pub query: QueryModel,
    pub id: Option<i64>,
    pub select_type: Option<String>,
    pub table: Option<String>,
    pub partitions: Option<String>,
    pub access_type: Option<AccessType>,
    pub possible_keys: Option<String>,
    pub key: Option<String>,
    pub key_len: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub rows: Option<u64>,
    pub filtered: Option<f64>,
    pub extra: Option<String>,
}

impl PlanRow {
    /// Creates an empty plan row, every column NULL
    pub fn new(query: QueryModel) -> Self {
        Self {
            query,
            id: None,
            select_type: None,
            table: None,
            partitions: None,
            access_type: None,
            possible_keys: None,
            key: None,
            key_len: None,
            reference: None,
            rows: None,
            filtered: None,
            extra: None,
        }
    }

    /// Decodes a positional EXPLAIN row.
    ///
    /// Accepts the 12-column layout and the 11-column layout without
    /// `partitions`.
    pub fn from_row(query: QueryModel, row: &Row) -> Result<Self> {
        decode::require_columns(row, EXPLAIN_COLUMNS_LEGACY, "EXPLAIN")?;

        let has_partitions = row.len() >= EXPLAIN_COLUMNS && !is_access_type(row.get_or_null(3));
        let offset = usize::from(has_partitions);
        let col = |index: usize| row.get_or_null(index);

        Ok(Self {
            query,
            id: decode::signed(col(0)),
            select_type: decode::text(col(1)),
            table: decode::text(col(2)),
            partitions: if has_partitions {
                decode::text(col(3))
            } else {
                None
            },
            access_type: decode::text(col(3 + offset)).map(|s| AccessType::parse(&s)),
            possible_keys: decode::text(col(4 + offset)),
            key: decode::text(col(5 + offset)),
            key_len: decode::text(col(6 + offset)),
            reference: decode::text(col(7 + offset)),
            rows: decode::unsigned(col(8 + offset)),
            filtered: decode::float(col(9 + offset)),
            extra: decode::text(col(10 + offset)),
        })
    }

    pub fn with_access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = Some(access_type);
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_filtered(mut self, filtered: f64) -> Self {
        self.filtered = Some(filtered);
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Filtered percentage, 100 when NULL
    pub fn filtered_or_default(&self) -> f64 {
        self.filtered.unwrap_or(100.0)
    }

    /// Estimated rows, 0 when NULL
    pub fn rows_or_default(&self) -> u64 {
        self.rows.unwrap_or(0)
    }

    /// The `Extra` column, empty when NULL
    pub fn extra_or_default(&self) -> &str {
        self.extra.as_deref().unwrap_or("")
    }

    pub fn using_index(&self) -> bool {
        self.extra_or_default().contains("Using index")
    }

    pub fn using_filesort(&self) -> bool {
        self.extra_or_default().contains("Using filesort")
    }

    pub fn using_temporary(&self) -> bool {
        self.extra_or_default().contains("Using temporary")
    }
}
