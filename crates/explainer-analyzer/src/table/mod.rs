//! Table structure analysis
//!
//! Grades a table from its index and column metadata:
//! - composite indexes whose columns are not ordered by cardinality
//! - string columns in non-FULLTEXT indexes
//! - `longtext` columns whose data would fit a smaller type

use explainer_core::ExplainerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grade::{Grade, Graded};

pub mod analyzer;
pub mod metadata;

pub use analyzer::analyze;
pub use metadata::{ColumnEntry, IndexEntry};

/// Errors that abort a table analysis
#[derive(Debug, Error)]
pub enum TableAnalysisError {
    #[error("failed to read {what} of table {table}: {source}")]
    Metadata {
        table: String,
        what: &'static str,
        #[source]
        source: ExplainerError,
    },
}

/// The graded structure of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub composite_index_warnings: Vec<String>,
    pub string_index_warning: Option<String>,
    pub oversized_text_warning: Option<String>,
    pub grade: Grade,
}

impl TableReport {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            composite_index_warnings: Vec::new(),
            string_index_warning: None,
            oversized_text_warning: None,
            grade: Grade::best(),
        }
    }

    pub fn has_problems(&self) -> bool {
        !self.composite_index_warnings.is_empty()
            || self.string_index_warning.is_some()
            || self.oversized_text_warning.is_some()
    }
}

impl Graded for TableReport {
    fn grade(&self) -> Grade {
        self.grade
    }
}

impl std::fmt::Display for TableReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Table: {}", self.table)?;
        writeln!(f, "Grade: {}", self.grade)?;

        if !self.composite_index_warnings.is_empty() {
            writeln!(f, "Composite index problems:")?;
            for warning in &self.composite_index_warnings {
                write!(f, "- {warning}")?;
            }
        }
        if let Some(warning) = &self.string_index_warning {
            writeln!(f, "String-based index problems:")?;
            write!(f, "{warning}")?;
        }
        if let Some(warning) = &self.oversized_text_warning {
            writeln!(f, "Too long text columns:")?;
            write!(f, "{warning}")?;
        }

        if !self.has_problems() {
            write!(f, "No problems found")?;
        }
        Ok(())
    }
}
