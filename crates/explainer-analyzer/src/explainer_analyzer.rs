//! Explainer Analyzer - turns query logs and table metadata into graded reports
//!
//! This crate provides functionality for:
//! - Reconstructing unique parameterized SELECT statements from application logs
//! - Running EXPLAIN for each statement through a [`QueryExecutor`]
//! - Grading each plan with a fixed chain of heuristic rules
//! - Grading a table's index and column structure
//!
//! The heuristics approximate MySQL's planner behaviour by scanning SQL text;
//! they are not a SQL parser.

mod decode;
pub mod executor;
pub mod explain;
pub mod grade;
pub mod grading;
pub mod log_parser;
pub mod query;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use executor::{ConnectionExecutor, QueryExecutor};
pub use explain::{
    AccessType, ExplainBatch, PlanRow, QueryExecutionError, ResourceExhaustedError, explain_all,
};
pub use grade::{Grade, Graded};
pub use grading::{QueryReport, Rule, grade, grade_all};
pub use log_parser::{ParseError, parse_file, parse_lines};
pub use query::QueryModel;
pub use table::{ColumnEntry, IndexEntry, TableAnalysisError, TableReport, analyze};
