//! EXPLAIN plans
//!
//! - [`plan`]: the decoded plan row and its access type
//! - [`runner`]: runs EXPLAIN for a batch of statements with per-query
//!   failure isolation

pub mod plan;
pub mod runner;

pub use plan::{AccessType, EXPLAIN_COLUMNS, EXPLAIN_COLUMNS_LEGACY, PlanRow};
pub use runner::{ExplainBatch, QueryExecutionError, ResourceExhaustedError, explain_all};
