//! Batch EXPLAIN runner
//!
//! Statements are explained one at a time. A failing statement is logged
//! and skipped. The only error that stops the batch is the server refusing
//! new connections; the plans gathered up to that point are still returned.

use explainer_core::{ExplainerError, Value};
use thiserror::Error;

use crate::executor::QueryExecutor;
use crate::explain::PlanRow;
use crate::query::QueryModel;

/// A statement whose EXPLAIN failed. Never fatal.
#[derive(Debug, Error)]
#[error("query {sql} with bindings {bindings:?} failed: {source}")]
pub struct QueryExecutionError {
    pub sql: String,
    pub bindings: Vec<Value>,
    #[source]
    pub source: ExplainerError,
}

impl QueryExecutionError {
    fn new(query: &QueryModel, source: ExplainerError) -> Self {
        Self {
            sql: query.sql().to_string(),
            bindings: query.bindings().to_vec(),
            source,
        }
    }
}

/// The server refused new connections part way through a batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "database returned a 'Too many connections' error after {processed} queries. \
     Please try again with a smaller log file or set a limit with the '--limit' option. \
     Last query: {sql}\n\
     To increase the limit temporarily run: \"SET GLOBAL max_connections = 255;\""
)]
pub struct ResourceExhaustedError {
    /// Statements attempted before the one that hit the limit
    pub processed: usize,
    /// The statement in flight when the limit was hit
    pub sql: String,
}

/// Outcome of explaining a batch of statements
#[derive(Debug, Default)]
pub struct ExplainBatch {
    /// Plans in input order
    pub plans: Vec<PlanRow>,
    /// Statements that failed and were skipped
    pub skipped: Vec<QueryExecutionError>,
    /// Set when the batch stopped early
    pub exhausted: Option<ResourceExhaustedError>,
}

impl ExplainBatch {
    pub fn is_complete(&self) -> bool {
        self.exhausted.is_none()
    }
}

/// Explains every statement in order
pub async fn explain_all(executor: &dyn QueryExecutor, queries: &[QueryModel]) -> ExplainBatch {
    let mut batch = ExplainBatch::default();

    for (i, query) in queries.iter().enumerate() {
        match executor.explain(query).await {
            Ok(Some(plan)) => batch.plans.push(plan),
            Ok(None) => {
                let err = QueryExecutionError::new(
                    query,
                    ExplainerError::NotFound("EXPLAIN returned an empty row".into()),
                );
                tracing::warn!(error = %err, "skipping query");
                batch.skipped.push(err);
            }
            Err(source) if source.is_too_many_connections() => {
                tracing::warn!(processed = i, sql = query.sql(), "database refused new connections");
                batch.exhausted = Some(ResourceExhaustedError {
                    processed: i,
                    sql: query.sql().to_string(),
                });
                break;
            }
            Err(source) => {
                let err = QueryExecutionError::new(query, source);
                tracing::warn!(error = %err, "skipping query");
                batch.skipped.push(err);
            }
        }
    }

    tracing::debug!(
        explained = batch.plans.len(),
        skipped = batch.skipped.len(),
        "explained batch"
    );
    batch
}
