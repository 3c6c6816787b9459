//! Connection trait

use crate::{QueryResult, Result, Value};
use async_trait::async_trait;

/// A database connection
///
/// Only read access is needed: every statement the analyzers issue is an
/// `EXPLAIN`, a `SHOW` or an aggregate `SELECT`.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows, binding `params` to the `?`
    /// placeholders in order
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;
}
