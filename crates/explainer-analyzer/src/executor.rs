//! Query executor
//!
//! The analyzers only ever issue five kinds of statements. [`QueryExecutor`]
//! exposes exactly those, so tests can answer them from memory while
//! [`ConnectionExecutor`] sends them to a real database through a
//! [`Connection`].

use std::sync::Arc;

use async_trait::async_trait;
use explainer_core::{Connection, Result};

use crate::decode;
use crate::explain::PlanRow;
use crate::query::QueryModel;
use crate::table::{ColumnEntry, IndexEntry};

/// The statements the analyzers need from a database
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs `EXPLAIN <sql>` with the query's bindings and decodes the first
    /// row. `None` when the engine returned no row.
    async fn explain(&self, query: &QueryModel) -> Result<Option<PlanRow>>;

    /// `SELECT COUNT(*) FROM <table>`
    async fn count_rows(&self, table: &str) -> Result<u64>;

    /// `SHOW INDEX FROM <table>`
    async fn show_indexes(&self, table: &str) -> Result<Vec<IndexEntry>>;

    /// `SHOW COLUMNS FROM <table>`, restricted to string columns
    async fn show_columns(&self, table: &str) -> Result<Vec<ColumnEntry>>;

    /// `SELECT MAX(LENGTH(<column>)) FROM <table>`. `None` when the table is
    /// empty.
    async fn max_length(&self, table: &str, column: &str) -> Result<Option<u64>>;
}

/// Runs the analyzer statements over a database connection.
///
/// Table and column names are interpolated as-is; they come from the query
/// log or the command line, never from bindings.
pub struct ConnectionExecutor {
    connection: Arc<dyn Connection>,
}

impl ConnectionExecutor {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }
}

#[async_trait]
impl QueryExecutor for ConnectionExecutor {
    async fn explain(&self, query: &QueryModel) -> Result<Option<PlanRow>> {
        let result = self
            .connection
            .query(&query.as_explain(), query.bindings())
            .await?;
        tracing::debug!(
            driver = self.connection.driver_name(),
            elapsed_ms = result.execution_time_ms,
            "explained {}",
            query.sql()
        );

        result
            .first()
            .map(|row| PlanRow::from_row(query.clone(), row))
            .transpose()
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        let sql = format!("select count(*) from {table}");
        let result = self.connection.query(&sql, &[]).await?;

        let count = result
            .first()
            .and_then(|row| row.get(0))
            .and_then(decode::unsigned)
            .unwrap_or(0);
        tracing::debug!(table, count, "counted rows");
        Ok(count)
    }

    async fn show_indexes(&self, table: &str) -> Result<Vec<IndexEntry>> {
        let sql = format!("show index from {table}");
        let result = self.connection.query(&sql, &[]).await?;

        result.rows.iter().map(IndexEntry::from_row).collect()
    }

    async fn show_columns(&self, table: &str) -> Result<Vec<ColumnEntry>> {
        let sql = format!("show columns from {table}");
        let result = self.connection.query(&sql, &[]).await?;

        let mut columns = Vec::new();
        for row in &result.rows {
            let column = ColumnEntry::from_row(row)?;
            if column.is_string() {
                columns.push(column);
            }
        }
        Ok(columns)
    }

    async fn max_length(&self, table: &str, column: &str) -> Result<Option<u64>> {
        let sql = format!("select max(length({column})) from {table}");
        let result = self.connection.query(&sql, &[]).await?;

        Ok(result
            .first()
            .and_then(|row| row.get(0))
            .and_then(decode::unsigned))
    }
}

#[cfg(test)]
mod tests;
