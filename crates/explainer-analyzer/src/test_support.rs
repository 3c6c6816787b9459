//! In-memory test doubles

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use explainer_core::{Connection, ExplainerError, QueryResult, Result, Value};

use crate::executor::QueryExecutor;
use crate::explain::PlanRow;
use crate::query::QueryModel;
use crate::table::{ColumnEntry, IndexEntry};

/// Canned answer for a statement
#[derive(Clone)]
pub enum Canned<T> {
    Ok(T),
    Fail(String),
    TooManyConnections,
}

impl<T: Clone> Canned<T> {
    fn answer(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(message) => Err(ExplainerError::Query(message.clone())),
            Self::TooManyConnections => Err(ExplainerError::TooManyConnections(
                "ERROR 1040 (08004): Too many connections".into(),
            )),
        }
    }
}

/// Answers the five analyzer statements from maps. Anything not configured
/// fails with a "doesn't exist" query error.
#[derive(Default)]
pub struct CannedExecutor {
    plans: HashMap<String, Canned<Option<PlanRow>>>,
    counts: HashMap<String, u64>,
    indexes: Option<Canned<Vec<IndexEntry>>>,
    columns: Option<Canned<Vec<ColumnEntry>>>,
    lengths: HashMap<String, Canned<Option<u64>>>,
    calls: Mutex<Vec<String>>,
}

impl CannedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, plan: PlanRow) -> Self {
        self.plans
            .insert(plan.query.sql().to_string(), Canned::Ok(Some(plan)));
        self
    }

    pub fn with_explain(mut self, sql: &str, answer: Canned<Option<PlanRow>>) -> Self {
        self.plans.insert(sql.to_string(), answer);
        self
    }

    pub fn with_count(mut self, table: &str, count: u64) -> Self {
        self.counts.insert(table.to_string(), count);
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<IndexEntry>) -> Self {
        self.indexes = Some(Canned::Ok(indexes));
        self
    }

    pub fn with_index_answer(mut self, answer: Canned<Vec<IndexEntry>>) -> Self {
        self.indexes = Some(answer);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnEntry>) -> Self {
        self.columns = Some(Canned::Ok(columns));
        self
    }

    pub fn with_max_length(mut self, column: &str, answer: Canned<Option<u64>>) -> Self {
        self.lengths.insert(column.to_string(), answer);
        self
    }

    /// Statements issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn missing<T>(what: &str) -> Result<T> {
    Err(ExplainerError::Query(format!("{what} doesn't exist")))
}

#[async_trait]
impl QueryExecutor for CannedExecutor {
    async fn explain(&self, query: &QueryModel) -> Result<Option<PlanRow>> {
        self.record(query.as_explain());
        match self.plans.get(query.sql()) {
            Some(answer) => answer.answer(),
            None => missing(query.sql()),
        }
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        self.record(format!("count {table}"));
        match self.counts.get(table) {
            Some(count) => Ok(*count),
            None => missing(table),
        }
    }

    async fn show_indexes(&self, table: &str) -> Result<Vec<IndexEntry>> {
        self.record(format!("indexes {table}"));
        match &self.indexes {
            Some(answer) => answer.answer(),
            None => missing(table),
        }
    }

    async fn show_columns(&self, table: &str) -> Result<Vec<ColumnEntry>> {
        self.record(format!("columns {table}"));
        match &self.columns {
            Some(answer) => answer.answer(),
            None => missing(table),
        }
    }

    async fn max_length(&self, table: &str, column: &str) -> Result<Option<u64>> {
        self.record(format!("max_length {table}.{column}"));
        match self.lengths.get(column) {
            Some(answer) => answer.answer(),
            None => missing(column),
        }
    }
}

/// A connection that answers SQL text with canned results and records every
/// statement and its parameters
#[derive(Default)]
pub struct CannedConnection {
    results: HashMap<String, Canned<QueryResult>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl CannedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, sql: &str, result: QueryResult) -> Self {
        self.results.insert(sql.to_string(), Canned::Ok(result));
        self
    }

    pub fn with_answer(mut self, sql: &str, answer: Canned<QueryResult>) -> Self {
        self.results.insert(sql.to_string(), answer);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Connection for CannedConnection {
    fn driver_name(&self) -> &str {
        "canned"
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sql.to_string(), params.to_vec()));
        }
        match self.results.get(sql) {
            Some(answer) => answer.answer(),
            None => missing(sql),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
