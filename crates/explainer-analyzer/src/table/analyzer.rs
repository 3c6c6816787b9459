//! Table structure checks
//!
//! The three checks run unconditionally and each applies its penalty at most
//! once. Metadata is read once per analysis; any read failure aborts it.

use explainer_core::ExplainerError;
use indexmap::{IndexMap, IndexSet};

use crate::executor::QueryExecutor;

use super::{ColumnEntry, IndexEntry, TableAnalysisError, TableReport};

/// Penalty when at least one composite index is out of order
const COMPOSITE_INDEX_PENALTY: f64 = 2.0;
const STRING_INDEX_PENALTY: f64 = 0.5;
const OVERSIZED_TEXT_PENALTY: f64 = 0.25;

/// Capacity of a `mediumtext` column. A `longtext` column whose longest
/// value is shorter fits the smaller type.
pub const MEDIUMTEXT_CAPACITY: u64 = 16_777_215;

/// Analyzes the structure of `table`
pub async fn analyze(
    executor: &dyn QueryExecutor,
    table: &str,
) -> Result<TableReport, TableAnalysisError> {
    let indexes = executor
        .show_indexes(table)
        .await
        .map_err(metadata_error(table, "indexes"))?;
    let columns = executor
        .show_columns(table)
        .await
        .map_err(metadata_error(table, "columns"))?;
    tracing::debug!(
        table,
        indexes = indexes.len(),
        string_columns = columns.len(),
        "read table metadata"
    );

    let mut oversized = Vec::new();
    for column in columns.iter().filter(|c| c.is_longtext()) {
        let max_length = executor
            .max_length(table, &column.name)
            .await
            .map_err(metadata_error(table, "column lengths"))?;
        match max_length {
            Some(length) if length < MEDIUMTEXT_CAPACITY => {
                oversized.push((column.name.clone(), length));
            }
            Some(_) => {}
            None => tracing::debug!(table, column = column.name.as_str(), "no rows, skipping"),
        }
    }

    let mut report = TableReport::new(table);

    report.composite_index_warnings = composite_index_warnings(&indexes);
    if !report.composite_index_warnings.is_empty() {
        report.grade = report.grade.decrease(COMPOSITE_INDEX_PENALTY);
    }

    report.string_index_warning = string_index_warning(&columns, &indexes);
    if report.string_index_warning.is_some() {
        report.grade = report.grade.decrease(STRING_INDEX_PENALTY);
    }

    report.oversized_text_warning = oversized_text_warning(&oversized);
    if report.oversized_text_warning.is_some() {
        report.grade = report.grade.decrease(OVERSIZED_TEXT_PENALTY);
    }

    Ok(report)
}

fn metadata_error<'a>(
    table: &'a str,
    what: &'static str,
) -> impl FnOnce(ExplainerError) -> TableAnalysisError + 'a {
    move |source| TableAnalysisError::Metadata {
        table: table.to_string(),
        what,
        source,
    }
}

/// Groups index entries by key name, keeping only indexes that span more
/// than one column. Each group is sorted by position in the key; groups keep
/// the order in which their key first appears.
pub fn composite_indexes(indexes: &[IndexEntry]) -> IndexMap<&str, Vec<&IndexEntry>> {
    let mut groups: IndexMap<&str, Vec<&IndexEntry>> = IndexMap::new();
    for index in indexes {
        groups.entry(index.key_name.as_str()).or_default().push(index);
    }

    groups.retain(|_, members| members.len() > 1);
    for members in groups.values_mut() {
        members.sort_by_key(|m| m.seq_in_index);
    }
    groups
}

/// Returns the members ordered by ascending cardinality, or `None` when the
/// index is already in that order
pub fn optimal_order<'a>(members: &[&'a IndexEntry]) -> Option<Vec<&'a IndexEntry>> {
    let mut optimal = members.to_vec();
    optimal.sort_by_key(|m| m.cardinality);

    if optimal.as_slice() == members {
        None
    } else {
        Some(optimal)
    }
}

fn column_list(members: &[&IndexEntry]) -> String {
    let names: Vec<&str> = members.iter().map(|m| m.column.as_str()).collect();
    format!("[{}]", names.join(", "))
}

fn composite_index_warnings(indexes: &[IndexEntry]) -> Vec<String> {
    composite_indexes(indexes)
        .into_iter()
        .filter_map(|(name, members)| {
            let optimal = optimal_order(&members)?;
            Some(format!(
                "'{name}' is suboptimal. Columns are not ordered based on their cardinality which \
                 can result in expensive queries\n\
                 The optimal column order should be: {}\n\
                 But the actual column order is: {}\n",
                column_list(&optimal),
                column_list(&members)
            ))
        })
        .collect()
}

fn string_index_warning(columns: &[ColumnEntry], indexes: &[IndexEntry]) -> Option<String> {
    let indexed: IndexSet<&str> = columns
        .iter()
        .filter(|c| c.is_string())
        .filter(|c| {
            indexes
                .iter()
                .any(|i| i.column == c.name && !i.is_fulltext())
        })
        .map(|c| c.name.as_str())
        .collect();

    if indexed.is_empty() {
        return None;
    }

    let mut message = String::from(
        "The following string-based columns (varchar, text, mediumtext, etc) are being part of \
         non-FULLTEXT indexes. It is usually a better idea to use a FULLTEXT index for columns \
         like these because they are optimized for string data. On top of that, MySQL can only \
         index the first 4KB of a text column so in case of a longer column it is only a partial \
         index.\n",
    );
    for name in indexed {
        message.push_str(&format!("- {name}\n"));
    }
    Some(message)
}

fn oversized_text_warning(columns: &[(String, u64)]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }

    let mut message = String::from(
        "The following columns are type of longtext but based on the data in the table they \
         should be smaller columns:\n",
    );
    for (name, length) in columns {
        message.push_str(&format!("- Column: {name}, max length in table: {length}\n"));
    }
    Some(message)
}
