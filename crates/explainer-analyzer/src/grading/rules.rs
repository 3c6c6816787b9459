//! Individual grading rules
//!
//! Each synchronous rule takes the running report and returns it with at
//! most one extra warning. [`join_order`] also needs row counts and is
//! therefore async.

use crate::executor::QueryExecutor;
use crate::explain::AccessType;

use super::{QueryReport, Rule};

const FULL_SCAN: &str = "The query uses the \"ALL\" access type. It scans ALL rows from the disk \
without using an index. It will cause you trouble if you have a large number of records.";

const INDEX_WITHOUT_COVERING: &str = "Although your query uses the \"index\" access type, the \
\"Extra\" column does not contain \"Using index\". It means you effectively do a FULL TABLE SCAN. \
First, the DB scans the whole BTREE index and then runs I/O operations for each node to satisfy \
the SELECT statement. It often happens when \"SELECT *\" is used. It will cause you trouble if you \
have a large number of records.";

const INDEX_SCAN: &str = "The query uses the \"index\" access type. It scans every node in the \
index BTREE which is pretty inefficient. It will cause you trouble if you have a large number of \
records. Fortunately, the \"Extra\" column contains \"Using index\" which means the query does not \
run a large number of extra I/O operations.";

const RANGE_WITHOUT_COVERING: &str = "Although your query uses the \"range\" access type, the \
\"Extra\" column does not contain \"Using index\". It means you run unnecessary I/O operations. \
First, the DB scans the BTREE index for matching rows and then it runs I/O operations for each \
node. It can be slower if you have a large number of records.";

const FILESORT: &str = "The query uses \"filesort\". It means that the DB cannot use the BTREE \
index to sort the results. It needs to copy the keys and then sort them separately. This can \
happen in-memory or on the disk. You probably sort or group based on a column that is not part of \
an index.";

const TEMP_TABLE: &str = "The query uses a \"temporary table\". The DB must create an in-memory \
or on-disk temporary table to hold intermediate results. It often happens when you use ORDER BY \
and GROUP BY together, especially when functions like COUNT() are used.";

const SELECT_STAR: &str = "The query uses \"SELECT *\" which is usually not the best idea. It can \
increase the number of I/O operations, it uses more memory, makes TCP connections slower, and \
generally speaking slows down your query. If it's possible select only specific columns.";

const LIKE_PATTERN: &str = "The query has a \"LIKE %\" pattern in it which is usually not the \
most optimal solution. Consider using full-text index and full-text search.";

const SUBQUERY_IN_SELECT: &str = "Usually, it's not a good idea to have a subquery in the SELECT \
clause. The database *might* run an additional query for every row in the result set. If your \
result contains 1,000 rows you might execute 1,000 additional SELECT queries. It's an N+1 query \
problem at the DB level.";

/// Sets the grade from the access type. Unlisted access types are not
/// judged.
pub fn access_type(mut report: QueryReport) -> QueryReport {
    let using_index = report.plan.using_index();
    let (ceiling, warning) = match report.plan.access_type {
        Some(AccessType::All) => (1.0, Some(FULL_SCAN)),
        Some(AccessType::Index) if !using_index => (1.0, Some(INDEX_WITHOUT_COVERING)),
        Some(AccessType::Index) => (2.0, Some(INDEX_SCAN)),
        Some(AccessType::Range) if !using_index => (3.0, Some(RANGE_WITHOUT_COVERING)),
        Some(AccessType::Range) => (4.0, None),
        Some(AccessType::Const | AccessType::Ref) => (5.0, None),
        _ => return report,
    };

    report.grade = report.grade.cap(ceiling);
    if let Some(warning) = warning {
        report.warnings.insert(Rule::AccessType, warning.to_string());
    }
    report
}

/// Penalizes plans that discard most of the rows they examine: -1 below
/// 50%, -2 below 33%
pub fn filtered_rows(report: QueryReport) -> QueryReport {
    let filtered = report.plan.filtered_or_default();
    if filtered >= 50.0 {
        return report;
    }

    let penalty = if filtered < 33.0 { 2.0 } else { 1.0 };
    let message = format!(
        "This query causes the DB to scan through {} rows but only returns {:.2}% of it. It \
         usually happens when you have a composite index and the column order is not optimal. Or \
         in the case of a full table scan.",
        report.plan.rows_or_default(),
        filtered
    );
    report.penalize(Rule::FilteredRows, penalty, message)
}

pub fn filesort(report: QueryReport) -> QueryReport {
    if !report.plan.using_filesort() {
        return report;
    }
    report.penalize(Rule::Filesort, 0.5, FILESORT)
}

pub fn temp_table(report: QueryReport) -> QueryReport {
    if !report.plan.using_temporary() {
        return report;
    }
    report.penalize(Rule::TempTable, 0.5, TEMP_TABLE)
}

pub fn select_star(report: QueryReport) -> QueryReport {
    if !report.query().has_select_star() {
        return report;
    }
    report.penalize(Rule::SelectStar, 0.25, SELECT_STAR)
}

pub fn like_pattern(report: QueryReport) -> QueryReport {
    if !report.query().has_like_pattern() {
        return report;
    }
    report.penalize(Rule::LikePattern, 0.5, LIKE_PATTERN)
}

pub fn subquery_in_select(report: QueryReport) -> QueryReport {
    if !report.query().has_subquery_in_select() {
        return report;
    }
    report.penalize(Rule::SubqueryInSelect, 2.0, SUBQUERY_IN_SELECT)
}

/// Compares the row counts of the joined tables with the same counts
/// sorted largest first. The rule is skipped if any count fails.
pub async fn join_order(report: QueryReport, executor: &dyn QueryExecutor) -> QueryReport {
    let tables = report.query().joined_tables();
    if tables.is_empty() {
        return report;
    }

    let mut counts = Vec::with_capacity(tables.len());
    for table in &tables {
        match executor.count_rows(table).await {
            Ok(count) => counts.push(count),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    table = table.as_str(),
                    sql = report.query().sql(),
                    "unable to analyze join order"
                );
                return report;
            }
        }
    }

    let mut descending = counts.clone();
    descending.sort_unstable_by(|a, b| b.cmp(a));
    if counts == descending {
        return report;
    }

    let listing = tables
        .iter()
        .zip(&counts)
        .map(|(table, count)| format!("{table} ({count} rows)"))
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!(
        "Tables in the query might be joined in a suboptimal way. The joined tables are not \
         ordered by their size: {listing}."
    );
    report.penalize(Rule::JoinOrder, 0.25, message)
}

#[cfg(test)]
mod tests;
