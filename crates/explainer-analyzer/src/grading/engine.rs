//! Rule pipeline

use crate::executor::QueryExecutor;
use crate::explain::PlanRow;
use crate::grade::Grade;

use super::{QueryReport, rules};

/// The synchronous rules, in the order they run. The join order rule
/// always runs last.
const PIPELINE: [fn(QueryReport) -> QueryReport; 7] = [
    rules::access_type,
    rules::filtered_rows,
    rules::filesort,
    rules::temp_table,
    rules::select_star,
    rules::like_pattern,
    rules::subquery_in_select,
];

/// Grades one plan
pub async fn grade(plan: PlanRow, executor: &dyn QueryExecutor) -> QueryReport {
    let report = PIPELINE
        .iter()
        .fold(QueryReport::new(plan), |report, rule| rule(report));
    rules::join_order(report, executor).await
}

/// Grades every plan and sorts the reports best first. Equal grades keep
/// their input order.
pub async fn grade_all(plans: Vec<PlanRow>, executor: &dyn QueryExecutor) -> Vec<QueryReport> {
    let mut reports = Vec::with_capacity(plans.len());
    for plan in plans {
        reports.push(grade(plan, executor).await);
    }

    reports.sort_by(|a, b| Grade::best_first(&a.grade, &b.grade));
    tracing::debug!(graded = reports.len(), "graded plans");
    reports
}
