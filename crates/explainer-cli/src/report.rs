//! Report presentation
//!
//! Text output colors every report by its grade. The logs verb also prints a
//! summary table of grades and statements.

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use explainer_analyzer::{ExplainBatch, Grade, Graded, QueryReport};
use serde::Serialize;

/// Widest statement shown in the summary table
const SUMMARY_SQL_WIDTH: usize = 80;

/// Color band of a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Poor,
    Fair,
    Good,
}

impl GradeBand {
    pub fn of(grade: Grade) -> Self {
        match grade.value() {
            g if g < 3.0 => Self::Poor,
            g if g < 4.0 => Self::Fair,
            _ => Self::Good,
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Poor => text.red(),
            Self::Fair => text.yellow(),
            Self::Good => text.green(),
        }
    }
}

/// Renders one graded report in its band's color
pub fn render<R: Graded>(report: &R) -> String {
    GradeBand::of(report.grade())
        .paint(&report.to_string())
        .to_string()
}

/// Renders every query report, separated by blank lines
pub fn render_queries(reports: &[QueryReport]) -> String {
    reports
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grade and statement of every report, best first
pub fn summary_table(reports: &[QueryReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Grade", "Warnings", "Query"]);

    for (idx, report) in reports.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            report.grade.to_string(),
            report.warnings.len().to_string(),
            shorten(report.query().sql(), SUMMARY_SQL_WIDTH),
        ]);
    }
    table
}

fn shorten(sql: &str, width: usize) -> String {
    if sql.chars().count() <= width {
        return sql.to_string();
    }
    let mut short: String = sql.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// JSON document printed by `explainer logs --format json`
#[derive(Debug, Serialize)]
pub struct LogsOutput<'a> {
    pub reports: &'a [QueryReport],
    pub skipped: Vec<SkippedQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhausted: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkippedQuery {
    pub sql: String,
    pub error: String,
}

impl<'a> LogsOutput<'a> {
    pub fn new(reports: &'a [QueryReport], batch: &ExplainBatch) -> Self {
        Self {
            reports,
            skipped: batch
                .skipped
                .iter()
                .map(|failure| SkippedQuery {
                    sql: failure.sql.clone(),
                    error: failure.source.to_string(),
                })
                .collect(),
            exhausted: batch.exhausted.as_ref().map(ToString::to_string),
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests;
