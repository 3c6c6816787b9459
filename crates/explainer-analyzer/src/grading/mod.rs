//! Plan grading
//!
//! Every plan starts at [`Grade::MAX`] and passes through a fixed chain of
//! rules. A rule can only lower the grade, and later rules see the grade left
//! by earlier ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::explain::PlanRow;
use crate::grade::{Grade, Graded};
use crate::query::QueryModel;

pub mod engine;
pub mod rules;

pub use engine::{grade, grade_all};

/// A grading rule. Variants are declared, and therefore ordered, in
/// pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    AccessType,
    FilteredRows,
    Filesort,
    TempTable,
    SelectStar,
    LikePattern,
    SubqueryInSelect,
    JoinOrder,
}

impl Rule {
    /// Every rule, in pipeline order
    pub const ALL: [Rule; 8] = [
        Rule::AccessType,
        Rule::FilteredRows,
        Rule::Filesort,
        Rule::TempTable,
        Rule::SelectStar,
        Rule::LikePattern,
        Rule::SubqueryInSelect,
        Rule::JoinOrder,
    ];

    /// Label printed in front of the rule's warning
    pub fn label(&self) -> &'static str {
        match self {
            Self::AccessType => "Access type",
            Self::FilteredRows => "Filtered rows",
            Self::Filesort => "Filesort",
            Self::TempTable => "Temp table",
            Self::SelectStar => "Select",
            Self::LikePattern => "Like pattern",
            Self::SubqueryInSelect => "Subquery in SELECT",
            Self::JoinOrder => "Suboptimal join order",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The graded plan of one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub plan: PlanRow,
    pub warnings: BTreeMap<Rule, String>,
    pub grade: Grade,
}

impl QueryReport {
    /// Starts a report at the best grade with no warnings
    pub fn new(plan: PlanRow) -> Self {
        Self {
            plan,
            warnings: BTreeMap::new(),
            grade: Grade::best(),
        }
    }

    pub fn query(&self) -> &QueryModel {
        &self.plan.query
    }

    pub fn warning(&self, rule: Rule) -> Option<&str> {
        self.warnings.get(&rule).map(String::as_str)
    }

    /// Records a warning and lowers the grade by `penalty`
    pub(crate) fn penalize(mut self, rule: Rule, penalty: f64, message: impl Into<String>) -> Self {
        self.grade = self.grade.decrease(penalty);
        self.warnings.insert(rule, message.into());
        self
    }
}

impl Graded for QueryReport {
    fn grade(&self) -> Grade {
        self.grade
    }
}

impl std::fmt::Display for QueryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Query: {}", self.plan.query)?;
        writeln!(f, "Grade: {}", self.grade)?;
        for (rule, warning) in &self.warnings {
            writeln!(f, "{rule}: {warning}")?;
        }
        Ok(())
    }
}
