//! Heuristic grade shared by query and table reports

use serde::{Deserialize, Serialize};

/// A grade between [`Grade::MIN`] and [`Grade::MAX`], higher is better
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(f64);

impl Grade {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;

    /// The starting grade of every report
    pub fn best() -> Self {
        Self(Self::MAX)
    }

    /// Creates a grade, clamped into range
    pub fn new(value: f64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Lowers the grade by `offset`, never below [`Grade::MIN`]
    pub fn decrease(self, offset: f64) -> Self {
        Self((self.0 - offset).max(Self::MIN))
    }

    /// Lowers the grade to `ceiling` unless it is already lower
    pub fn cap(self, ceiling: f64) -> Self {
        Self(self.0.min(ceiling).clamp(Self::MIN, Self::MAX))
    }

    /// Orders grades best-first
    pub fn best_first(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.0.total_cmp(&a.0)
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::best()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}/{}", self.0, Self::MAX)
    }
}

/// Anything that carries a grade and renders itself as a report
pub trait Graded: std::fmt::Display {
    fn grade(&self) -> Grade;
}
