use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user engagement summary.
///
/// `resume_completed` only ever flips to true, `interviews_taken` only grows,
/// and `practice_score` is the best percentage seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Progress {
    pub resume_completed: bool,
    pub interviews_taken: i32,
    pub practice_score: f64,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            resume_completed: false,
            interviews_taken: 0,
            practice_score: 0.0,
        }
    }
}

/// Cross-user totals read by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct PlatformTotals {
    pub total_resumes: i64,
    pub total_users: i64,
    pub practice_score_sum: f64,
}

/// Rounds a percentage to two decimal places.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
