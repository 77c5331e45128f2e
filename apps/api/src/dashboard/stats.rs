use serde::Serialize;

use crate::models::progress::{round_percentage, PlatformTotals};

/// Platform-wide aggregates shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformStats {
    pub total_resumes: i64,
    pub total_users: i64,
    pub avg_practice_score: f64,
}

impl From<PlatformTotals> for PlatformStats {
    /// The average divides by the user count (floored at 1), so users with
    /// no submissions pull it down.
    fn from(totals: PlatformTotals) -> Self {
        let divisor = totals.total_users.max(1) as f64;
        Self {
            total_resumes: totals.total_resumes,
            total_users: totals.total_users,
            avg_practice_score: round_percentage(totals.practice_score_sum / divisor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total_resumes: i64, total_users: i64, practice_score_sum: f64) -> PlatformTotals {
        PlatformTotals {
            total_resumes,
            total_users,
            practice_score_sum,
        }
    }

    #[test]
    fn test_empty_platform_averages_to_zero() {
        let stats = PlatformStats::from(totals(0, 0, 0.0));
        assert_eq!(stats.avg_practice_score, 0.0);
        assert_eq!(stats.total_users, 0);
    }

    #[test]
    fn test_average_spans_all_users() {
        // Two users, only one has practised.
        let stats = PlatformStats::from(totals(3, 2, 80.0));
        assert_eq!(stats.avg_practice_score, 40.0);
        assert_eq!(stats.total_resumes, 3);
    }

    #[test]
    fn test_average_is_rounded() {
        let stats = PlatformStats::from(totals(0, 3, 100.0));
        assert_eq!(stats.avg_practice_score, 33.33);
    }
}
