//! The two static question catalogs. Both are immutable for the life of the
//! process and shared without synchronization.

use rand::seq::IndexedRandom;
use serde::Serialize;

pub mod interview;
pub mod practice;

pub use interview::{InterviewQuestion, INTERVIEW_QUESTIONS};
pub use practice::{PracticeQuestion, PRACTICE_QUESTIONS};

#[derive(Debug, Serialize)]
pub struct QuestionList<T> {
    pub questions: Vec<T>,
}

/// Uniform random sample of up to `count` items, without replacement.
/// Never returns more items than `items` holds; results are not reproducible.
pub fn sample<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    items
        .choose_multiple(&mut rand::rng(), count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sample_has_no_duplicates() {
        for _ in 0..50 {
            let picked = sample(INTERVIEW_QUESTIONS, 5);
            let ids: HashSet<u32> = picked.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), picked.len());
            assert_eq!(picked.len(), 5);
        }
    }

    #[test]
    fn test_sample_never_exceeds_bank() {
        let picked = sample(PRACTICE_QUESTIONS, PRACTICE_QUESTIONS.len() + 10);
        assert_eq!(picked.len(), PRACTICE_QUESTIONS.len());

        let ids: HashSet<u32> = picked.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), PRACTICE_QUESTIONS.len());
    }

    #[test]
    fn test_sample_zero_and_empty() {
        assert!(sample(INTERVIEW_QUESTIONS, 0).is_empty());
        assert!(sample::<u32>(&[], 3).is_empty());
    }
}
