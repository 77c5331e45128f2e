//! Answer scoring -- pluggable, trait-based scorer for open-ended interview answers.
//!
//! Default: `HeuristicScorer` (local, no network).
//! With `GEMINI_API_KEY` set: `LlmScorer`.
//!
//! `AppState` holds an `Arc<dyn Scorer>`. Callers go through [`evaluate_answer`],
//! which owns the timeout and turns every failure into [`Evaluation::fallback`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::prompts::answer_scoring_prompt;
use crate::llm_client::{LlmClient, LlmError};

/// Score used when the model's score is missing or not a plain integer.
const DEFAULT_SCORE: u32 = 5;
const MAX_SCORE: u32 = 10;
const NO_FEEDBACK: &str = "No feedback provided";

const FEEDBACK_PHRASES: &[&str] = &[
    "Good structure in your answer!",
    "Try to be more specific with examples.",
    "Great use of the STAR method!",
    "Consider adding more technical details.",
    "Well articulated response!",
];

const HEURISTIC_SUGGESTION: &str = "Practice speaking clearly and provide concrete examples.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: u32,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

impl Evaluation {
    /// Degraded response returned whenever scoring fails for any reason.
    pub fn fallback() -> Self {
        Self {
            score: DEFAULT_SCORE,
            feedback: "evaluation error".to_string(),
            suggestions: vec![],
        }
    }
}

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),
}

/// Maps an answer to a score and feedback. Implement this to swap backends
/// without touching handlers.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Short label for logs.
    fn backend(&self) -> &'static str;

    async fn evaluate(&self, question: &str, answer: &str) -> Result<Evaluation, ScorerError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicScorer
// ────────────────────────────────────────────────────────────────────────────

/// Word-count scorer: one point per five words, clamped to 1..=10.
/// Feedback is a random pick from a fixed phrase list.
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn score_for(answer: &str) -> u32 {
        let words = answer.split_whitespace().count() as u32;
        (words / 5).clamp(1, MAX_SCORE)
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    fn backend(&self) -> &'static str {
        "heuristic"
    }

    async fn evaluate(&self, _question: &str, answer: &str) -> Result<Evaluation, ScorerError> {
        let feedback = FEEDBACK_PHRASES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(FEEDBACK_PHRASES[0]);

        Ok(Evaluation {
            score: Self::score_for(answer),
            feedback: feedback.to_string(),
            suggestions: vec![HEURISTIC_SUGGESTION.to_string()],
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmScorer
// ────────────────────────────────────────────────────────────────────────────

/// Delegates to the generative model and parses its `"<score>, <feedback>"` reply.
pub struct LlmScorer {
    client: LlmClient,
}

impl LlmScorer {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Scorer for LlmScorer {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn evaluate(&self, question: &str, answer: &str) -> Result<Evaluation, ScorerError> {
        let reply = self
            .client
            .call_text(&answer_scoring_prompt(question, answer))
            .await?;
        Ok(parse_scorer_reply(&reply))
    }
}

/// Parses `"<integer 0-10>, <feedback sentence>"`.
///
/// Splits on the first comma. The left side counts only if it is purely ASCII
/// digits, otherwise the score is 5; values above 10 are clamped. A missing or
/// blank right side yields a placeholder.
pub fn parse_scorer_reply(reply: &str) -> Evaluation {
    let (left, right) = match reply.split_once(',') {
        Some((left, right)) => (left, Some(right)),
        None => (reply, None),
    };

    let left = left.trim();
    let score = if !left.is_empty() && left.bytes().all(|b| b.is_ascii_digit()) {
        left.parse::<u32>()
            .map(|s| s.min(MAX_SCORE))
            .unwrap_or(DEFAULT_SCORE)
    } else {
        DEFAULT_SCORE
    };

    let feedback = right
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(NO_FEEDBACK);

    Evaluation {
        score,
        feedback: feedback.to_string(),
        suggestions: vec![],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary
// ────────────────────────────────────────────────────────────────────────────

/// Runs the scorer under a deadline. Errors, panics and timeouts all produce
/// [`Evaluation::fallback`]; this function never fails.
pub async fn evaluate_answer(
    scorer: Arc<dyn Scorer>,
    question: String,
    answer: String,
    limit: Duration,
) -> Evaluation {
    let backend = scorer.backend();
    let mut task = tokio::spawn(async move { scorer.evaluate(&question, &answer).await });

    match tokio::time::timeout(limit, &mut task).await {
        Ok(Ok(Ok(evaluation))) => evaluation,
        Ok(Ok(Err(e))) => {
            warn!(backend, error = %e, "Answer scoring failed, using fallback");
            Evaluation::fallback()
        }
        Ok(Err(e)) => {
            warn!(backend, error = %e, "Answer scoring task aborted, using fallback");
            Evaluation::fallback()
        }
        Err(_) => {
            task.abort();
            warn!(backend, ?limit, "Answer scoring timed out, using fallback");
            Evaluation::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingScorer;

    #[async_trait]
    impl Scorer for FailingScorer {
        fn backend(&self) -> &'static str {
            "failing"
        }

        async fn evaluate(&self, _q: &str, _a: &str) -> Result<Evaluation, ScorerError> {
            Err(ScorerError::Model(LlmError::EmptyContent))
        }
    }

    struct PanickingScorer;

    #[async_trait]
    impl Scorer for PanickingScorer {
        fn backend(&self) -> &'static str {
            "panicking"
        }

        async fn evaluate(&self, _q: &str, _a: &str) -> Result<Evaluation, ScorerError> {
            panic!("scorer blew up");
        }
    }

    struct SlowScorer;

    #[async_trait]
    impl Scorer for SlowScorer {
        fn backend(&self) -> &'static str {
            "slow"
        }

        async fn evaluate(&self, _q: &str, _a: &str) -> Result<Evaluation, ScorerError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(parse_scorer_reply("10, too late"))
        }
    }

    #[test]
    fn test_parse_well_formed_reply() {
        let eval = parse_scorer_reply("8, Clear structure with a concrete example.");
        assert_eq!(eval.score, 8);
        assert_eq!(eval.feedback, "Clear structure with a concrete example.");
        assert!(eval.suggestions.is_empty());
    }

    #[test]
    fn test_parse_splits_on_first_comma_only() {
        let eval = parse_scorer_reply("6, Good, but add numbers, dates and outcomes.");
        assert_eq!(eval.score, 6);
        assert_eq!(eval.feedback, "Good, but add numbers, dates and outcomes.");
    }

    #[test]
    fn test_parse_non_numeric_score_defaults_to_five() {
        assert_eq!(parse_scorer_reply("eight, fine").score, 5);
        assert_eq!(parse_scorer_reply("7/10, fine").score, 5);
        assert_eq!(parse_scorer_reply("-3, fine").score, 5);
        assert_eq!(parse_scorer_reply(", fine").score, 5);
    }

    #[test]
    fn test_parse_clamps_large_scores() {
        assert_eq!(parse_scorer_reply("42, generous").score, 10);
        assert_eq!(parse_scorer_reply("99999999999999999999, overflow").score, 5);
    }

    #[test]
    fn test_parse_missing_feedback_uses_placeholder() {
        let eval = parse_scorer_reply("9");
        assert_eq!(eval.score, 9);
        assert_eq!(eval.feedback, NO_FEEDBACK);

        assert_eq!(parse_scorer_reply("4,   ").feedback, NO_FEEDBACK);
    }

    #[test]
    fn test_heuristic_score_clamped() {
        assert_eq!(HeuristicScorer::score_for(""), 1);
        assert_eq!(HeuristicScorer::score_for("one two three"), 1);
        assert_eq!(HeuristicScorer::score_for(&"word ".repeat(20)), 4);
        assert_eq!(HeuristicScorer::score_for(&"word ".repeat(500)), 10);
    }

    #[tokio::test]
    async fn test_heuristic_feedback_from_fixed_list() {
        let eval = HeuristicScorer
            .evaluate("Tell me about yourself.", "I am a backend engineer who likes Rust")
            .await
            .unwrap();
        assert!(FEEDBACK_PHRASES.contains(&eval.feedback.as_str()));
        assert_eq!(eval.score, 1);
        assert_eq!(eval.suggestions, vec![HEURISTIC_SUGGESTION.to_string()]);
    }

    #[tokio::test]
    async fn test_scorer_error_becomes_fallback() {
        let eval = evaluate_answer(
            Arc::new(FailingScorer),
            "q".into(),
            "a".into(),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(eval, Evaluation::fallback());
    }

    #[tokio::test]
    async fn test_scorer_panic_becomes_fallback() {
        let eval = evaluate_answer(
            Arc::new(PanickingScorer),
            "q".into(),
            "a".into(),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(eval.feedback, "evaluation error");
        assert_eq!(eval.score, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scorer_timeout_becomes_fallback() {
        let eval = evaluate_answer(
            Arc::new(SlowScorer),
            "q".into(),
            "a".into(),
            Duration::from_secs(20),
        )
        .await;
        assert_eq!(eval, Evaluation::fallback());
    }
}
