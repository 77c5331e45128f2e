// Mock interview: canned prompts and answer scoring.
// Scoring goes through the `Scorer` trait; the model is reached only via llm_client.

pub mod handlers;
pub mod scoring;
