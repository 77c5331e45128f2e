use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::interview::scoring::Scorer;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres or in-memory, chosen at startup from `DATABASE_URL`.
    pub store: Arc<dyn Store>,
    /// Pluggable answer scorer. Default: HeuristicScorer. LlmScorer when `GEMINI_API_KEY` is set.
    pub scorer: Arc<dyn Scorer>,
    pub config: Config,
}

impl AppState {
    pub fn scorer_timeout(&self) -> Duration {
        Duration::from_secs(self.config.scorer_timeout_secs)
    }
}
