//! Handlers for `/api/dashboard`.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::dashboard::stats::PlatformStats;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/dashboard/progress
///
/// Users without a progress record get all-default values.
pub async fn handle_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    let progress = state.store.find_progress(user.id).await?.unwrap_or_default();
    Ok(Json(json!({ "progress": progress })))
}

/// GET /api/dashboard/stats
pub async fn handle_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<PlatformStats>, AppError> {
    let totals = state.store.platform_totals().await?;
    Ok(Json(PlatformStats::from(totals)))
}
