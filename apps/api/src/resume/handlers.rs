//! Handlers for `/api/resume`.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::resume::{ResumeDocument, StoredResume};
use crate::resume::builder::{build_resume, get_resume, list_resumes};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub id: i64,
    pub resume: StoredResume,
}

#[derive(Debug, Serialize)]
pub struct ResumeList {
    pub resumes: Vec<ResumeSummary>,
}

/// POST /api/resume/build
pub async fn handle_build(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(document): ApiJson<ResumeDocument>,
) -> Result<Json<Value>, AppError> {
    let resume = build_resume(state.store.as_ref(), &user, document).await?;

    Ok(Json(json!({
        "message": "Resume created successfully",
        "resume_id": resume.id,
        "resume": resume,
    })))
}

/// GET /api/resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    let resume = get_resume(state.store.as_ref(), &user, id).await?;
    Ok(Json(json!({ "resume": resume })))
}

/// GET /api/resume/user/list
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ResumeList>, AppError> {
    let resumes = list_resumes(state.store.as_ref(), &user)
        .await?
        .into_iter()
        .map(|resume| ResumeSummary {
            id: resume.id,
            resume,
        })
        .collect();

    Ok(Json(ResumeList { resumes }))
}
