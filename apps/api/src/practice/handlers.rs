use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::practice::grading::{grade, GradeReport, PracticeAnswer};
use crate::questions::{practice, sample, PracticeQuestion, QuestionList, PRACTICE_QUESTIONS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub answers: Vec<PracticeAnswer>,
}

/// GET /api/practice/questions
pub async fn handle_get_all(
    CurrentUser(_user): CurrentUser,
) -> Json<QuestionList<PracticeQuestion>> {
    Json(QuestionList {
        questions: PRACTICE_QUESTIONS.to_vec(),
    })
}

/// GET /api/practice/questions/random
pub async fn handle_get_random(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Json<QuestionList<PracticeQuestion>> {
    Json(QuestionList {
        questions: sample(PRACTICE_QUESTIONS, state.config.practice_sample_size),
    })
}

/// GET /api/practice/questions/:category
///
/// Case-insensitive match on the category name; unknown categories return an empty list.
pub async fn handle_get_by_category(
    CurrentUser(_user): CurrentUser,
    ApiPath(category): ApiPath<String>,
) -> Json<QuestionList<PracticeQuestion>> {
    Json(QuestionList {
        questions: practice::by_category(&category),
    })
}

/// POST /api/practice/submit
///
/// Grades the submission and raises the user's best score if this one is higher.
pub async fn handle_submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<SubmitRequest>,
) -> Result<Json<GradeReport>, AppError> {
    let report = grade(&req.answers);

    let progress = state
        .store
        .record_practice_score(user.id, report.percentage)
        .await?;

    info!(
        user_id = user.id,
        score = report.score,
        total = report.total,
        best = progress.practice_score,
        "Practice submission graded"
    );

    Ok(Json(report))
}
