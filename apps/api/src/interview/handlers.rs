use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::interview::scoring::{evaluate_answer, Evaluation};
use crate::questions::{sample, InterviewQuestion, QuestionList, INTERVIEW_QUESTIONS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// GET /api/interview/questions
///
/// A fresh random sample on every call.
pub async fn handle_get_questions(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Json<QuestionList<InterviewQuestion>> {
    Json(QuestionList {
        questions: sample(INTERVIEW_QUESTIONS, state.config.interview_sample_size),
    })
}

/// POST /api/interview/answer
///
/// Scores the answer and counts the attempt. Scorer failures still return 200
/// with the fallback evaluation.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<AnswerRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = evaluate_answer(
        state.scorer.clone(),
        req.question,
        req.answer,
        state.scorer_timeout(),
    )
    .await;

    let progress = state.store.increment_interviews(user.id).await?;

    info!(
        user_id = user.id,
        score = evaluation.score,
        interviews_taken = progress.interviews_taken,
        "Interview answer scored"
    );

    Ok(Json(evaluation))
}
