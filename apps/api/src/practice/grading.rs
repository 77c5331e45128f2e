use serde::{Deserialize, Serialize};

use crate::models::progress::round_percentage;
use crate::questions::practice;

#[derive(Debug, Clone, Deserialize)]
pub struct PracticeAnswer {
    pub question_id: i64,
    pub selected_option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResult {
    pub question_id: i64,
    pub question: &'static str,
    pub selected: String,
    pub correct_answer: &'static str,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub results: Vec<AnswerResult>,
}

/// Grades answers against the practice bank.
///
/// `total` counts every submitted answer. Answers naming an unknown question
/// id are left out of `results` and can never be correct, so they lower the
/// percentage. Correctness is exact string equality with the bank's answer.
pub fn grade(answers: &[PracticeAnswer]) -> GradeReport {
    let results: Vec<AnswerResult> = answers
        .iter()
        .filter_map(|answer| {
            let id = u32::try_from(answer.question_id).ok()?;
            let question = practice::find(id)?;
            Some(AnswerResult {
                question_id: answer.question_id,
                question: question.question,
                selected: answer.selected_option.clone(),
                correct_answer: question.correct_answer,
                is_correct: answer.selected_option == question.correct_answer,
            })
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count();
    let total = answers.len();
    let percentage = if total == 0 {
        0.0
    } else {
        round_percentage(score as f64 / total as f64 * 100.0)
    };

    GradeReport {
        score,
        total,
        percentage,
        results,
    }
}
