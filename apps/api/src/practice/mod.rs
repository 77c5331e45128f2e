// Multiple-choice practice: bank retrieval and submission grading.

pub mod grading;
pub mod handlers;
