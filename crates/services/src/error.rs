//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::{QuestionError, QuizError};

/// Errors emitted by `FeedbackClient` requests.
///
/// These never reach the caller of `FeedbackClient::fetch_feedback`; they are
/// logged and replaced by the fallback result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback service returned an empty explanation")]
    EmptyExplanation,
    #[error("feedback request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while loading an exam document.
///
/// Only `Json` reaches callers; the per-question variants name the reason a
/// question was skipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamDocumentError {
    #[error("invalid exam document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question {num} is missing option {option}")]
    MissingOption { num: u32, option: &'static str },
    #[error("question {num} has unrecognised answer marker {raw:?}")]
    UnknownAnswer { num: u32, raw: String },
    #[error("question {num}: {source}")]
    Question {
        num: u32,
        #[source]
        source: QuestionError,
    },
}

/// Errors emitted by `ExamFlow` actions.
///
/// Validation variants are reported before any state transition happens.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamFlowError {
    #[error("select at least one subject")]
    EmptySubjectFilter,
    #[error("choose an exam type, grade, year and exam first")]
    IncompleteSelection,
    #[error("no questions available for the selected exam and subjects")]
    NoQuestions,
    #[error("no quiz in progress")]
    NoActiveQuiz,
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
