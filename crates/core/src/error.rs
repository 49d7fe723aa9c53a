//! Error types for the exam domain.

use thiserror::Error;

use crate::model::OptionKey;

/// Errors raised while parsing catalog identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown {kind}: {raw}")]
    Unknown { kind: &'static str, raw: String },
}

/// Errors raised while constructing a `Question`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {0} text cannot be empty")]
    EmptyOption(OptionKey),

    #[error("expected exactly 4 options, got {0}")]
    OptionCount(usize),

    #[error("options must be keyed A, B, C, D in order")]
    OptionOrder,

    #[error("invalid option key: {0}")]
    InvalidOptionKey(String),
}

/// Errors raised by `QuizSession` transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,

    #[error("current question has already been answered")]
    AlreadyAnswered,

    #[error("feedback for the current answer is still loading")]
    FeedbackPending,
}
