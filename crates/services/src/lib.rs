#![forbid(unsafe_code)]

pub mod error;
pub mod exam_document;
pub mod feedback_service;
pub mod flow;
pub mod question_source;

pub use error::{ExamDocumentError, ExamFlowError, FeedbackError};
pub use exam_document::ExamDocument;
pub use feedback_service::{FeedbackClient, FeedbackConfig, FeedbackProvider};
pub use flow::{ExamFlow, FeedbackDelivery, FeedbackTask};
pub use question_source::{InMemoryQuestionSource, QuestionSource, filter_by_subjects};
