#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod navigation;
pub mod quiz;

pub use error::{CatalogError, QuestionError, QuizError};
pub use navigation::{Navigator, ScreenChange};
pub use quiz::{FeedbackRequest, FeedbackTicket, QuizPosition, QuizSession, QuizStep};
