mod catalog;
mod feedback;
mod ids;
mod question;
mod screen;
mod selection;

pub use catalog::{ExamMode, ExamType, Grade, Subject};
pub use feedback::{FeedbackOutcome, FeedbackResult, FeedbackState};
pub use ids::{ExamSittingId, ExamYear, QuestionId};
pub use question::{OptionKey, Question, QuestionOption};
pub use screen::Screen;
pub use selection::{ExamKey, SelectionAction, SelectionState};
