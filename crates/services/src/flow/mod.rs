mod task;
mod workflow;

// Public API of the exam flow subsystem.
pub use crate::error::ExamFlowError;
pub use task::{FeedbackDelivery, FeedbackTask};
pub use workflow::ExamFlow;
