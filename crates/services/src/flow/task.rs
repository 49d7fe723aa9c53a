use exam_core::FeedbackTicket;
use exam_core::model::FeedbackResult;
use tokio::task::JoinHandle;

/// Outcome of a finished feedback task, ready to hand back to `ExamFlow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackDelivery {
    Ready {
        ticket: FeedbackTicket,
        result: FeedbackResult,
    },
    /// The task panicked or was cancelled before producing a result.
    Lost { ticket: FeedbackTicket },
}

impl FeedbackDelivery {
    #[must_use]
    pub fn ticket(&self) -> FeedbackTicket {
        match self {
            Self::Ready { ticket, .. } | Self::Lost { ticket } => *ticket,
        }
    }
}

/// A feedback request running on the tokio runtime, tagged with the ticket it
/// was issued for.
#[derive(Debug)]
pub struct FeedbackTask {
    ticket: FeedbackTicket,
    handle: JoinHandle<FeedbackResult>,
}

impl FeedbackTask {
    pub(crate) fn new(ticket: FeedbackTicket, handle: JoinHandle<FeedbackResult>) -> Self {
        Self { ticket, handle }
    }

    #[must_use]
    pub fn ticket(&self) -> FeedbackTicket {
        self.ticket
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the request to finish. Always runs to completion; there is no cancel.
    pub async fn wait(self) -> FeedbackDelivery {
        match self.handle.await {
            Ok(result) => FeedbackDelivery::Ready {
                ticket: self.ticket,
                result,
            },
            Err(err) => {
                tracing::warn!(error = %err, "feedback task did not complete");
                FeedbackDelivery::Lost {
                    ticket: self.ticket,
                }
            }
        }
    }
}
