use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::QuizError;
use crate::model::{FeedbackOutcome, FeedbackResult, FeedbackState, OptionKey, Question};

// ─── REQUESTS ───────────────────────────────────────────────────────────────

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one feedback request: the session and question it was issued for
/// plus a per-session submission counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackTicket {
    session_id: u64,
    question_index: usize,
    generation: u64,
}

impl FeedbackTicket {
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }
}

/// Everything the feedback service needs for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub ticket: FeedbackTicket,
    pub question: String,
    pub user_answer: OptionKey,
    pub correct_answer: OptionKey,
    pub is_correct: bool,
}

/// Result of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Advanced { index: usize },
    /// The last question was passed; the caller ends the session.
    Completed,
}

/// 1-based question number out of the total, for "3/20" style display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPosition {
    pub number: usize,
    pub total: usize,
}

// ─── SESSION ────────────────────────────────────────────────────────────────

/// In-memory quiz over an immutable, shared question list.
///
/// `selected_answer`, `result_visible` and the feedback state are cleared together
/// whenever the result is dismissed or the question changes. Only the pending
/// ticket may update the shown result; responses for any other ticket are
/// discarded. A question accepts no new submission while an earlier request
/// for it is still unresolved, even if the user has moved away and back.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: u64,
    questions: Arc<[Question]>,
    current: usize,
    selected: Option<OptionKey>,
    result_visible: bool,
    feedback: FeedbackState,
    pending: Option<FeedbackTicket>,
    in_flight: HashMap<usize, FeedbackTicket>,
    submissions: u64,
}

impl QuizSession {
    /// Bind a question list and position the session on its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `questions` is empty.
    pub fn start(questions: Arc<[Question]>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            questions,
            current: 0,
            selected: None,
            result_visible: false,
            feedback: FeedbackState::Idle,
            pending: None,
            in_flight: HashMap::new(),
            submissions: 0,
        })
    }

    /// Process-unique id; tickets from other sessions never match this one.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn questions(&self) -> &Arc<[Question]> {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn position(&self) -> QuizPosition {
        QuizPosition {
            number: self.current + 1,
            total: self.questions.len(),
        }
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<OptionKey> {
        self.selected
    }

    /// Whether the selected answer matches the current question's key.
    #[must_use]
    pub fn is_answer_correct(&self) -> Option<bool> {
        self.selected.map(|key| self.current_question().is_correct(key))
    }

    #[must_use]
    pub fn result_visible(&self) -> bool {
        self.result_visible
    }

    #[must_use]
    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<FeedbackTicket> {
        self.pending
    }

    /// Whether a request for the current question has not been resolved yet.
    #[must_use]
    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.contains_key(&self.current)
    }

    /// The result overlay is shown as soon as an answer is submitted, so the
    /// loading state is visible while the request is in flight.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.result_visible || self.feedback.is_loading()
    }

    /// Record an answer for the current question and open a feedback request.
    ///
    /// Correctness is decided here, before any network call.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FeedbackPending` while a request for this question is
    /// unresolved, and `QuizError::AlreadyAnswered` while a result is shown.
    pub fn submit_answer(&mut self, key: OptionKey) -> Result<FeedbackRequest, QuizError> {
        if self.feedback.is_loading() || self.is_request_in_flight() {
            return Err(QuizError::FeedbackPending);
        }
        if self.result_visible {
            return Err(QuizError::AlreadyAnswered);
        }

        let question = &self.questions[self.current];
        let is_correct = question.is_correct(key);
        let correct_answer = question.correct_answer();
        let text = question.text().to_owned();

        self.submissions += 1;
        let ticket = FeedbackTicket {
            session_id: self.id,
            question_index: self.current,
            generation: self.submissions,
        };
        self.selected = Some(key);
        self.feedback = FeedbackState::Loading;
        self.pending = Some(ticket);
        self.in_flight.insert(self.current, ticket);

        Ok(FeedbackRequest {
            ticket,
            question: text,
            user_answer: key,
            correct_answer,
            is_correct,
        })
    }

    /// Apply a completed feedback request.
    ///
    /// Returns `false` and leaves the shown result untouched if `ticket` is not
    /// the pending one (the user dismissed or moved on in the meantime); its
    /// question is still released for a new submission. The outcome is always
    /// taken from the locally computed correctness.
    pub fn complete_feedback(&mut self, ticket: FeedbackTicket, result: FeedbackResult) -> bool {
        if !self.take_pending(ticket) {
            return false;
        }
        let outcome = FeedbackOutcome::from_correct(self.is_answer_correct().unwrap_or(false));
        self.feedback = FeedbackState::Ready(result.with_outcome(outcome).normalized());
        self.result_visible = true;
        true
    }

    /// Reveal the result without an explanation when the request never completed.
    pub fn mark_feedback_unavailable(&mut self, ticket: FeedbackTicket) -> bool {
        if !self.take_pending(ticket) {
            return false;
        }
        self.feedback = FeedbackState::Unavailable;
        self.result_visible = true;
        true
    }

    fn take_pending(&mut self, ticket: FeedbackTicket) -> bool {
        if self.in_flight.get(&ticket.question_index) == Some(&ticket) {
            self.in_flight.remove(&ticket.question_index);
        }
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Close the result and forget the answer; the question stays the same.
    pub fn dismiss_result(&mut self) {
        self.selected = None;
        self.result_visible = false;
        self.feedback = FeedbackState::Idle;
        self.pending = None;
    }

    /// Move to the next question, or report completion from the last one.
    pub fn advance(&mut self) -> QuizStep {
        self.dismiss_result();
        if self.is_last() {
            return QuizStep::Completed;
        }
        self.current += 1;
        QuizStep::Advanced {
            index: self.current,
        }
    }

    /// Move to the previous question. Returns `false` at the first question.
    pub fn retreat(&mut self) -> bool {
        self.dismiss_result();
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }
}

// ─── TESTS ──────────────────────────────────────────────────────────────────
