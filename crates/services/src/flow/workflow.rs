use std::sync::Arc;

use exam_core::model::{
    ExamMode, ExamSittingId, ExamType, ExamYear, Grade, OptionKey, Screen, SelectionAction,
    SelectionState, Subject,
};
use exam_core::{Navigator, QuizSession, QuizStep, ScreenChange};

use super::task::{FeedbackDelivery, FeedbackTask};
use crate::error::ExamFlowError;
use crate::feedback_service::FeedbackProvider;
use crate::question_source::{QuestionSource, filter_by_subjects};

/// Drives the exam flow: screen navigation, the user's selection, and the
/// active quiz with its feedback requests.
///
/// The selection lives as long as the flow. The quiz exists only while the
/// Question screen is active and is dropped as soon as it is left.
pub struct ExamFlow {
    navigator: Navigator,
    selection: SelectionState,
    quiz: Option<QuizSession>,
    questions: Arc<dyn QuestionSource>,
    feedback: Arc<dyn FeedbackProvider>,
}

impl ExamFlow {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionSource>, feedback: Arc<dyn FeedbackProvider>) -> Self {
        Self {
            navigator: Navigator::default(),
            selection: SelectionState::default(),
            quiz: None,
            questions,
            feedback,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    // ─── SELECTION ──────────────────────────────────────────────────────────

    pub fn select_exam_type(&mut self, exam_type: ExamType) {
        self.apply(SelectionAction::SetExamType(exam_type));
        self.go_to(Screen::Grades);
    }

    pub fn select_grade(&mut self, grade: Grade) {
        self.apply(SelectionAction::SetGrade(grade));
        self.go_to(Screen::Years);
    }

    pub fn select_year(&mut self, year: ExamYear) {
        self.apply(SelectionAction::SetYear(year));
        self.go_to(Screen::Exams);
    }

    /// Pick the sitting; subjects and mode are chosen on the same screen.
    pub fn select_exam(&mut self, exam: ExamSittingId) {
        self.apply(SelectionAction::SetExam(exam));
    }

    pub fn toggle_subject(&mut self, subject: Subject) {
        self.apply(SelectionAction::ToggleSubject(subject));
    }

    pub fn set_mode(&mut self, mode: ExamMode) {
        self.apply(SelectionAction::SetMode(mode));
    }

    fn apply(&mut self, action: SelectionAction) {
        self.selection = self.selection.reduce(action);
        tracing::debug!(?action, "selection updated");
    }

    // ─── NAVIGATION ─────────────────────────────────────────────────────────

    /// Go to the parent of the current screen. No-op on Main.
    pub fn go_back(&mut self) -> Screen {
        if let Some(change) = self.navigator.go_back() {
            self.on_screen_change(change);
        }
        self.navigator.current()
    }

    fn go_to(&mut self, screen: Screen) {
        let change = self.navigator.go_to(screen);
        self.on_screen_change(change);
    }

    fn on_screen_change(&mut self, change: ScreenChange) {
        tracing::debug!(from = ?change.from, to = ?change.to, "screen changed");
        if change.leaves(Screen::Question) && self.quiz.take().is_some() {
            tracing::debug!("quiz session discarded");
        }
    }

    // ─── QUIZ ───────────────────────────────────────────────────────────────

    /// Load the selected exam, filtered by subject, and enter the Question screen.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::EmptySubjectFilter` when no subject is selected,
    /// `ExamFlowError::IncompleteSelection` when a narrowing step is missing, and
    /// `ExamFlowError::NoQuestions` when the source has nothing for the selection.
    /// On error neither the screen nor the quiz changes.
    pub fn start_exam(&mut self) -> Result<&QuizSession, ExamFlowError> {
        if !self.selection.can_start_exam() {
            return Err(ExamFlowError::EmptySubjectFilter);
        }
        let exam = self
            .selection
            .exam_key()
            .ok_or(ExamFlowError::IncompleteSelection)?;
        let all = self
            .questions
            .questions_for(&exam)
            .ok_or(ExamFlowError::NoQuestions)?;
        let questions = filter_by_subjects(&all, self.selection.subjects());
        let quiz = QuizSession::start(questions).map_err(|_| ExamFlowError::NoQuestions)?;

        tracing::info!(
            ?exam,
            questions = quiz.len(),
            mode = self.selection.mode().id(),
            "exam started"
        );
        self.go_to(Screen::Question);
        Ok(self.quiz.insert(quiz))
    }

    /// Grade the answer now and request its explanation in the background.
    ///
    /// Must be called from within a tokio runtime. The returned task resolves to a
    /// delivery for [`ExamFlow::deliver_feedback`]; the flow stays usable meanwhile.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::NoActiveQuiz` outside the Question screen and
    /// `ExamFlowError::Quiz` when the quiz refuses the submission.
    pub fn submit_answer(&mut self, key: OptionKey) -> Result<FeedbackTask, ExamFlowError> {
        let quiz = self.quiz.as_mut().ok_or(ExamFlowError::NoActiveQuiz)?;
        let request = quiz.submit_answer(key)?;
        let ticket = request.ticket;
        tracing::debug!(
            question = ticket.question_index(),
            answer = %key,
            correct = request.is_correct,
            "answer submitted"
        );

        let provider = Arc::clone(&self.feedback);
        let handle = tokio::spawn(async move { provider.feedback_for(&request).await });
        Ok(FeedbackTask::new(ticket, handle))
    }

    /// Apply a finished feedback task. Returns `false` if it was stale and dropped.
    pub fn deliver_feedback(&mut self, delivery: FeedbackDelivery) -> bool {
        let ticket = delivery.ticket();
        let Some(quiz) = self.quiz.as_mut() else {
            tracing::debug!(question = ticket.question_index(), "feedback arrived after quiz ended");
            return false;
        };

        let applied = match delivery {
            FeedbackDelivery::Ready { ticket, result } => quiz.complete_feedback(ticket, result),
            FeedbackDelivery::Lost { ticket } => quiz.mark_feedback_unavailable(ticket),
        };
        if !applied {
            tracing::warn!(
                question = ticket.question_index(),
                current = quiz.current_index(),
                "discarding stale feedback"
            );
        }
        applied
    }

    /// Submit an answer and wait for its feedback.
    ///
    /// # Errors
    ///
    /// Same as [`ExamFlow::submit_answer`].
    pub async fn answer(&mut self, key: OptionKey) -> Result<bool, ExamFlowError> {
        let task = self.submit_answer(key)?;
        let delivery = task.wait().await;
        Ok(self.deliver_feedback(delivery))
    }

    /// # Errors
    ///
    /// Returns `ExamFlowError::NoActiveQuiz` outside the Question screen.
    pub fn dismiss_result(&mut self) -> Result<(), ExamFlowError> {
        self.active_quiz()?.dismiss_result();
        Ok(())
    }

    /// Advance to the next question. From the last question this ends the exam,
    /// returns to Main and drops the quiz.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::NoActiveQuiz` outside the Question screen.
    pub fn next_question(&mut self) -> Result<QuizStep, ExamFlowError> {
        let quiz = self.active_quiz()?;
        let step = quiz.advance();
        if step == QuizStep::Completed {
            tracing::info!(questions = quiz.len(), "exam completed");
            self.go_to(Screen::Main);
        }
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `ExamFlowError::NoActiveQuiz` outside the Question screen.
    pub fn previous_question(&mut self) -> Result<bool, ExamFlowError> {
        Ok(self.active_quiz()?.retreat())
    }

    fn active_quiz(&mut self) -> Result<&mut QuizSession, ExamFlowError> {
        self.quiz.as_mut().ok_or(ExamFlowError::NoActiveQuiz)
    }
}
