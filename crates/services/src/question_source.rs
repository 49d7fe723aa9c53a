use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use exam_core::model::{ExamKey, ExamType, Grade, Question, Subject};

use crate::error::ExamDocumentError;
use crate::exam_document::ExamDocument;

/// Supplies the ordered question list for a chosen exam.
pub trait QuestionSource: Send + Sync {
    /// All questions of the exam, in exam order, or `None` if it is not loaded.
    fn questions_for(&self, exam: &ExamKey) -> Option<Arc<[Question]>>;
}

/// Keep only questions whose subject is in `subjects`, preserving order.
///
/// Returns the same shared list when nothing is filtered out.
#[must_use]
pub fn filter_by_subjects(questions: &Arc<[Question]>, subjects: &BTreeSet<Subject>) -> Arc<[Question]> {
    if questions.iter().all(|q| subjects.contains(&q.subject())) {
        return Arc::clone(questions);
    }
    questions
        .iter()
        .filter(|q| subjects.contains(&q.subject()))
        .cloned()
        .collect()
}

/// Question banks held in memory, keyed by exam.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    exams: HashMap<ExamKey, Arc<[Question]>>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, exam: ExamKey, questions: Vec<Question>) {
        self.exams.insert(exam, questions.into());
    }

    #[must_use]
    pub fn with_exam(mut self, exam: ExamKey, questions: Vec<Question>) -> Self {
        self.insert(exam, questions);
        self
    }

    /// Parse an exam document and register its questions.
    ///
    /// The year and sitting come from the document itself. Unusable sections and
    /// questions are skipped, see [`ExamDocument::into_questions`].
    ///
    /// # Errors
    ///
    /// Returns `ExamDocumentError::Json` if the document does not have the
    /// expected shape.
    pub fn load_document(
        &mut self,
        exam_type: ExamType,
        grade: Grade,
        json: &str,
    ) -> Result<ExamKey, ExamDocumentError> {
        let document = ExamDocument::from_json(json)?;
        let exam = ExamKey {
            exam_type,
            grade,
            year: document.year(),
            sitting: document.sitting(),
        };
        let questions = document.into_questions();
        tracing::debug!(?exam, count = questions.len(), "exam document loaded");
        self.insert(exam, questions);
        Ok(exam)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }
}

impl QuestionSource for InMemoryQuestionSource {
    fn questions_for(&self, exam: &ExamKey) -> Option<Arc<[Question]>> {
        self.exams.get(exam).map(Arc::clone)
    }
}
