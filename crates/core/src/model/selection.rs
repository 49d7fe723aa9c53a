use std::collections::BTreeSet;

use crate::model::catalog::{ExamMode, ExamType, Grade, Subject};
use crate::model::ids::{ExamSittingId, ExamYear};

/// Fully narrowed exam selection, used to look up a question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExamKey {
    pub exam_type: ExamType,
    pub grade: Grade,
    pub year: ExamYear,
    pub sitting: ExamSittingId,
}

/// A user selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    SetExamType(ExamType),
    SetGrade(Grade),
    SetYear(ExamYear),
    SetExam(ExamSittingId),
    ToggleSubject(Subject),
    SetMode(ExamMode),
}

/// Snapshot of the user's narrowing choices.
///
/// Transitions go through [`SelectionState::reduce`], which returns a new snapshot
/// and leaves the previous one untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    exam_type: Option<ExamType>,
    grade: Option<Grade>,
    year: Option<ExamYear>,
    exam: Option<ExamSittingId>,
    subjects: BTreeSet<Subject>,
    mode: ExamMode,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            exam_type: None,
            grade: None,
            year: None,
            exam: None,
            subjects: Subject::ALL.into_iter().collect(),
            mode: ExamMode::default(),
        }
    }
}

impl SelectionState {
    /// Apply a single selection step.
    ///
    /// Setters overwrite unconditionally. `ToggleSubject` removes the subject if
    /// present and inserts it otherwise.
    #[must_use]
    pub fn reduce(&self, action: SelectionAction) -> Self {
        let mut next = self.clone();
        match action {
            SelectionAction::SetExamType(exam_type) => next.exam_type = Some(exam_type),
            SelectionAction::SetGrade(grade) => next.grade = Some(grade),
            SelectionAction::SetYear(year) => next.year = Some(year),
            SelectionAction::SetExam(exam) => next.exam = Some(exam),
            SelectionAction::ToggleSubject(subject) => {
                if !next.subjects.remove(&subject) {
                    next.subjects.insert(subject);
                }
            }
            SelectionAction::SetMode(mode) => next.mode = mode,
        }
        next
    }

    #[must_use]
    pub fn exam_type(&self) -> Option<ExamType> {
        self.exam_type
    }

    #[must_use]
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    #[must_use]
    pub fn year(&self) -> Option<ExamYear> {
        self.year
    }

    #[must_use]
    pub fn exam(&self) -> Option<ExamSittingId> {
        self.exam
    }

    #[must_use]
    pub fn subjects(&self) -> &BTreeSet<Subject> {
        &self.subjects
    }

    #[must_use]
    pub fn is_subject_selected(&self, subject: Subject) -> bool {
        self.subjects.contains(&subject)
    }

    #[must_use]
    pub fn mode(&self) -> ExamMode {
        self.mode
    }

    /// False when no subject is selected; a quiz must not start in that case.
    #[must_use]
    pub fn can_start_exam(&self) -> bool {
        !self.subjects.is_empty()
    }

    /// The exam lookup key, once every narrowing step has been chosen.
    #[must_use]
    pub fn exam_key(&self) -> Option<ExamKey> {
        Some(ExamKey {
            exam_type: self.exam_type?,
            grade: self.grade?,
            year: self.year?,
            sitting: self.exam?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(state: &SelectionState, subject: Subject) -> SelectionState {
        state.reduce(SelectionAction::ToggleSubject(subject))
    }

    #[test]
    fn defaults_select_every_subject_in_practice_mode() {
        let state = SelectionState::default();
        assert_eq!(state.subjects().len(), Subject::ALL.len());
        assert_eq!(state.mode(), ExamMode::Practice);
        assert!(state.exam_key().is_none());
        assert!(state.can_start_exam());
    }

    #[test]
    fn toggle_twice_restores_filter() {
        let start = SelectionState::default();
        for subject in Subject::ALL {
            let once = toggle(&start, subject);
            assert!(!once.is_subject_selected(subject));
            assert_eq!(toggle(&once, subject), start);
        }
    }

    #[test]
    fn toggle_sequence_matches_parity() {
        let sequence = [
            Subject::Law,
            Subject::Cargo,
            Subject::Law,
            Subject::Fishing,
            Subject::Law,
        ];
        let mut state = SelectionState::default();
        for subject in sequence {
            state = toggle(&state, subject);
        }

        for subject in Subject::ALL {
            let flips = sequence.iter().filter(|s| **s == subject).count();
            assert_eq!(state.is_subject_selected(subject), flips % 2 == 0);
        }
    }

    #[test]
    fn empty_filter_cannot_start() {
        let mut state = SelectionState::default();
        for subject in Subject::ALL {
            state = toggle(&state, subject);
        }
        assert!(state.subjects().is_empty());
        assert!(!state.can_start_exam());

        let state = toggle(&state, Subject::Operation);
        assert!(state.can_start_exam());
    }

    #[test]
    fn reduce_leaves_previous_snapshot_untouched() {
        let before = SelectionState::default();
        let after = before.reduce(SelectionAction::SetMode(ExamMode::Real));
        assert_eq!(before.mode(), ExamMode::Practice);
        assert_eq!(after.mode(), ExamMode::Real);
    }

    #[test]
    fn exam_key_requires_every_step() {
        let state = SelectionState::default()
            .reduce(SelectionAction::SetExamType(ExamType::Navigator))
            .reduce(SelectionAction::SetGrade(Grade::Sixth))
            .reduce(SelectionAction::SetYear(ExamYear::new(2023)));
        assert!(state.exam_key().is_none());

        let state = state.reduce(SelectionAction::SetExam(ExamSittingId::new(1)));
        assert_eq!(
            state.exam_key(),
            Some(ExamKey {
                exam_type: ExamType::Navigator,
                grade: Grade::Sixth,
                year: ExamYear::new(2023),
                sitting: ExamSittingId::new(1),
            })
        );
    }

    #[test]
    fn setters_overwrite() {
        let state = SelectionState::default()
            .reduce(SelectionAction::SetGrade(Grade::First))
            .reduce(SelectionAction::SetGrade(Grade::SixthDomestic));
        assert_eq!(state.grade(), Some(Grade::SixthDomestic));
    }
}
