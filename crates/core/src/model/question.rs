use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;
use crate::model::catalog::Subject;
use crate::model::ids::QuestionId;

// ─── OPTION KEY ─────────────────────────────────────────────────────────────

/// Label of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(OptionKey::A),
            "B" | "b" => Ok(OptionKey::B),
            "C" | "c" => Ok(OptionKey::C),
            "D" | "d" => Ok(OptionKey::D),
            other => Err(QuestionError::InvalidOptionKey(other.to_owned())),
        }
    }
}

// ─── QUESTION ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub key: OptionKey,
    pub text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(key: OptionKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

/// A single multiple-choice question with exactly four options keyed A–D.
///
/// Immutable once constructed; sessions hold questions behind an `Arc<[Question]>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    subject: Subject,
    text: String,
    options: [QuestionOption; 4],
    correct: OptionKey,
    explanation: String,
    image_ref: Option<String>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the question text is blank,
    /// `QuestionError::OptionCount` unless exactly four options are given,
    /// `QuestionError::OptionOrder` if they are not keyed A, B, C, D in order,
    /// and `QuestionError::EmptyOption` if any option text is blank.
    pub fn new(
        id: QuestionId,
        subject: Subject,
        text: impl Into<String>,
        options: Vec<QuestionOption>,
        correct: OptionKey,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let options: [QuestionOption; 4] = options
            .try_into()
            .map_err(|rest: Vec<QuestionOption>| QuestionError::OptionCount(rest.len()))?;

        if options
            .iter()
            .zip(OptionKey::ALL)
            .any(|(option, key)| option.key != key)
        {
            return Err(QuestionError::OptionOrder);
        }
        if let Some(blank) = options.iter().find(|o| o.text.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(blank.key));
        }

        Ok(Self {
            id,
            subject,
            text,
            options,
            correct,
            explanation: explanation.into(),
            image_ref: None,
        })
    }

    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> &QuestionOption {
        // Options are stored in `OptionKey::ALL` order.
        &self.options[key as usize]
    }

    #[must_use]
    pub fn correct_answer(&self) -> OptionKey {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        key == self.correct
    }
}

// ─── TESTS ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn options(texts: [&str; 4]) -> Vec<QuestionOption> {
        OptionKey::ALL
            .into_iter()
            .zip(texts)
            .map(|(key, text)| QuestionOption::new(key, text))
            .collect()
    }

    #[test]
    fn valid_question_exposes_options_by_key() {
        let q = Question::new(
            QuestionId::new(1),
            Subject::Navigation,
            "해도 위에 편차가 기재되어 있는 부분은?",
            options(["해류도", "방위환", "나침도", "지방자기"]),
            OptionKey::C,
            "나침도에 편차가 기재된다.",
        )
        .unwrap();

        assert_eq!(q.option(OptionKey::C).text, "나침도");
        assert!(q.is_correct(OptionKey::C));
        assert!(!q.is_correct(OptionKey::A));
        assert_eq!(q.image_ref(), None);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Question::new(
            QuestionId::new(1),
            Subject::Law,
            "  ",
            options(["a", "b", "c", "d"]),
            OptionKey::A,
            "",
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn three_options_are_rejected() {
        let mut opts = options(["a", "b", "c", "d"]);
        opts.pop();
        let err = Question::new(QuestionId::new(1), Subject::Law, "q", opts, OptionKey::A, "")
            .unwrap_err();
        assert_eq!(err, QuestionError::OptionCount(3));
    }

    #[test]
    fn shuffled_option_keys_are_rejected() {
        let mut opts = options(["a", "b", "c", "d"]);
        opts.swap(0, 1);
        let err = Question::new(QuestionId::new(1), Subject::Law, "q", opts, OptionKey::A, "")
            .unwrap_err();
        assert_eq!(err, QuestionError::OptionOrder);
    }

    #[test]
    fn blank_option_is_rejected() {
        let err = Question::new(
            QuestionId::new(1),
            Subject::Law,
            "q",
            options(["a", "", "c", "d"]),
            OptionKey::A,
            "",
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption(OptionKey::B));
    }

    #[test]
    fn option_key_parses_lowercase() {
        assert_eq!("c".parse::<OptionKey>().unwrap(), OptionKey::C);
        assert!("E".parse::<OptionKey>().is_err());
    }
}
