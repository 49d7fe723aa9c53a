//! Loader for the question bank's exam document format.
//!
//! ```json
//! { "subject": { "name": "6급", "year": 2023, "inning": 1, "type": [
//!     { "string": "항해", "questions": [
//!         { "num": 1, "questionsStr": "...", "ex1Str": "...", "ex2Str": "...",
//!           "ex3Str": "...", "ex4Str": "...", "answer": "가", "image_ref": null } ] } ] } }
//! ```

use serde::Deserialize;

use exam_core::model::{
    ExamSittingId, ExamYear, OptionKey, Question, QuestionId, QuestionOption, Subject,
};

use crate::error::ExamDocumentError;

#[derive(Debug, Clone, Deserialize)]
pub struct ExamDocument {
    subject: ExamDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ExamDetail {
    name: String,
    year: u16,
    inning: u32,
    #[serde(rename = "type")]
    sections: Vec<SubjectSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubjectSection {
    #[serde(rename = "string", default)]
    name: String,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuestion {
    num: u32,
    #[serde(rename = "questionsStr", default)]
    text: String,
    #[serde(rename = "ex1Str")]
    ex1: Option<String>,
    #[serde(rename = "ex2Str")]
    ex2: Option<String>,
    #[serde(rename = "ex3Str")]
    ex3: Option<String>,
    #[serde(rename = "ex4Str")]
    ex4: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    image_ref: Option<String>,
}

impl ExamDocument {
    /// # Errors
    ///
    /// Returns `ExamDocumentError::Json` if `json` does not match the document shape.
    pub fn from_json(json: &str) -> Result<Self, ExamDocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grade label as written in the document (e.g. "6급").
    #[must_use]
    pub fn grade_name(&self) -> &str {
        &self.subject.name
    }

    #[must_use]
    pub fn year(&self) -> ExamYear {
        ExamYear::new(self.subject.year)
    }

    #[must_use]
    pub fn sitting(&self) -> ExamSittingId {
        ExamSittingId::new(self.subject.inning)
    }

    /// Flatten every subject section into one ordered list.
    ///
    /// Sections for subjects outside the catalog (e.g. 영어) and questions that
    /// cannot be used are skipped with a warning; the rest of the document
    /// still loads. Question ids are assigned 1.. over the kept questions in
    /// document order, since `num` restarts per subject.
    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        let mut questions = Vec::new();
        for section in self.subject.sections {
            let subject = match Subject::from_name(&section.name) {
                Ok(subject) => subject,
                Err(err) => {
                    tracing::warn!(
                        section = %section.name,
                        skipped = section.questions.len(),
                        error = %err,
                        "skipping exam section"
                    );
                    continue;
                }
            };
            for raw in section.questions {
                let num = raw.num;
                let id = QuestionId::new(u32::try_from(questions.len() + 1).unwrap_or(u32::MAX));
                match raw.into_question(id, subject) {
                    Ok(question) => questions.push(question),
                    Err(err) => {
                        tracing::warn!(num, subject = %subject, error = %err, "skipping question");
                    }
                }
            }
        }
        questions
    }
}

impl RawQuestion {
    fn into_question(self, id: QuestionId, subject: Subject) -> Result<Question, ExamDocumentError> {
        let num = self.num;
        let raw_answer = self.answer.unwrap_or_default();
        let correct = parse_answer(&raw_answer)
            .ok_or(ExamDocumentError::UnknownAnswer { num, raw: raw_answer })?;

        let texts = [
            (OptionKey::A, "ex1Str", self.ex1),
            (OptionKey::B, "ex2Str", self.ex2),
            (OptionKey::C, "ex3Str", self.ex3),
            (OptionKey::D, "ex4Str", self.ex4),
        ];
        let mut options = Vec::with_capacity(texts.len());
        for (key, field, text) in texts {
            let text = text.ok_or(ExamDocumentError::MissingOption { num, option: field })?;
            options.push(QuestionOption::new(key, text));
        }

        let question = Question::new(id, subject, self.text, options, correct, String::new())
            .map_err(|source| ExamDocumentError::Question { num, source })?;

        Ok(match self.image_ref {
            Some(image_ref) if !image_ref.trim().is_empty() => question.with_image_ref(image_ref),
            _ => question,
        })
    }
}

/// Map an answer marker to an option key.
///
/// Korean exams label options 가/나/다/라. The bank also contains 사 and 아,
/// which are mapped to D and A respectively.
fn parse_answer(raw: &str) -> Option<OptionKey> {
    match raw.trim() {
        "가" | "아" => Some(OptionKey::A),
        "나" => Some(OptionKey::B),
        "다" => Some(OptionKey::C),
        "라" | "사" => Some(OptionKey::D),
        other => other.parse().ok(),
    }
}
