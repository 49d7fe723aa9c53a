use serde::{Deserialize, Deserializer, Serialize, Serializer};

const CORRECT_MARKER: &str = "정답";
const INCORRECT_MARKER: &str = "오답";

const FALLBACK_TIP: &str = "네트워크 연결을 확인하거나 잠시 후 다시 시도해주세요.";

// ─── OUTCOME ────────────────────────────────────────────────────────────────

/// Whether the submitted answer was right.
///
/// On the wire this is the `result` marker: `"정답"` / `"오답"`, with
/// `"Correct"` / `"Incorrect"` also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackOutcome {
    Correct,
    Incorrect,
}

impl FeedbackOutcome {
    #[must_use]
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Correct => CORRECT_MARKER,
            Self::Incorrect => INCORRECT_MARKER,
        }
    }

    #[must_use]
    pub fn from_marker(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == CORRECT_MARKER || raw.eq_ignore_ascii_case("correct") {
            Some(Self::Correct)
        } else if raw == INCORRECT_MARKER || raw.eq_ignore_ascii_case("incorrect") {
            Some(Self::Incorrect)
        } else {
            None
        }
    }
}

impl Serialize for FeedbackOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.marker())
    }
}

impl<'de> Deserialize<'de> for FeedbackOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_marker(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown feedback result: {raw}")))
    }
}

// ─── RESULT ─────────────────────────────────────────────────────────────────

/// Explanation shown for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
    #[serde(rename = "result")]
    pub outcome: FeedbackOutcome,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// Display-only; order is preserved as received.
    #[serde(rename = "relatedConcepts", default)]
    pub related_concepts: Vec<String>,
}

impl FeedbackResult {
    /// Locally synthesized result used when the feedback service cannot be reached.
    #[must_use]
    pub fn fallback(is_correct: bool, correct_answer: &str) -> Self {
        Self {
            outcome: FeedbackOutcome::from_correct(is_correct),
            explanation: format!(
                "AI 피드백을 가져오는 데 실패했습니다. 기본 해설입니다: 이 문제의 정답은 {correct_answer}입니다."
            ),
            tip: Some(FALLBACK_TIP.to_owned()),
            related_concepts: Vec::new(),
        }
    }

    /// Replace the outcome, keeping the explanation as is.
    #[must_use]
    pub fn with_outcome(mut self, outcome: FeedbackOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Drop a blank tip so callers only see `Some` when there is something to show.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.tip.as_deref().is_some_and(|tip| tip.trim().is_empty()) {
            self.tip = None;
        }
        self
    }
}

// ─── STATE ──────────────────────────────────────────────────────────────────

/// Lifecycle of the feedback for the current question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedbackState {
    #[default]
    Idle,
    Loading,
    Ready(FeedbackResult),
    /// The request never completed (the task was lost); no explanation to show.
    Unavailable,
}

impl FeedbackState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn result(&self) -> Option<&FeedbackResult> {
        match self {
            Self::Ready(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_payload_with_korean_marker() {
        let raw = r#"{
            "result": "정답",
            "explanation": "GM은 복원성의 지표입니다.",
            "tip": "G와 M의 위치를 그려보세요.",
            "relatedConcepts": ["GM", "복원력", "경심"]
        }"#;
        let parsed: FeedbackResult = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.outcome, FeedbackOutcome::Correct);
        assert_eq!(parsed.related_concepts, vec!["GM", "복원력", "경심"]);
    }

    #[test]
    fn optional_fields_default() {
        let raw = r#"{ "result": "Incorrect", "explanation": "x" }"#;
        let parsed: FeedbackResult = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.outcome, FeedbackOutcome::Incorrect);
        assert_eq!(parsed.tip, None);
        assert!(parsed.related_concepts.is_empty());
    }

    #[test]
    fn english_markers_ignore_case() {
        for (raw, expected) in [
            ("correct", FeedbackOutcome::Correct),
            ("CORRECT", FeedbackOutcome::Correct),
            (" incorrect ", FeedbackOutcome::Incorrect),
            ("InCorrect", FeedbackOutcome::Incorrect),
        ] {
            assert_eq!(FeedbackOutcome::from_marker(raw), Some(expected));
        }
        let parsed: FeedbackResult =
            serde_json::from_str(r#"{ "result": "incorrect", "explanation": "x" }"#).unwrap();
        assert_eq!(parsed.outcome, FeedbackOutcome::Incorrect);
    }

    #[test]
    fn unknown_marker_fails_to_parse() {
        let raw = r#"{ "result": "maybe", "explanation": "x" }"#;
        assert!(serde_json::from_str::<FeedbackResult>(raw).is_err());
    }

    #[test]
    fn fallback_names_correct_answer() {
        let fallback = FeedbackResult::fallback(false, "C");
        assert_eq!(fallback.outcome, FeedbackOutcome::Incorrect);
        assert!(fallback.explanation.contains('C'));
        assert!(fallback.tip.is_some());
        assert!(fallback.related_concepts.is_empty());
    }

    #[test]
    fn normalized_drops_blank_tip() {
        let result = FeedbackResult {
            outcome: FeedbackOutcome::Correct,
            explanation: "x".into(),
            tip: Some("  ".into()),
            related_concepts: Vec::new(),
        };
        assert_eq!(result.normalized().tip, None);
    }

    #[test]
    fn serializes_outcome_as_marker() {
        let json = serde_json::to_value(FeedbackResult::fallback(true, "A")).unwrap();
        assert_eq!(json["result"], "정답");
        assert_eq!(json["relatedConcepts"], serde_json::json!([]));
    }
}
