use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ─── EXAM TYPE ──────────────────────────────────────────────────────────────

/// Top-level licensing track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Navigator,
    Engineer,
    SmallCraft,
}

impl ExamType {
    pub const ALL: [ExamType; 3] = [ExamType::Navigator, ExamType::Engineer, ExamType::SmallCraft];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ExamType::Navigator => "navigator",
            ExamType::Engineer => "engineer",
            ExamType::SmallCraft => "small_craft",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExamType::Navigator => "항해사",
            ExamType::Engineer => "기관사",
            ExamType::SmallCraft => "소형선박조종사",
        }
    }
}

// ─── GRADE ──────────────────────────────────────────────────────────────────

/// Certification level within an exam type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    /// Sixth grade restricted to domestic merchant vessels.
    SixthDomestic,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Grade::First,
        Grade::Second,
        Grade::Third,
        Grade::Fourth,
        Grade::Fifth,
        Grade::Sixth,
        Grade::SixthDomestic,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Grade::First => "1",
            Grade::Second => "2",
            Grade::Third => "3",
            Grade::Fourth => "4",
            Grade::Fifth => "5",
            Grade::Sixth => "6",
            Grade::SixthDomestic => "6_domestic",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Grade::First => "1급",
            Grade::Second => "2급",
            Grade::Third => "3급",
            Grade::Fourth => "4급",
            Grade::Fifth => "5급",
            Grade::Sixth => "6급",
            Grade::SixthDomestic => "6급 (국내한정 상선)",
        }
    }
}

// ─── SUBJECT ────────────────────────────────────────────────────────────────

/// Topical category a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Navigation,
    Operation,
    Law,
    Cargo,
    Fishing,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Navigation,
        Subject::Operation,
        Subject::Law,
        Subject::Cargo,
        Subject::Fishing,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Subject::Navigation => "navigation",
            Subject::Operation => "operation",
            Subject::Law => "law",
            Subject::Cargo => "cargo",
            Subject::Fishing => "fishing",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Subject::Navigation => "항해",
            Subject::Operation => "운용",
            Subject::Law => "법규",
            Subject::Cargo => "상선전문",
            Subject::Fishing => "어선전문",
        }
    }

    /// Resolves a subject from either its id or its Korean label.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unknown` if nothing matches.
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(name) || s.label() == name)
            .ok_or_else(|| CatalogError::Unknown {
                kind: "subject",
                raw: name.to_owned(),
            })
    }
}

// ─── MODE ───────────────────────────────────────────────────────────────────

/// Practice vs real exam presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamMode {
    #[default]
    Practice,
    Real,
}

impl ExamMode {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ExamMode::Practice => "practice",
            ExamMode::Real => "real",
        }
    }
}

// ─── FROMSTR / DISPLAY ──────────────────────────────────────────────────────

fn parse_by_id<T: Copy>(
    all: &[T],
    id: impl Fn(T) -> &'static str,
    kind: &'static str,
    raw: &str,
) -> Result<T, CatalogError> {
    let raw = raw.trim();
    all.iter()
        .copied()
        .find(|item| id(*item) == raw)
        .ok_or_else(|| CatalogError::Unknown {
            kind,
            raw: raw.to_owned(),
        })
}

impl FromStr for ExamType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_id(&Self::ALL, Self::id, "exam type", s)
    }
}

impl FromStr for Grade {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_id(&Self::ALL, Self::id, "grade", s)
    }
}

impl FromStr for Subject {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_id(&Self::ALL, Self::id, "subject", s)
    }
}

impl FromStr for ExamMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_id(&[ExamMode::Practice, ExamMode::Real], Self::id, "mode", s)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_parses_domestic_variant() {
        assert_eq!("6_domestic".parse::<Grade>().unwrap(), Grade::SixthDomestic);
    }

    #[test]
    fn subject_resolves_from_label_and_id() {
        assert_eq!(Subject::from_name("법규").unwrap(), Subject::Law);
        assert_eq!(Subject::from_name("Cargo").unwrap(), Subject::Cargo);
    }

    #[test]
    fn unknown_exam_type_is_rejected() {
        let err = "pilot".parse::<ExamType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown exam type: pilot");
    }

    #[test]
    fn mode_defaults_to_practice() {
        assert_eq!(ExamMode::default(), ExamMode::Practice);
        assert_eq!("real".parse::<ExamMode>().unwrap(), ExamMode::Real);
    }
}
