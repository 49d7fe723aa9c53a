use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Position-derived id of a question within a loaded exam, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u32);

impl QuestionId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── EXAM YEAR ──────────────────────────────────────────────────────────────

/// Calendar year an exam was held in.
///
/// Documents may carry any year; `ALL` lists the years offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExamYear(u16);

impl ExamYear {
    pub const ALL: [ExamYear; 2] = [ExamYear(2022), ExamYear(2023)];

    #[must_use]
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    #[must_use]
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Stable selection id, the year's digits (e.g. "2023").
    #[must_use]
    pub fn id(self) -> String {
        self.0.to_string()
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("{}년 시행", self.0)
    }
}

impl fmt::Display for ExamYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExamYear {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number(s, "exam year").map(Self)
    }
}

// ─── EXAM SITTING ───────────────────────────────────────────────────────────

/// Sitting (inning) number of an exam within its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExamSittingId(u32);

impl ExamSittingId {
    pub const ALL: [ExamSittingId; 4] = [
        ExamSittingId(1),
        ExamSittingId(2),
        ExamSittingId(3),
        ExamSittingId(4),
    ];

    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Stable selection id, the sitting number (e.g. "1").
    #[must_use]
    pub fn id(self) -> String {
        self.0.to_string()
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("{}회 기출문제", self.0)
    }
}

impl fmt::Display for ExamSittingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExamSittingId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number(s, "exam sitting").map(Self)
    }
}

fn parse_number<N: FromStr>(raw: &str, kind: &'static str) -> Result<N, CatalogError> {
    let raw = raw.trim();
    raw.parse().map_err(|_| CatalogError::Unknown {
        kind,
        raw: raw.to_owned(),
    })
}

// ─── TESTS ──────────────────────────────────────────────────────────────────
