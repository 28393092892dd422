//! Kinds of evaluation sources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Discriminant of the payload an evaluation header carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    SelfAssessment,
    #[serde(rename = "evaluation_360")]
    Peer360,
    Mentoring,
    Reference,
    Manager,
    Leader,
}

impl SourceKind {
    pub fn all() -> &'static [SourceKind] {
        &[
            SourceKind::SelfAssessment,
            SourceKind::Peer360,
            SourceKind::Mentoring,
            SourceKind::Reference,
            SourceKind::Manager,
            SourceKind::Leader,
        ]
    }

    /// Every kind except the self-assessment is written about someone else.
    pub fn requires_distinct_evaluator(&self) -> bool {
        !matches!(self, SourceKind::SelfAssessment)
    }

    /// List-shaped payloads hold one entry per criterion.
    pub fn is_per_criterion(&self) -> bool {
        matches!(self, SourceKind::SelfAssessment | SourceKind::Manager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::SelfAssessment => "self_assessment",
            SourceKind::Peer360 => "evaluation_360",
            SourceKind::Mentoring => "mentoring",
            SourceKind::Reference => "reference",
            SourceKind::Manager => "manager",
            SourceKind::Leader => "leader",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("kind", format!("unknown source '{}'", s)))
    }
}
