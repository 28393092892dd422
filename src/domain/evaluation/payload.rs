//! Specialized evaluation payloads, one variant per source kind.

use serde::{Deserialize, Serialize};

use super::SourceKind;
use crate::domain::foundation::{
    require_text, CriterionId, DomainError, ErrorCode, PillarId, Score, ValidationError,
};

/// One criterion of a self-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfAssessmentItem {
    pub pillar_id: PillarId,
    pub criterion_id: CriterionId,
    pub score: Score,
    pub justification: String,
}

impl SelfAssessmentItem {
    pub fn new(
        pillar_id: PillarId,
        criterion_id: CriterionId,
        score: Score,
        justification: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            pillar_id,
            criterion_id,
            score,
            justification: require_text("justification", justification)?,
        })
    }
}

/// One criterion of a manager evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerItem {
    pub criterion_id: CriterionId,
    pub score: Score,
    pub justification: String,
}

impl ManagerItem {
    pub fn new(criterion_id: CriterionId, score: Score, justification: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            criterion_id,
            score,
            justification: require_text("justification", justification)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerReview {
    pub score: Score,
    pub strengths: String,
    pub improvements: String,
}

impl PeerReview {
    pub fn new(score: Score, strengths: &str, improvements: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            score,
            strengths: require_text("strengths", strengths)?,
            improvements: require_text("improvements", improvements)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentoringReview {
    pub score: Score,
    pub justification: String,
}

impl MentoringReview {
    pub fn new(score: Score, justification: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            score,
            justification: require_text("justification", justification)?,
        })
    }
}

/// Free-text reference; carries no score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceNote {
    pub justification: String,
    pub tags: Vec<String>,
}

impl ReferenceNote {
    pub fn new(justification: &str, tags: Vec<String>) -> Result<Self, ValidationError> {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tags.dedup();
        Ok(Self {
            justification: require_text("justification", justification)?,
            tags,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderReview {
    pub score: Score,
    pub justification: String,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
}

impl LeaderReview {
    pub fn new(
        score: Score,
        justification: &str,
        strengths: Option<String>,
        improvements: Option<String>,
    ) -> Result<Self, ValidationError> {
        let optional = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Ok(Self {
            score,
            justification: require_text("justification", justification)?,
            strengths: optional(strengths),
            improvements: optional(improvements),
        })
    }
}

/// Content attached to an evaluation header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body")]
pub enum EvaluationPayload {
    #[serde(rename = "self_assessment")]
    SelfAssessment(Vec<SelfAssessmentItem>),
    #[serde(rename = "evaluation_360")]
    Peer360(PeerReview),
    #[serde(rename = "mentoring")]
    Mentoring(MentoringReview),
    #[serde(rename = "reference")]
    Reference(ReferenceNote),
    #[serde(rename = "manager")]
    Manager(Vec<ManagerItem>),
    #[serde(rename = "leader")]
    Leader(LeaderReview),
}

impl EvaluationPayload {
    pub fn kind(&self) -> SourceKind {
        match self {
            EvaluationPayload::SelfAssessment(_) => SourceKind::SelfAssessment,
            EvaluationPayload::Peer360(_) => SourceKind::Peer360,
            EvaluationPayload::Mentoring(_) => SourceKind::Mentoring,
            EvaluationPayload::Reference(_) => SourceKind::Reference,
            EvaluationPayload::Manager(_) => SourceKind::Manager,
            EvaluationPayload::Leader(_) => SourceKind::Leader,
        }
    }

    /// Every numeric score the payload holds, in entry order.
    pub fn scores(&self) -> Vec<f64> {
        match self {
            EvaluationPayload::SelfAssessment(items) => items.iter().map(|i| i.score.as_f64()).collect(),
            EvaluationPayload::Manager(items) => items.iter().map(|i| i.score.as_f64()).collect(),
            EvaluationPayload::Peer360(r) => vec![r.score.as_f64()],
            EvaluationPayload::Mentoring(r) => vec![r.score.as_f64()],
            EvaluationPayload::Leader(r) => vec![r.score.as_f64()],
            EvaluationPayload::Reference(_) => Vec::new(),
        }
    }

    /// True for list payloads without entries.
    pub fn is_empty(&self) -> bool {
        match self {
            EvaluationPayload::SelfAssessment(items) => items.is_empty(),
            EvaluationPayload::Manager(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Combines an incoming payload with the stored one.
    ///
    /// Per-criterion payloads are upserted by criterion; scalar payloads are
    /// replaced. Kinds must match.
    pub fn merge(self, incoming: EvaluationPayload) -> Result<EvaluationPayload, DomainError> {
        match (self, incoming) {
            (EvaluationPayload::SelfAssessment(mut stored), EvaluationPayload::SelfAssessment(new)) => {
                for item in new {
                    upsert_by(&mut stored, item, |i| i.criterion_id);
                }
                Ok(EvaluationPayload::SelfAssessment(stored))
            }
            (EvaluationPayload::Manager(mut stored), EvaluationPayload::Manager(new)) => {
                for item in new {
                    upsert_by(&mut stored, item, |i| i.criterion_id);
                }
                Ok(EvaluationPayload::Manager(stored))
            }
            (stored, incoming) if stored.kind() == incoming.kind() => Ok(incoming),
            (stored, incoming) => Err(kind_mismatch(stored.kind(), incoming.kind())),
        }
    }
}

/// Conflict raised when a header already carries another payload kind.
pub fn kind_mismatch(expected: SourceKind, actual: SourceKind) -> DomainError {
    DomainError::new(
        ErrorCode::PayloadKindMismatch,
        format!(
            "Evaluation holds a {} payload and cannot take a {} payload",
            expected, actual
        ),
    )
    .with_detail("expected", expected.as_str())
    .with_detail("actual", actual.as_str())
}

fn upsert_by<T, K: PartialEq>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> K) {
    let k = key(&item);
    match items.iter_mut().find(|existing| key(existing) == k) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}
