//! Request bodies for evaluation endpoints.
//!
//! Payloads arrive with raw scores and texts and go through the domain
//! constructors, so a blank justification or a score outside `1..=5` is a
//! validation error rather than a deserialization failure.

use serde::Deserialize;

use crate::domain::evaluation::{
    EvaluationPayload, LeaderReview, ManagerItem, MentoringReview, PeerReview, ReferenceNote,
    SelfAssessmentItem, SourceKind,
};
use crate::domain::foundation::{CriterionId, CycleId, PillarId, Score, UserId, ValidationError};
use crate::domain::people::ImportRow;

// ════════════════════════════════════════════════════════════════════════════════
// Payloads
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SelfAssessmentItemRequest {
    pub pillar_id: PillarId,
    pub criterion_id: CriterionId,
    pub score: i64,
    pub justification: String,
}

impl SelfAssessmentItemRequest {
    pub fn into_item(self) -> Result<SelfAssessmentItem, ValidationError> {
        SelfAssessmentItem::new(
            self.pillar_id,
            self.criterion_id,
            Score::try_new(self.score)?,
            &self.justification,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagerItemRequest {
    pub criterion_id: CriterionId,
    pub score: i64,
    pub justification: String,
}

/// Mirrors [`EvaluationPayload`]'s `{"kind": .., "body": ..}` shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "body")]
pub enum PayloadRequest {
    #[serde(rename = "self_assessment")]
    SelfAssessment(Vec<SelfAssessmentItemRequest>),
    #[serde(rename = "evaluation_360")]
    Peer360 {
        score: i64,
        strengths: String,
        improvements: String,
    },
    #[serde(rename = "mentoring")]
    Mentoring { score: i64, justification: String },
    #[serde(rename = "reference")]
    Reference {
        justification: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    #[serde(rename = "manager")]
    Manager(Vec<ManagerItemRequest>),
    #[serde(rename = "leader")]
    Leader {
        score: i64,
        justification: String,
        #[serde(default)]
        strengths: Option<String>,
        #[serde(default)]
        improvements: Option<String>,
    },
}

impl PayloadRequest {
    pub fn into_payload(self) -> Result<EvaluationPayload, ValidationError> {
        Ok(match self {
            PayloadRequest::SelfAssessment(items) => EvaluationPayload::SelfAssessment(
                items
                    .into_iter()
                    .map(SelfAssessmentItemRequest::into_item)
                    .collect::<Result<_, _>>()?,
            ),
            PayloadRequest::Peer360 {
                score,
                strengths,
                improvements,
            } => EvaluationPayload::Peer360(PeerReview::new(Score::try_new(score)?, &strengths, &improvements)?),
            PayloadRequest::Mentoring { score, justification } => {
                EvaluationPayload::Mentoring(MentoringReview::new(Score::try_new(score)?, &justification)?)
            }
            PayloadRequest::Reference { justification, tags } => {
                EvaluationPayload::Reference(ReferenceNote::new(&justification, tags)?)
            }
            PayloadRequest::Manager(items) => EvaluationPayload::Manager(
                items
                    .into_iter()
                    .map(|i| ManagerItem::new(i.criterion_id, Score::try_new(i.score)?, &i.justification))
                    .collect::<Result<_, _>>()?,
            ),
            PayloadRequest::Leader {
                score,
                justification,
                strengths,
                improvements,
            } => EvaluationPayload::Leader(LeaderReview::new(
                Score::try_new(score)?,
                &justification,
                strengths,
                improvements,
            )?),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub evaluator_id: UserId,
    pub evaluatee_id: UserId,
    #[serde(default)]
    pub cycle_id: Option<CycleId>,
    /// Header kind; defaults to the payload's own kind.
    #[serde(default)]
    pub kind: Option<SourceKind>,
    pub payload: PayloadRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSelfAssessmentRequest {
    pub collaborator_id: UserId,
    #[serde(default)]
    pub cycle_id: Option<CycleId>,
    pub items: Vec<SelfAssessmentItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingParams {
    pub evaluator_id: UserId,
    pub cycle_id: Option<CycleId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportUsersRequest {
    pub rows: Vec<ImportRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn peer_payload_is_built_through_constructors() {
        let req: PayloadRequest = serde_json::from_value(json!({
            "kind": "evaluation_360",
            "body": {"score": 4, "strengths": "clear", "improvements": "pace"}
        }))
        .unwrap();

        let payload = req.into_payload().unwrap();

        assert_eq!(payload.kind(), SourceKind::Peer360);
        assert_eq!(payload.scores(), vec![4.0]);
    }

    #[test]
    fn out_of_range_score_is_a_validation_error() {
        let req: PayloadRequest = serde_json::from_value(json!({
            "kind": "mentoring",
            "body": {"score": 6, "justification": "x"}
        }))
        .unwrap();

        assert!(req.into_payload().is_err());
    }

    #[test]
    fn blank_manager_justification_is_rejected() {
        let req: PayloadRequest = serde_json::from_value(json!({
            "kind": "manager",
            "body": [{"criterion_id": 1, "score": 3, "justification": "  "}]
        }))
        .unwrap();

        assert!(req.into_payload().is_err());
    }
}
