//! Evaluation header: who evaluates whom, in which cycle, through which source.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{kind_mismatch, EvaluationPayload, SourceKind};
use crate::domain::foundation::{
    CycleId, DomainError, ErrorCode, EvaluationId, Timestamp, UserId,
};

/// Identity of an evaluation; at most one header exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationKey {
    pub evaluator_id: UserId,
    pub evaluatee_id: UserId,
    pub cycle_id: CycleId,
    pub kind: SourceKind,
}

impl EvaluationKey {
    /// Builds a key, rejecting self-review for every source but the self-assessment.
    pub fn new(
        evaluator_id: UserId,
        evaluatee_id: UserId,
        cycle_id: CycleId,
        kind: SourceKind,
    ) -> Result<Self, DomainError> {
        let same_person = evaluator_id == evaluatee_id;
        if kind.requires_distinct_evaluator() && same_person {
            return Err(DomainError::new(
                ErrorCode::SelfReview,
                format!("A {} evaluation cannot target its own author", kind),
            )
            .with_detail("user_id", evaluator_id.to_string()));
        }
        if !kind.requires_distinct_evaluator() && !same_person {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "A self-assessment must be written by the evaluatee",
            )
            .with_detail("evaluator_id", evaluator_id.to_string())
            .with_detail("evaluatee_id", evaluatee_id.to_string()));
        }
        Ok(Self {
            evaluator_id,
            evaluatee_id,
            cycle_id,
            kind,
        })
    }

    /// Key of a collaborator's self-assessment in a cycle.
    pub fn self_assessment(collaborator: UserId, cycle_id: CycleId) -> Self {
        Self {
            evaluator_id: collaborator,
            evaluatee_id: collaborator,
            cycle_id,
            kind: SourceKind::SelfAssessment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    Completed,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Pending => "pending",
            EvaluationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header shared by every evaluation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub key: EvaluationKey,
    pub status: EvaluationStatus,
    pub created_at: Timestamp,
}

impl Evaluation {
    pub fn new(id: EvaluationId, key: EvaluationKey, created_at: Timestamp) -> Self {
        Self {
            id,
            key,
            status: EvaluationStatus::Pending,
            created_at,
        }
    }

    pub fn evaluator_id(&self) -> UserId {
        self.key.evaluator_id
    }

    pub fn evaluatee_id(&self) -> UserId {
        self.key.evaluatee_id
    }

    pub fn cycle_id(&self) -> CycleId {
        self.key.cycle_id
    }

    pub fn kind(&self) -> SourceKind {
        self.key.kind
    }
}

/// A header together with its payload, if one was attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRecord {
    pub header: Evaluation,
    pub payload: Option<EvaluationPayload>,
}

impl EvaluationRecord {
    pub fn pending(header: Evaluation) -> Self {
        Self { header, payload: None }
    }

    /// Completed means a non-empty payload is attached.
    pub fn is_completed(&self) -> bool {
        self.payload.as_ref().map_or(false, |p| !p.is_empty())
    }

    /// Attaches or merges a payload, enforcing the header's kind.
    pub fn attach(&mut self, incoming: EvaluationPayload) -> Result<(), DomainError> {
        if incoming.kind() != self.header.kind() {
            return Err(kind_mismatch(self.header.kind(), incoming.kind())
                .with_detail("evaluation_id", self.header.id.to_string()));
        }
        let merged = match self.payload.take() {
            Some(stored) => stored.merge(incoming)?,
            None => incoming,
        };
        self.header.status = if merged.is_empty() {
            EvaluationStatus::Pending
        } else {
            EvaluationStatus::Completed
        };
        self.payload = Some(merged);
        Ok(())
    }

    pub fn scores(&self) -> Vec<f64> {
        self.payload.as_ref().map(|p| p.scores()).unwrap_or_default()
    }
}
