//! Evaluation module - headers and the payloads attached to them.
//!
//! A header records evaluator, evaluatee, cycle and source kind. It owns at
//! most one payload, whose variant must match the header's kind.

mod header;
mod payload;
mod source;

pub use header::{Evaluation, EvaluationKey, EvaluationRecord, EvaluationStatus};
pub use payload::{
    kind_mismatch, EvaluationPayload, LeaderReview, ManagerItem, MentoringReview, PeerReview,
    ReferenceNote, SelfAssessmentItem,
};
pub use source::SourceKind;
