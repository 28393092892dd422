//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the review cycle domain.

mod calendar;
mod errors;
mod ids;
mod percentage;
mod score;
mod state_machine;
mod timestamp;

pub use calendar::OrgCalendar;
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{CriterionId, CycleId, EqualizationId, EvaluationId, PillarId, TrackId, UserId};
pub use percentage::Percentage;
pub use score::{FinalScore, Score, Weight};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

/// Rejects blank text, returning the trimmed value.
pub fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
