//! Guarded transitions for lifecycle enums.

use super::ValidationError;

/// A lifecycle enum whose moves are checked before they happen.
///
/// Implementors list the reachable states; `transition_to` rejects the rest.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    fn valid_transitions(&self) -> Vec<Self>;

    /// `target`, or a validation error naming both ends of the move.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(ValidationError::invalid_format(
            "state",
            format!("{:?} cannot move to {:?}", self, target),
        ))
    }

    /// No outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
