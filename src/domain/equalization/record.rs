//! The committee's final score for one collaborator in one cycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    require_text, CycleId, DomainError, EqualizationId, EvaluationId, FinalScore, StateMachine,
    Timestamp, UserId,
};

/// Lifecycle of the equalization attached to an evaluation header.
///
/// Returning to `Absent` only happens when the whole cycle is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualizationState {
    Absent,
    Saved,
    Edited,
}

impl StateMachine for EqualizationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            EqualizationState::Absent => vec![EqualizationState::Saved],
            EqualizationState::Saved | EqualizationState::Edited => vec![EqualizationState::Edited],
        }
    }
}

/// Validated score and justification supplied by the committee.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizationInput {
    pub score: FinalScore,
    pub justification: String,
}

impl EqualizationInput {
    pub fn new(score: f64, justification: &str) -> Result<Self, DomainError> {
        Ok(Self {
            score: FinalScore::try_new(score)?,
            justification: require_text("justification", justification)?,
        })
    }
}

/// Reason recorded for an edit submitted without one.
pub const DEFAULT_CHANGE_REASON: &str = "Atualização de equalização";

/// One edit in an equalization's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EqualizationAmendment {
    pub equalization_id: EqualizationId,
    /// Revision the edit produced, starting at 1.
    pub revision: u32,
    pub previous_score: FinalScore,
    pub new_score: FinalScore,
    pub change_reason: String,
    pub changed_by: Option<UserId>,
    pub changed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equalization {
    pub id: EqualizationId,
    pub evaluation_id: EvaluationId,
    pub cycle_id: CycleId,
    pub collaborator_id: UserId,
    pub score: FinalScore,
    pub justification: String,
    /// Number of edits since creation.
    pub revision: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Equalization {
    pub fn state(&self) -> EqualizationState {
        if self.revision == 0 {
            EqualizationState::Saved
        } else {
            EqualizationState::Edited
        }
    }

    /// Replaces score and justification, returning the history entry for the change.
    ///
    /// A blank `reason` records [`DEFAULT_CHANGE_REASON`].
    pub fn edit(
        &mut self,
        input: EqualizationInput,
        reason: Option<&str>,
        changed_by: Option<UserId>,
        now: Timestamp,
    ) -> Result<EqualizationAmendment, DomainError> {
        self.state().transition_to(EqualizationState::Edited)?;
        let previous_score = self.score;
        self.score = input.score;
        self.justification = input.justification;
        self.revision += 1;
        self.updated_at = now;

        let change_reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_CHANGE_REASON)
            .to_string();
        Ok(EqualizationAmendment {
            equalization_id: self.id,
            revision: self.revision,
            previous_score,
            new_score: self.score,
            change_reason,
            changed_by,
            changed_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCategory;

    fn saved() -> Equalization {
        let now = Timestamp::now();
        Equalization {
            id: EqualizationId::from_raw(1),
            evaluation_id: EvaluationId::from_raw(10),
            cycle_id: CycleId::from_raw(2),
            collaborator_id: UserId::from_raw(3),
            score: FinalScore::try_new(4.0).unwrap(),
            justification: "consistent delivery".to_string(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn absent_can_only_become_saved() {
        assert!(EqualizationState::Absent.can_transition_to(&EqualizationState::Saved));
        assert!(!EqualizationState::Absent.can_transition_to(&EqualizationState::Edited));
    }

    #[test]
    fn saved_cannot_be_saved_again() {
        assert!(EqualizationState::Saved.transition_to(EqualizationState::Saved).is_err());
    }

    #[test]
    fn edited_stays_edited() {
        assert!(EqualizationState::Edited.can_transition_to(&EqualizationState::Edited));
        assert!(!EqualizationState::Edited.is_terminal());
    }

    #[test]
    fn edit_replaces_fields_and_bumps_revision() {
        let mut eq = saved();
        let later = eq.created_at.plus_days(1);

        eq.edit(EqualizationInput::new(3.5, "reassessed").unwrap(), None, None, later)
            .unwrap();

        assert_eq!(eq.score.value(), 3.5);
        assert_eq!(eq.justification, "reassessed");
        assert_eq!(eq.state(), EqualizationState::Edited);
        assert_eq!(eq.updated_at, later);
    }

    #[test]
    fn edit_records_previous_and_new_score() {
        let mut eq = saved();
        let later = eq.created_at.plus_days(1);

        let amendment = eq
            .edit(
                EqualizationInput::new(2.5, "peer feedback").unwrap(),
                Some("  new evidence "),
                Some(UserId::from_raw(7)),
                later,
            )
            .unwrap();

        assert_eq!(amendment.equalization_id, eq.id);
        assert_eq!(amendment.revision, 1);
        assert_eq!(amendment.previous_score.value(), 4.0);
        assert_eq!(amendment.new_score.value(), 2.5);
        assert_eq!(amendment.change_reason, "new evidence");
        assert_eq!(amendment.changed_by, Some(UserId::from_raw(7)));
        assert_eq!(amendment.changed_at, later);
    }

    #[test]
    fn blank_reason_falls_back_to_default() {
        let mut eq = saved();
        let now = eq.created_at;

        let first = eq.edit(EqualizationInput::new(3.0, "a").unwrap(), Some(" "), None, now).unwrap();
        let second = eq.edit(EqualizationInput::new(3.5, "b").unwrap(), None, None, now).unwrap();

        assert_eq!(first.change_reason, DEFAULT_CHANGE_REASON);
        assert_eq!(second.change_reason, DEFAULT_CHANGE_REASON);
        assert_eq!(second.previous_score.value(), 3.0);
        assert_eq!(second.revision, 2);
    }

    #[test]
    fn input_validates_score_and_justification() {
        assert_eq!(
            EqualizationInput::new(6.0, "x").unwrap_err().category(),
            ErrorCategory::Validation
        );
        assert!(EqualizationInput::new(4.0, " ").is_err());
    }
}
