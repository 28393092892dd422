//! Strongly-typed identifier value objects.
//!
//! All persisted entities are keyed by positive integers assigned by storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id from caller input, rejecting non-positive values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        format!("must be a positive integer, got {}", value),
                    ));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from storage.
            pub fn from_raw(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: i64 = s.trim().parse().map_err(|_| {
                    ValidationError::invalid_format($field, format!("'{}' is not an integer", s))
                })?;
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Identifier of an evaluation cycle.
    CycleId,
    "cycle_id"
);
define_id!(
    /// Identifier of a career track.
    TrackId,
    "track_id"
);
define_id!(
    /// Identifier of a pillar (criteria group).
    PillarId,
    "pillar_id"
);
define_id!(
    /// Identifier of a single rubric criterion.
    CriterionId,
    "criterion_id"
);
define_id!(
    /// Identifier of a person, whether evaluator or evaluatee.
    UserId,
    "user_id"
);
define_id!(
    /// Identifier of an evaluation header.
    EvaluationId,
    "evaluation_id"
);
define_id!(
    /// Identifier of an equalization record.
    EqualizationId,
    "equalization_id"
);
