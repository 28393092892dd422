//! Derived lifecycle phase of a cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase computed from the window, the clock and the terminal flag.
///
/// Nothing stores this value; it is recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Created, start date not reached yet.
    Upcoming,
    /// Within the window and not finalized.
    Active,
    /// Past the end date but not finalized; can still be extended.
    Elapsed,
    /// Finalized.
    Done,
}

impl CyclePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CyclePhase::Done)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CyclePhase::Upcoming => "upcoming",
            CyclePhase::Active => "active",
            CyclePhase::Elapsed => "elapsed",
            CyclePhase::Done => "done",
        };
        write!(f, "{}", s)
    }
}
