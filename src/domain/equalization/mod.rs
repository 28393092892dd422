//! Equalization module - the single authoritative final score per evaluation.

mod record;

pub use record::{
    Equalization, EqualizationAmendment, EqualizationInput, EqualizationState, DEFAULT_CHANGE_REASON,
};
