//! Rubric module - what is graded, per track, and at what weight.
//!
//! The draft rubric (`TrackCriterionWeight`) is edited between cycles. When a
//! cycle is created the draft is frozen into `CycleRubricRow`s that later
//! draft edits never touch.

mod entry;
mod taxonomy;
mod view;

pub use entry::{pillar_activation_rows, snapshot_rows, CycleRubricRow, TrackCriterionWeight};
pub use taxonomy::{Criterion, Pillar, Track};
pub use view::{CriterionWeight, PillarRubric, RubricLine, RubricView, TrackRubric};
