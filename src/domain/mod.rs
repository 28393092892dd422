//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, calendar)
//! - `rubric` - Tracks, pillars, criteria and the draft/frozen weight rows
//! - `cycle` - Evaluation cycle aggregate and derived lifecycle phase
//! - `evaluation` - Evaluation headers and their source-specific payloads
//! - `equalization` - The committee's final score per evaluation
//! - `people` - Users, roles, and import normalization
//! - `scoring` - Pure aggregation: averages, summaries, dashboards, exports

pub mod cycle;
pub mod equalization;
pub mod evaluation;
pub mod foundation;
pub mod people;
pub mod rubric;
pub mod scoring;
