//! Scoring module - read-side aggregation over evaluations.
//!
//! Everything here is pure: callers load the records once for a resolved
//! cycle and pass them in. Missing sources surface as `None`, never as zero.

mod average;
mod committee;
mod dashboard;
mod evolution;
mod export;
mod summary;

pub use average::{average_of, round_to, SourceAverages};
pub use committee::{days_until, CommitteeOverview, CommitteeRow};
pub use dashboard::{role_completion, CompletionCounts, CycleLabel, DashboardStats, RoleCompletion};
pub use evolution::{Evolution, EvolutionIter, EvolutionPoint};
pub use export::{export_rows, ExportRow};
pub use summary::{CollaboratorSummary, CompletionStatus, EqualizationSummary};
