//! Scoring handlers - read-side queries over evaluations and equalizations.

mod collaborator_summary;
mod committee_overview;
mod cycle_resolver;
mod dashboard_stats;
mod evolution;
mod export_rows;

pub use collaborator_summary::{CollaboratorSummaryHandler, CollaboratorSummaryQuery};
pub use committee_overview::{CommitteeOverviewHandler, CommitteeOverviewQuery};
pub use cycle_resolver::{CycleRef, CycleResolver, ResolvedCycle};
pub use dashboard_stats::{DashboardQuery, DashboardStatsHandler, RoleCompletionHandler};
pub use evolution::{EvolutionHandler, EvolutionQuery};
pub use export_rows::{ExportRowsHandler, ExportRowsQuery};
