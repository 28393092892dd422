//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, one area
//! per submodule. Each handler takes its ports as `Arc<dyn Port>` at
//! construction and exposes a single async `handle`.

pub mod cycle;
pub mod equalization;
pub mod evaluation;
pub mod people;
pub mod rubric;
pub mod scoring;

pub use cycle::{
    CancelCycleCommand, CancelCycleHandler, CancelCycleResult, CreateCycleCommand,
    CreateCycleHandler, CreateCycleResult, ExtendCycleCommand, ExtendCycleHandler,
    FinalizeCycleCommand, FinalizeCycleHandler, FindActiveCycleHandler, GetCycleHandler,
    GetCycleQuery, ListCyclesHandler, SetCurrentCycleCommand, SetCurrentCycleHandler,
    UpdateCycleCommand, UpdateCycleHandler,
};
pub use equalization::{
    EditEqualizationCommand, EditEqualizationHandler, GetEqualizationHandler,
    GetEqualizationHistoryHandler, GetEqualizationHistoryQuery, GetEqualizationQuery,
    SaveEqualizationCommand, SaveEqualizationHandler,
};
pub use evaluation::{
    PendingForHandler, PendingForQuery, SubmitEvaluationCommand, SubmitEvaluationHandler,
    SubmitSelfAssessmentCommand, SubmitSelfAssessmentHandler,
};
pub use people::{ImportUsersCommand, ImportUsersHandler};
pub use rubric::{
    GetActiveCriteriaHandler, GetActiveCriteriaQuery, GetCycleRubricHandler, GetCycleRubricQuery,
    RemoveTrackConfigCommand, RemoveTrackConfigHandler, UpdateCycleRubricCommand,
    UpdateCycleRubricHandler, UpsertTrackConfigCommand, UpsertTrackConfigHandler,
    UpsertTrackConfigResult,
};
pub use scoring::{
    CollaboratorSummaryHandler, CollaboratorSummaryQuery, CommitteeOverviewHandler,
    CommitteeOverviewQuery, CycleRef, CycleResolver, DashboardQuery, DashboardStatsHandler,
    EvolutionHandler, EvolutionQuery, ExportRowsHandler, ExportRowsQuery, ResolvedCycle,
    RoleCompletionHandler,
};
