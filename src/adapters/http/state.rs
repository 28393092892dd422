//! Shared application state and handler factories.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresCycleRepository, PostgresEqualizationRepository, PostgresEvaluationRepository,
    PostgresRubricRepository, PostgresSystemSettings, PostgresUserDirectory,
};
use crate::application::handlers::{
    CancelCycleHandler, CollaboratorSummaryHandler, CommitteeOverviewHandler, CreateCycleHandler,
    CycleResolver, DashboardStatsHandler, EditEqualizationHandler, EvolutionHandler,
    ExportRowsHandler, ExtendCycleHandler, FinalizeCycleHandler, FindActiveCycleHandler,
    GetActiveCriteriaHandler, GetCycleHandler, GetCycleRubricHandler, GetEqualizationHandler,
    GetEqualizationHistoryHandler,
    ImportUsersHandler, ListCyclesHandler, PendingForHandler, RemoveTrackConfigHandler,
    RoleCompletionHandler, SaveEqualizationHandler, SetCurrentCycleHandler,
    SubmitEvaluationHandler, SubmitSelfAssessmentHandler, UpdateCycleHandler,
    UpdateCycleRubricHandler, UpsertTrackConfigHandler,
};
use crate::domain::foundation::OrgCalendar;
use crate::ports::{
    Clock, CycleRepository, EqualizationRepository, EvaluationRepository, RubricRepository,
    SystemSettings, UserDirectory,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub rubric: Arc<dyn RubricRepository>,
    pub cycles: Arc<dyn CycleRepository>,
    pub evaluations: Arc<dyn EvaluationRepository>,
    pub equalizations: Arc<dyn EqualizationRepository>,
    pub directory: Arc<dyn UserDirectory>,
    pub settings: Arc<dyn SystemSettings>,
    pub clock: Arc<dyn Clock>,
    pub calendar: OrgCalendar,
    pub email_domain: Arc<str>,
}

impl AppState {
    /// State backed by the Postgres adapters sharing one pool.
    pub fn postgres(pool: PgPool, clock: Arc<dyn Clock>, calendar: OrgCalendar, email_domain: &str) -> Self {
        Self {
            rubric: Arc::new(PostgresRubricRepository::new(pool.clone())),
            cycles: Arc::new(PostgresCycleRepository::new(pool.clone())),
            evaluations: Arc::new(PostgresEvaluationRepository::new(pool.clone())),
            equalizations: Arc::new(PostgresEqualizationRepository::new(pool.clone())),
            directory: Arc::new(PostgresUserDirectory::new(pool.clone())),
            settings: Arc::new(PostgresSystemSettings::new(pool)),
            clock,
            calendar,
            email_domain: Arc::from(email_domain),
        }
    }

    /// State backed by a single in-memory store, UTC calendar.
    pub fn in_memory(store: InMemoryStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            rubric: Arc::new(store.clone()),
            cycles: Arc::new(store.clone()),
            evaluations: Arc::new(store.clone()),
            equalizations: Arc::new(store.clone()),
            directory: Arc::new(store.clone()),
            settings: Arc::new(store),
            clock,
            calendar: OrgCalendar::utc(),
            email_domain: Arc::from("example.com"),
        }
    }

    fn resolver(&self) -> CycleResolver {
        CycleResolver::new(self.cycles.clone(), self.evaluations.clone(), self.settings.clone())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cycles
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_cycle_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(self.cycles.clone(), self.rubric.clone(), self.clock.clone(), self.calendar)
    }

    pub fn get_cycle_handler(&self) -> GetCycleHandler {
        GetCycleHandler::new(self.cycles.clone(), self.rubric.clone(), self.clock.clone())
    }

    pub fn list_cycles_handler(&self) -> ListCyclesHandler {
        ListCyclesHandler::new(self.cycles.clone(), self.clock.clone())
    }

    pub fn find_active_cycle_handler(&self) -> FindActiveCycleHandler {
        FindActiveCycleHandler::new(self.cycles.clone(), self.rubric.clone(), self.clock.clone())
    }

    pub fn update_cycle_handler(&self) -> UpdateCycleHandler {
        UpdateCycleHandler::new(self.cycles.clone(), self.clock.clone(), self.calendar)
    }

    pub fn extend_cycle_handler(&self) -> ExtendCycleHandler {
        ExtendCycleHandler::new(self.cycles.clone(), self.clock.clone(), self.calendar)
    }

    pub fn finalize_cycle_handler(&self) -> FinalizeCycleHandler {
        FinalizeCycleHandler::new(self.cycles.clone(), self.clock.clone())
    }

    pub fn cancel_cycle_handler(&self) -> CancelCycleHandler {
        CancelCycleHandler::new(self.cycles.clone())
    }

    pub fn set_current_cycle_handler(&self) -> SetCurrentCycleHandler {
        SetCurrentCycleHandler::new(self.cycles.clone(), self.settings.clone())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rubric
    // ─────────────────────────────────────────────────────────────────────

    pub fn get_active_criteria_handler(&self) -> GetActiveCriteriaHandler {
        GetActiveCriteriaHandler::new(self.rubric.clone())
    }

    pub fn upsert_track_config_handler(&self) -> UpsertTrackConfigHandler {
        UpsertTrackConfigHandler::new(self.rubric.clone(), self.cycles.clone(), self.clock.clone())
    }

    pub fn remove_track_config_handler(&self) -> RemoveTrackConfigHandler {
        RemoveTrackConfigHandler::new(self.rubric.clone(), self.cycles.clone(), self.clock.clone())
    }

    pub fn get_cycle_rubric_handler(&self) -> GetCycleRubricHandler {
        GetCycleRubricHandler::new(self.rubric.clone(), self.cycles.clone())
    }

    pub fn update_cycle_rubric_handler(&self) -> UpdateCycleRubricHandler {
        UpdateCycleRubricHandler::new(self.rubric.clone(), self.cycles.clone())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Evaluations and people
    // ─────────────────────────────────────────────────────────────────────

    pub fn submit_evaluation_handler(&self) -> SubmitEvaluationHandler {
        SubmitEvaluationHandler::new(
            self.evaluations.clone(),
            self.cycles.clone(),
            self.rubric.clone(),
            self.directory.clone(),
            self.clock.clone(),
        )
    }

    pub fn submit_self_assessment_handler(&self) -> SubmitSelfAssessmentHandler {
        SubmitSelfAssessmentHandler::new(self.submit_evaluation_handler())
    }

    pub fn pending_for_handler(&self) -> PendingForHandler {
        PendingForHandler::new(self.evaluations.clone(), self.cycles.clone(), self.clock.clone())
    }

    pub fn import_users_handler(&self) -> ImportUsersHandler {
        ImportUsersHandler::new(&*self.email_domain)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Equalization
    // ─────────────────────────────────────────────────────────────────────

    pub fn save_equalization_handler(&self) -> SaveEqualizationHandler {
        SaveEqualizationHandler::new(
            self.equalizations.clone(),
            self.evaluations.clone(),
            self.cycles.clone(),
            self.directory.clone(),
            self.clock.clone(),
        )
    }

    pub fn edit_equalization_handler(&self) -> EditEqualizationHandler {
        EditEqualizationHandler::new(
            self.equalizations.clone(),
            self.evaluations.clone(),
            self.cycles.clone(),
            self.clock.clone(),
        )
    }

    pub fn get_equalization_handler(&self) -> GetEqualizationHandler {
        GetEqualizationHandler::new(self.equalizations.clone(), self.evaluations.clone())
    }

    pub fn equalization_history_handler(&self) -> GetEqualizationHistoryHandler {
        GetEqualizationHistoryHandler::new(self.equalizations.clone(), self.evaluations.clone())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────

    pub fn dashboard_stats_handler(&self) -> DashboardStatsHandler {
        DashboardStatsHandler::new(self.resolver(), self.evaluations.clone())
    }

    pub fn role_completion_handler(&self) -> RoleCompletionHandler {
        RoleCompletionHandler::new(self.resolver(), self.evaluations.clone(), self.directory.clone())
    }

    pub fn committee_overview_handler(&self) -> CommitteeOverviewHandler {
        CommitteeOverviewHandler::new(
            self.resolver(),
            self.evaluations.clone(),
            self.equalizations.clone(),
            self.directory.clone(),
            self.clock.clone(),
        )
    }

    pub fn collaborator_summary_handler(&self) -> CollaboratorSummaryHandler {
        CollaboratorSummaryHandler::new(
            self.resolver(),
            self.evaluations.clone(),
            self.equalizations.clone(),
            self.directory.clone(),
        )
    }

    pub fn evolution_handler(&self) -> EvolutionHandler {
        EvolutionHandler::new(self.cycles.clone(), self.evaluations.clone(), self.directory.clone())
    }

    pub fn export_rows_handler(&self) -> ExportRowsHandler {
        ExportRowsHandler::new(
            self.cycles.clone(),
            self.evaluations.clone(),
            self.equalizations.clone(),
            self.directory.clone(),
        )
    }
}
