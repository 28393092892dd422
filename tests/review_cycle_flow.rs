//! End-to-end flows over the in-memory store.
//!
//! Each test drives the application handlers exactly as the HTTP layer does,
//! through `AppState::in_memory`, with a clock pinned by the test.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use review_cycles::adapters::clock::FixedClock;
use review_cycles::adapters::http::AppState;
use review_cycles::adapters::memory::InMemoryStore;
use review_cycles::application::handlers::{
    CancelCycleCommand, CollaboratorSummaryQuery, CreateCycleCommand, CycleRef,
    EditEqualizationCommand, ExtendCycleCommand, GetActiveCriteriaQuery, GetCycleQuery,
    GetCycleRubricQuery, GetEqualizationHistoryQuery, RemoveTrackConfigCommand, SaveEqualizationCommand,
    SubmitSelfAssessmentCommand, UpsertTrackConfigCommand,
};
use review_cycles::domain::cycle::CycleView;
use review_cycles::domain::equalization::DEFAULT_CHANGE_REASON;
use review_cycles::domain::evaluation::SelfAssessmentItem;
use review_cycles::domain::foundation::{
    CriterionId, ErrorCategory, ErrorCode, PillarId, Score, Timestamp, TrackId,
};
use review_cycles::domain::people::{Role, UserProfile};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct World {
    store: InMemoryStore,
    clock: Arc<FixedClock>,
    state: AppState,
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: i64) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()).plus_millis(ms)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Clock pinned at 2025-03-10 12:00 UTC; the in-memory state uses a UTC calendar.
fn world() -> World {
    let store = InMemoryStore::new();
    let clock = Arc::new(FixedClock::new(at(2025, 3, 10, 12, 0, 0, 0)));
    let state = AppState::in_memory(store.clone(), clock.clone());
    World { store, clock, state }
}

impl World {
    async fn create_cycle(&self, name: &str, start: NaiveDate, end: NaiveDate) -> CycleView {
        self.state
            .create_cycle_handler()
            .handle(CreateCycleCommand {
                name: name.to_string(),
                description: None,
                start_date: start,
                end_date: end,
            })
            .await
            .unwrap()
    }

    async fn get_cycle(&self, cycle: &CycleView) -> CycleView {
        self.state
            .get_cycle_handler()
            .handle(GetCycleQuery { cycle_id: cycle.id })
            .await
            .unwrap()
    }

    async fn draft_row(&self, track: TrackId, criterion: CriterionId, weight: f64) {
        self.state
            .upsert_track_config_handler()
            .handle(UpsertTrackConfigCommand {
                track_id: track,
                pillar_id: None,
                criterion_id: Some(criterion),
                weight: Some(weight),
                is_active: true,
            })
            .await
            .unwrap();
    }

    async fn self_assess(
        &self,
        user: &UserProfile,
        pillar: PillarId,
        scores: &[(CriterionId, i64)],
    ) {
        let items = scores
            .iter()
            .map(|(criterion, score)| {
                SelfAssessmentItem::new(pillar, *criterion, Score::try_new(*score).unwrap(), "because")
                    .unwrap()
            })
            .collect();
        self.state
            .submit_self_assessment_handler()
            .handle(SubmitSelfAssessmentCommand {
                collaborator_id: user.id,
                cycle_id: None,
                items,
            })
            .await
            .unwrap();
    }
}

// =============================================================================
// Rubric snapshot
// =============================================================================

#[tokio::test]
async fn snapshot_keeps_rows_deleted_from_the_draft() {
    let w = world();
    let backend = w.store.add_track("Backend").await;
    let pillar = w.store.add_pillar("Technical").await;
    let criterion = w.store.add_criterion(pillar.id, "Code quality").await;
    w.draft_row(backend.id, criterion.id, 20.0).await;

    let cycle = w.create_cycle("2025.1", date(2025, 4, 1), date(2025, 4, 30)).await;

    w.state
        .remove_track_config_handler()
        .handle(RemoveTrackConfigCommand {
            track_id: backend.id,
            criterion_id: criterion.id,
        })
        .await
        .unwrap();

    let draft = w
        .state
        .get_active_criteria_handler()
        .handle(GetActiveCriteriaQuery { track_id: backend.id })
        .await
        .unwrap();
    assert_eq!(draft.criteria().count(), 0);

    let frozen = w
        .state
        .get_cycle_rubric_handler()
        .handle(GetCycleRubricQuery { cycle_id: cycle.id })
        .await
        .unwrap();
    assert_eq!(frozen.tracks.len(), 1);
    assert_eq!(frozen.tracks[0].name, "Backend");
    let rows: Vec<_> = frozen.tracks[0].criteria().collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].criterion_id, criterion.id);
    assert_eq!(rows[0].weight.value(), 20.0);
}

#[tokio::test]
async fn later_draft_edits_do_not_reach_the_snapshot() {
    let w = world();
    let backend = w.store.add_track("Backend").await;
    let pillar = w.store.add_pillar("Technical").await;
    let criterion = w.store.add_criterion(pillar.id, "Code quality").await;
    w.draft_row(backend.id, criterion.id, 20.0).await;

    let cycle = w.create_cycle("2025.1", date(2025, 4, 1), date(2025, 4, 30)).await;
    w.draft_row(backend.id, criterion.id, 35.0).await;

    let frozen = w
        .state
        .get_cycle_rubric_handler()
        .handle(GetCycleRubricQuery { cycle_id: cycle.id })
        .await
        .unwrap();
    let weight = frozen.tracks[0].criteria().next().unwrap().weight.value();
    assert_eq!(weight, 20.0);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn activity_includes_both_window_boundaries() {
    let w = world();
    let cycle = w.create_cycle("2025.1", date(2025, 3, 10), date(2025, 3, 20)).await;

    w.clock.set(at(2025, 3, 10, 0, 0, 0, 0));
    assert!(w.get_cycle(&cycle).await.is_active);

    w.clock.set(at(2025, 3, 9, 23, 59, 59, 999));
    assert!(!w.get_cycle(&cycle).await.is_active);

    w.clock.set(at(2025, 3, 20, 23, 59, 59, 999));
    assert!(w.get_cycle(&cycle).await.is_active);

    w.clock.set(at(2025, 3, 21, 0, 0, 0, 0));
    assert!(!w.get_cycle(&cycle).await.is_active);
}

#[tokio::test]
async fn extend_only_moves_the_end_date() {
    let w = world();
    let cycle = w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;

    let extended = w
        .state
        .extend_cycle_handler()
        .handle(ExtendCycleCommand {
            cycle_id: cycle.id,
            new_end_date: date(2025, 3, 31),
        })
        .await
        .unwrap();

    assert_eq!(extended.name, cycle.name);
    assert_eq!(extended.start_date, cycle.start_date);
    assert!(extended.end_date.is_after(&cycle.end_date));
    assert!(!extended.done);
}

#[tokio::test]
async fn extend_rejects_past_or_earlier_end_dates() {
    let w = world();
    let cycle = w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;

    for new_end in [date(2025, 3, 15), date(2025, 3, 20), date(2025, 3, 9)] {
        let err = w
            .state
            .extend_cycle_handler()
            .handle(ExtendCycleCommand {
                cycle_id: cycle.id,
                new_end_date: new_end,
            })
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation, "{new_end}");
    }

    assert_eq!(w.get_cycle(&cycle).await.end_date, cycle.end_date);
}

#[tokio::test]
async fn duplicate_cycle_name_is_a_conflict() {
    let w = world();
    w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;

    let err = w
        .state
        .create_cycle_handler()
        .handle(CreateCycleCommand {
            name: "2025.1".to_string(),
            description: None,
            start_date: date(2025, 5, 1),
            end_date: date(2025, 5, 20),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::DuplicateCycleName);
}

#[tokio::test]
async fn cancel_removes_everything_then_reports_not_found() {
    let w = world();
    let pillar = w.store.add_pillar("Technical").await;
    let criterion = w.store.add_criterion(pillar.id, "Code quality").await;
    let ana = w.store.add_user("Ana", &[Role::Employer]).await;
    let cycle = w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;
    w.self_assess(&ana, pillar.id, &[(criterion.id, 4)]).await;
    assert_eq!(w.store.evaluation_count().await, 1);

    let cancelled = w
        .state
        .cancel_cycle_handler()
        .handle(CancelCycleCommand { cycle_id: cycle.id })
        .await
        .unwrap();
    assert_eq!(cancelled.evaluations_removed, 1);
    assert_eq!(w.store.evaluation_count().await, 0);

    let err = w
        .state
        .cancel_cycle_handler()
        .handle(CancelCycleCommand { cycle_id: cycle.id })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

// =============================================================================
// Equalization
// =============================================================================

#[tokio::test]
async fn equalization_is_saved_once_and_edited_after() {
    let w = world();
    let pillar = w.store.add_pillar("Technical").await;
    let criterion = w.store.add_criterion(pillar.id, "Code quality").await;
    let ana = w.store.add_user("Ana", &[Role::Employer]).await;
    let cycle = w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;
    w.self_assess(&ana, pillar.id, &[(criterion.id, 4)]).await;

    let edit = |score: f64| EditEqualizationCommand {
        cycle_id: cycle.id,
        collaborator_id: ana.id,
        score,
        justification: "revised".to_string(),
        change_reason: None,
        changed_by: None,
    };
    let save = |score: f64| SaveEqualizationCommand {
        cycle_id: cycle.id,
        collaborator_id: ana.id,
        score,
        justification: "agreed".to_string(),
    };

    let err = w.state.edit_equalization_handler().handle(edit(4.0)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EqualizationNotFound);

    w.state.save_equalization_handler().handle(save(4.5)).await.unwrap();

    let err = w.state.save_equalization_handler().handle(save(3.0)).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Conflict);

    let edited = w.state.edit_equalization_handler().handle(edit(4.0)).await.unwrap();
    assert_eq!(edited.score.value(), 4.0);
    assert_eq!(w.store.equalization_count().await, 1);

    let history = w
        .state
        .equalization_history_handler()
        .handle(GetEqualizationHistoryQuery {
            collaborator_id: ana.id,
            cycle_id: cycle.id,
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_score.value(), 4.5);
    assert_eq!(history[0].new_score.value(), 4.0);
    assert_eq!(history[0].change_reason, DEFAULT_CHANGE_REASON);
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn self_only_summary_is_pending_with_null_manager() {
    let w = world();
    let pillar = w.store.add_pillar("Technical").await;
    let c1 = w.store.add_criterion(pillar.id, "Code quality").await;
    let c2 = w.store.add_criterion(pillar.id, "Testing").await;
    let c3 = w.store.add_criterion(pillar.id, "Design").await;
    let ana = w.store.add_user("Ana", &[Role::Employer]).await;
    w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;
    w.self_assess(&ana, pillar.id, &[(c1.id, 4), (c2.id, 4), (c3.id, 5)]).await;

    let summary = w
        .state
        .collaborator_summary_handler()
        .handle(CollaboratorSummaryQuery {
            collaborator_id: ana.id,
            cycle: Some(CycleRef::Name("2025.1".to_string())),
        })
        .await
        .unwrap();

    let self_avg = summary.self_assessment_average.unwrap();
    assert!((self_avg - 13.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.manager_average, None);
    assert_eq!(summary.peer_average, None);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["managerAverage"].is_null());
    assert_eq!(json["status"], "pendente");
}

#[tokio::test]
async fn summary_for_unknown_cycle_is_not_found() {
    let w = world();
    let ana = w.store.add_user("Ana", &[Role::Employer]).await;
    w.create_cycle("2025.1", date(2025, 3, 1), date(2025, 3, 20)).await;

    let err = w
        .state
        .collaborator_summary_handler()
        .handle(CollaboratorSummaryQuery {
            collaborator_id: ana.id,
            cycle: Some(CycleRef::Name("1999.1".to_string())),
        })
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
}
