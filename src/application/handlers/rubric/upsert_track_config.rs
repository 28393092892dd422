//! UpsertTrackConfigHandler - Command handler for editing the draft rubric.
//!
//! Two shapes are accepted:
//!
//! - criterion level: `criterion_id` + `weight` upserts one (track, criterion) row;
//!   `pillar_id`, when given, must be the criterion's pillar
//! - pillar level: `pillar_id` without a criterion switches every row of the
//!   pillar on or off for the track, creating zero-weight rows if none exist
//!
//! Rejected while any cycle is active.

use std::sync::Arc;

use crate::domain::foundation::{
    CriterionId, DomainError, ErrorCode, PillarId, TrackId, Weight,
};
use crate::domain::rubric::{pillar_activation_rows, TrackCriterionWeight};
use crate::ports::{Clock, CycleRepository, RubricRepository};

use super::super::cycle::guard::validate_not_active;
use super::{load_pillar, load_track};

#[derive(Debug, Clone)]
pub struct UpsertTrackConfigCommand {
    pub track_id: TrackId,
    pub pillar_id: Option<PillarId>,
    pub criterion_id: Option<CriterionId>,
    pub weight: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct UpsertTrackConfigResult {
    /// Draft rows as written.
    pub rows: Vec<TrackCriterionWeight>,
}

pub struct UpsertTrackConfigHandler {
    rubric: Arc<dyn RubricRepository>,
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl UpsertTrackConfigHandler {
    pub fn new(
        rubric: Arc<dyn RubricRepository>,
        cycles: Arc<dyn CycleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { rubric, cycles, clock }
    }

    pub async fn handle(&self, cmd: UpsertTrackConfigCommand) -> Result<UpsertTrackConfigResult, DomainError> {
        validate_not_active(self.cycles.as_ref(), self.clock.now()).await?;
        let track = load_track(self.rubric.as_ref(), cmd.track_id).await?;

        let rows = match (cmd.criterion_id, cmd.pillar_id) {
            (Some(criterion_id), pillar_id) => {
                vec![self.criterion_row(&cmd, criterion_id, pillar_id).await?]
            }
            (None, Some(pillar_id)) => {
                let pillar = load_pillar(self.rubric.as_ref(), pillar_id).await?;
                let criteria = self.rubric.criteria_of_pillar(pillar.id).await?;
                let existing = self.rubric.list_draft(Some(track.id)).await?;
                pillar_activation_rows(track.id, pillar.id, &criteria, &existing, cmd.is_active)
            }
            (None, None) => {
                return Err(DomainError::validation(
                    "criterion_id",
                    "Either a criterion or a pillar is required",
                ))
            }
        };

        self.rubric.upsert_draft(&rows).await?;

        tracing::info!(
            track_id = %track.id,
            rows = rows.len(),
            is_active = cmd.is_active,
            "Draft rubric updated"
        );
        Ok(UpsertTrackConfigResult { rows })
    }

    async fn criterion_row(
        &self,
        cmd: &UpsertTrackConfigCommand,
        criterion_id: CriterionId,
        pillar_id: Option<PillarId>,
    ) -> Result<TrackCriterionWeight, DomainError> {
        let criterion = self.rubric.find_criterion(criterion_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::CriterionNotFound,
                format!("Criterion not found: {}", criterion_id),
            )
        })?;

        if let Some(pillar_id) = pillar_id {
            load_pillar(self.rubric.as_ref(), pillar_id).await?;
            if !criterion.belongs_to(pillar_id) {
                return Err(DomainError::validation(
                    "pillar_id",
                    format!("Criterion {} does not belong to pillar {}", criterion_id, pillar_id),
                ));
            }
        }

        let raw = cmd
            .weight
            .ok_or_else(|| DomainError::validation("weight", "A weight is required"))?;
        let weight = Weight::try_new(raw)?;

        Ok(TrackCriterionWeight::new(cmd.track_id, criterion.id, weight, cmd.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::foundation::{ErrorCategory, Timestamp};
    use crate::domain::rubric::{Criterion, Pillar, Track};

    struct Fixture {
        store: InMemoryStore,
        track: Track,
        pillar: Pillar,
        criteria: Vec<Criterion>,
        handler: UpsertTrackConfigHandler,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let criteria = vec![
            store.add_criterion(pillar.id, "Ownership").await,
            store.add_criterion(pillar.id, "Quality").await,
        ];
        let handler = UpsertTrackConfigHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(FixedClock::new(Timestamp::now())),
        );
        Fixture {
            store,
            track,
            pillar,
            criteria,
            handler,
        }
    }

    fn criterion_cmd(f: &Fixture, weight: f64) -> UpsertTrackConfigCommand {
        UpsertTrackConfigCommand {
            track_id: f.track.id,
            pillar_id: Some(f.pillar.id),
            criterion_id: Some(f.criteria[0].id),
            weight: Some(weight),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn upserts_a_criterion_row() {
        let f = fixture().await;

        f.handler.handle(criterion_cmd(&f, 20.0)).await.unwrap();
        f.handler.handle(criterion_cmd(&f, 35.0)).await.unwrap();

        let draft = f.store.list_draft(Some(f.track.id)).await.unwrap();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft[0].weight.value(), 35.0);
    }

    #[tokio::test]
    async fn weight_above_hundred_is_rejected() {
        let f = fixture().await;

        let err = f.handler.handle(criterion_cmd(&f, 120.0)).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn criterion_outside_the_pillar_is_rejected() {
        let f = fixture().await;
        let other = f.store.add_pillar("Culture").await;
        let mut cmd = criterion_cmd(&f, 10.0);
        cmd.pillar_id = Some(other.id);

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        let f = fixture().await;
        let mut cmd = criterion_cmd(&f, 10.0);
        cmd.track_id = TrackId::from_raw(404);

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::TrackNotFound);
    }

    #[tokio::test]
    async fn pillar_activation_creates_zero_weight_rows() {
        let f = fixture().await;

        let result = f
            .handler
            .handle(UpsertTrackConfigCommand {
                track_id: f.track.id,
                pillar_id: Some(f.pillar.id),
                criterion_id: None,
                weight: None,
                is_active: true,
            })
            .await
            .unwrap();

        assert_eq!(result.rows.len(), 2);
        assert!(result.rows.iter().all(|r| r.weight == Weight::ZERO));
    }

    #[tokio::test]
    async fn pillar_deactivation_keeps_existing_weights() {
        let f = fixture().await;
        f.handler.handle(criterion_cmd(&f, 40.0)).await.unwrap();

        f.handler
            .handle(UpsertTrackConfigCommand {
                track_id: f.track.id,
                pillar_id: Some(f.pillar.id),
                criterion_id: None,
                weight: None,
                is_active: false,
            })
            .await
            .unwrap();

        let draft = f.store.list_draft(Some(f.track.id)).await.unwrap();
        assert_eq!(draft.len(), 1);
        assert!(!draft[0].is_active);
        assert_eq!(draft[0].weight.value(), 40.0);
    }

    #[tokio::test]
    async fn rejected_while_a_cycle_is_active() {
        let f = fixture().await;
        let now = Timestamp::now();
        let window = CycleWindow::new(now.minus_days(1), now.plus_days(1)).unwrap();
        f.store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();

        let err = f.handler.handle(criterion_cmd(&f, 20.0)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CycleActive);
    }
}
