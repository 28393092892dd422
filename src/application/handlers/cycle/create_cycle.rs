//! CreateCycleHandler - Command handler for opening a new evaluation cycle.
//!
//! The draft rubric is frozen into the cycle in the same transaction that
//! inserts it. Activity is derived from the window; other cycles are not
//! touched.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::{CycleView, CycleWindow, NewCycle};
use crate::domain::foundation::{DomainError, OrgCalendar};
use crate::domain::rubric::RubricView;
use crate::ports::{Clock, CycleRepository, RubricRepository};

/// Command to create a cycle. Dates are calendar days in the organization's offset.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub type CreateCycleResult = CycleView;

/// Handler for creating cycles.
pub struct CreateCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    rubric: Arc<dyn RubricRepository>,
    clock: Arc<dyn Clock>,
    calendar: OrgCalendar,
}

impl CreateCycleHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        rubric: Arc<dyn RubricRepository>,
        clock: Arc<dyn Clock>,
        calendar: OrgCalendar,
    ) -> Self {
        Self {
            cycles,
            rubric,
            clock,
            calendar,
        }
    }

    pub async fn handle(&self, cmd: CreateCycleCommand) -> Result<CreateCycleResult, DomainError> {
        let window = CycleWindow::from_dates(&self.calendar, cmd.start_date, cmd.end_date)?;
        let new = NewCycle::new(&cmd.name, cmd.description, window)?;
        let now = self.clock.now();

        let cycle = self.cycles.create_with_snapshot(new, now).await?;
        let rubric = RubricView::from_lines(self.rubric.snapshot_lines(cycle.id()).await?);

        tracing::info!(
            cycle_id = %cycle.id(),
            name = %cycle.name(),
            tracks = rubric.tracks.len(),
            "Cycle created"
        );

        Ok(CycleView::of(&cycle, now).with_rubric(rubric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::CyclePhase;
    use crate::domain::foundation::{ErrorCategory, ErrorCode, Timestamp, Weight};
    use crate::domain::rubric::TrackCriterionWeight;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn handler(store: &InMemoryStore, now: Timestamp) -> CreateCycleHandler {
        CreateCycleHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(FixedClock::new(now)),
            OrgCalendar::default(),
        )
    }

    fn command(name: &str, start: NaiveDate, end: NaiveDate) -> CreateCycleCommand {
        CreateCycleCommand {
            name: name.to_string(),
            description: Some("first semester".to_string()),
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn creates_cycle_with_frozen_rubric() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let criterion = store.add_criterion(pillar.id, "Ownership").await;
        store
            .upsert_draft(&[TrackCriterionWeight::new(
                track.id,
                criterion.id,
                Weight::try_new(20.0).unwrap(),
                true,
            )])
            .await
            .unwrap();
        let now = OrgCalendar::default().start_of_day(date(2025, 1, 10));

        let view = handler(&store, now)
            .handle(command("2025.1", date(2025, 1, 1), date(2025, 6, 30)))
            .await
            .unwrap();

        assert!(view.is_active);
        assert_eq!(view.phase, CyclePhase::Active);
        let rubric = view.rubric.unwrap();
        assert_eq!(rubric.tracks.len(), 1);
        assert_eq!(rubric.tracks[0].name, "Backend");
    }

    #[tokio::test]
    async fn rejects_end_before_start() {
        let store = InMemoryStore::new();

        let err = handler(&store, Timestamp::now())
            .handle(command("2025.1", date(2025, 6, 30), date(2025, 1, 1)))
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let store = InMemoryStore::new();

        let err = handler(&store, Timestamp::now())
            .handle(command("  ", date(2025, 1, 1), date(2025, 6, 30)))
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let store = InMemoryStore::new();
        let h = handler(&store, Timestamp::now());
        h.handle(command("2025.1", date(2025, 1, 1), date(2025, 6, 30)))
            .await
            .unwrap();

        let err = h
            .handle(command("2025.1", date(2025, 7, 1), date(2025, 12, 31)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateCycleName);
    }
}
