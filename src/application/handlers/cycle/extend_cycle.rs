//! ExtendCycleHandler - Command handler for moving a cycle's end date later.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::CycleView;
use crate::domain::foundation::{CycleId, DomainError, OrgCalendar};
use crate::ports::{Clock, CycleRepository};

use super::guard::load_cycle;

/// The new end date is a calendar day; the cycle ends at its last millisecond.
#[derive(Debug, Clone)]
pub struct ExtendCycleCommand {
    pub cycle_id: CycleId,
    pub new_end_date: NaiveDate,
}

pub struct ExtendCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
    calendar: OrgCalendar,
}

impl ExtendCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, clock: Arc<dyn Clock>, calendar: OrgCalendar) -> Self {
        Self {
            cycles,
            clock,
            calendar,
        }
    }

    pub async fn handle(&self, cmd: ExtendCycleCommand) -> Result<CycleView, DomainError> {
        let mut cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        let now = self.clock.now();
        let previous_end = cycle.end_date();

        if let Err(err) = cycle.extend(self.calendar.end_of_day(cmd.new_end_date), now) {
            tracing::warn!(cycle_id = %cycle.id(), error = %err, "Cycle extension rejected");
            return Err(err);
        }
        self.cycles.update(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            previous_end = %previous_end,
            new_end = %cycle.end_date(),
            "Cycle extended"
        );
        Ok(CycleView::of(&cycle, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::foundation::{ErrorCategory, ErrorCode};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup(today: NaiveDate) -> (InMemoryStore, CycleId, ExtendCycleHandler) {
        let calendar = OrgCalendar::default();
        let store = InMemoryStore::new();
        let window = CycleWindow::from_dates(&calendar, date(2025, 1, 1), date(2025, 6, 30)).unwrap();
        let now = calendar.start_of_day(today);
        let cycle = store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();
        let handler = ExtendCycleHandler::new(
            Arc::new(store.clone()),
            Arc::new(FixedClock::new(now)),
            calendar,
        );
        (store, cycle.id(), handler)
    }

    #[tokio::test]
    async fn extension_changes_only_the_end_date() {
        let (store, id, handler) = setup(date(2025, 3, 1)).await;
        let before = store.find_by_id(id).await.unwrap().unwrap();

        let view = handler
            .handle(ExtendCycleCommand {
                cycle_id: id,
                new_end_date: date(2025, 7, 15),
            })
            .await
            .unwrap();

        assert_eq!(view.start_date, before.start_date());
        assert_eq!(view.name, before.name());
        assert!(view.end_date.is_after(&before.end_date()));
    }

    #[tokio::test]
    async fn end_not_after_current_end_is_rejected() {
        let (_, id, handler) = setup(date(2025, 3, 1)).await;

        let err = handler
            .handle(ExtendCycleCommand {
                cycle_id: id,
                new_end_date: date(2025, 6, 30),
            })
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn end_in_the_past_is_rejected() {
        let (_, id, handler) = setup(date(2025, 9, 1)).await;

        let err = handler
            .handle(ExtendCycleCommand {
                cycle_id: id,
                new_end_date: date(2025, 8, 1),
            })
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn elapsed_cycle_becomes_active_again() {
        let (_, id, handler) = setup(date(2025, 7, 5)).await;

        let view = handler
            .handle(ExtendCycleCommand {
                cycle_id: id,
                new_end_date: date(2025, 7, 31),
            })
            .await
            .unwrap();

        assert!(view.is_active);
    }

    #[tokio::test]
    async fn missing_cycle_is_not_found() {
        let (_, _, handler) = setup(date(2025, 3, 1)).await;

        let err = handler
            .handle(ExtendCycleCommand {
                cycle_id: CycleId::from_raw(999),
                new_end_date: date(2025, 7, 31),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }
}
