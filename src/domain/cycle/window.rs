//! Time window of a cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, OrgCalendar, Timestamp};

/// Inclusive `[start, end]` interval with `end` strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWindow {
    start: Timestamp,
    end: Timestamp,
}

impl CycleWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, DomainError> {
        if !end.is_after(&start) {
            return Err(DomainError::new(
                ErrorCode::InvalidWindow,
                "End date must be after start date",
            )
            .with_detail("start_date", start.as_datetime().to_rfc3339())
            .with_detail("end_date", end.as_datetime().to_rfc3339()));
        }
        Ok(Self { start, end })
    }

    /// Builds a window from calendar days, start of the first day to end of the last.
    pub fn from_dates(
        calendar: &OrgCalendar,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::new(calendar.start_of_day(start), calendar.end_of_day(end))
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Boundaries are inclusive.
    pub fn contains(&self, at: Timestamp) -> bool {
        !at.is_before(&self.start) && !at.is_after(&self.end)
    }

    pub fn with_end(&self, end: Timestamp) -> Result<Self, DomainError> {
        Self::new(self.start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(day: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn window_requires_end_after_start() {
        assert!(CycleWindow::new(ts(1), ts(2)).is_ok());
        let err = CycleWindow::new(ts(2), ts(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWindow);
        assert!(CycleWindow::new(ts(3), ts(2)).is_err());
    }

    #[test]
    fn window_contains_is_inclusive() {
        let window = CycleWindow::new(ts(1), ts(10)).unwrap();
        assert!(window.contains(ts(1)));
        assert!(window.contains(ts(10)));
        assert!(window.contains(ts(5)));
        assert!(!window.contains(ts(11)));
        assert!(!window.contains(ts(1).plus_millis(-1)));
    }

    #[test]
    fn single_day_window_from_dates_is_valid() {
        let cal = OrgCalendar::default();
        let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let window = CycleWindow::from_dates(&cal, day, day).unwrap();
        assert_eq!(window.start(), cal.start_of_day(day));
        assert_eq!(window.end(), cal.end_of_day(day));
    }
}
