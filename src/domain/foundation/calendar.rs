//! Organization calendar: resolves calendar dates against a fixed UTC offset.

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use super::{Timestamp, ValidationError};

const DEFAULT_OFFSET_SECS: i32 = -3 * 3600;

/// Converts between calendar days in the organization's time zone and instants.
///
/// Cycle windows are entered as whole days; a start date covers the day from
/// local midnight and an end date covers it until 23:59:59.999 local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgCalendar {
    offset: FixedOffset,
}

impl OrgCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Parses offsets such as `-03:00`, `+0530` or `Z`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let invalid = || ValidationError::invalid_format("utc_offset", format!("'{}' is not ±HH:MM", raw));

        let (sign, rest) = match raw.chars().next() {
            Some('+') => (1, &raw[1..]),
            Some('-') => (-1, &raw[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 14 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::new)
            .ok_or_else(invalid)
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Instant of local midnight at the start of `date`.
    pub fn start_of_day(&self, date: NaiveDate) -> Timestamp {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Timestamp::from_datetime(utc.and_utc())
    }

    /// Last representable millisecond of `date` in local time.
    pub fn end_of_day(&self, date: NaiveDate) -> Timestamp {
        self.start_of_day(date).plus_days(1).plus_millis(-1)
    }
}

impl Default for OrgCalendar {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_OFFSET_SECS).unwrap_or(Utc.fix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_calendar_is_three_hours_behind_utc() {
        assert_eq!(OrgCalendar::default().offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let cal = OrgCalendar::default();
        let start = cal.start_of_day(date(2025, 1, 1));
        assert_eq!(
            *start.as_datetime(),
            Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn end_of_day_is_last_local_millisecond() {
        let cal = OrgCalendar::default();
        let end = cal.end_of_day(date(2025, 6, 30));
        let expected = Utc.with_ymd_and_hms(2025, 7, 1, 2, 59, 59).unwrap()
            + Duration::milliseconds(999);
        assert_eq!(*end.as_datetime(), expected);
    }

    #[test]
    fn parse_accepts_common_offset_forms() {
        assert_eq!(OrgCalendar::parse("-03:00").unwrap(), OrgCalendar::default());
        assert_eq!(
            OrgCalendar::parse("+0530").unwrap().offset().local_minus_utc(),
            5 * 3600 + 30 * 60
        );
        assert_eq!(OrgCalendar::parse("Z").unwrap(), OrgCalendar::utc());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(OrgCalendar::parse("America/Sao_Paulo").is_err());
        assert!(OrgCalendar::parse("-3").is_err());
        assert!(OrgCalendar::parse("+25:00").is_err());
    }
}
