//! Injectable time source.
//!
//! # Responsibility
//! - Provide "now" for completion stamps and "today" for due-date ordering.
//! - Allow deterministic timestamps in tests.
//!
//! # Invariants
//! - `timestamp()` always renders with [`TIMESTAMP_FORMAT`].

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::cell::Cell;

/// Wire format for `completed_at` fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Current instant formatted for persistence.
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replay.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Builds a clock from a `YYYY-MM-DD HH:MM` string.
    ///
    /// Returns `None` when `text` does not match [`TIMESTAMP_FORMAT`].
    pub fn parse(text: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .ok()
            .map(Self::new)
    }

    pub fn set(&self, instant: NaiveDateTime) {
        self.instant.set(instant);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.instant.set(self.instant.get() + Duration::minutes(minutes));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};

    #[test]
    fn fixed_clock_formats_and_advances() {
        let clock = FixedClock::parse("2025-03-10 09:05").expect("valid timestamp");
        assert_eq!(clock.timestamp(), "2025-03-10 09:05");

        clock.advance_minutes(60 * 15);
        assert_eq!(clock.timestamp(), "2025-03-11 00:05");
        assert_eq!(clock.today().to_string(), "2025-03-11");
    }

    #[test]
    fn fixed_clock_rejects_other_layouts() {
        assert!(FixedClock::parse("2025-03-10T09:05:00").is_none());
    }

    #[test]
    fn system_clock_timestamp_has_minute_precision() {
        let stamp = SystemClock.timestamp();
        assert_eq!(stamp.len(), "YYYY-MM-DD HH:MM".len());
    }
}
