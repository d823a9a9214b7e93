//! Wall-clock abstraction
//!
//! The diary reads "now" through this trait so timers and day rollover can be
//! driven by a manual clock in tests.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Milliseconds since the Unix epoch
    fn timestamp_millis(&self) -> i64;

    /// Current local calendar day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that only moves when told to; clones share the same time
    ///
    /// Its local time zone is UTC.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<NaiveDateTime>>,
    }

    impl ManualClock {
        pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Self {
            let now = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, min, 0))
                .expect("valid test date");
            Self {
                now: Rc::new(Cell::new(now)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub fn advance_ms(&self, ms: i64) {
            self.advance(Duration::milliseconds(ms));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            self.now.get()
        }

        fn timestamp_millis(&self) -> i64 {
            self.now.get().and_utc().timestamp_millis()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_system_clock_millis_are_epoch_based() {
        let before = Utc::now().timestamp_millis();
        let millis = SystemClock.timestamp_millis();
        let after = Utc::now().timestamp_millis();
        assert!(before <= millis && millis <= after);
    }

    #[test]
    fn test_manual_clock_millis() {
        let clock = ManualClock::at(1970, 1, 1, 0, 1);
        assert_eq!(clock.timestamp_millis(), 60_000);
        clock.advance_ms(5);
        assert_eq!(clock.timestamp_millis(), 60_005);
    }
}
