//! Current time and the calendar arithmetic trips are planned with.
//!
//! All arithmetic happens in UTC: a "calendar day" is a UTC date.

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for tests and replay.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

pub fn add_days(ts: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    ts + Duration::days(days)
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Whole days from `earlier` to `later`, truncated toward zero.
pub fn days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn fixed_clock_returns_given_instant() {
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(at(5, 12)));
        assert_eq!(clock.now(), at(5, 12));
    }

    #[test]
    fn days_between_truncates() {
        assert_eq!(days_between(at(3, 0), at(1, 0)), 2);
        assert_eq!(days_between(at(2, 23), at(1, 0)), 1);
        assert_eq!(days_between(at(1, 0), at(1, 1)), 0);
        assert_eq!(days_between(at(1, 0), at(3, 0)), -2);
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        assert!(is_same_day(at(2, 0), at(2, 23)));
        assert!(!is_same_day(at(2, 23), at(3, 0)));
        assert_eq!(add_days(at(31, 9), 1), Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap());
    }
}
