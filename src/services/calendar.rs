use chrono::{DateTime, Utc};

use crate::{
    clock::{add_days, days_between, is_same_day},
    models::activity::{Activity, DayBucket},
};

/// Groups `activities` into one bucket per calendar day from `starts_at` to
/// `ends_at` inclusive.
///
/// Bucket `i` is dated `starts_at + i days`. `activities` must be sorted by
/// date; they are consumed in a single pass and keep their input order within
/// a bucket. Those outside the span land in no bucket. An inverted range
/// yields no buckets.
pub fn build_calendar(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    activities: &[Activity],
) -> Vec<DayBucket> {
    let span_days = days_between(ends_at, starts_at);
    let mut remaining = activities.iter().peekable();

    (0..=span_days)
        .map(|offset| {
            let date = add_days(starts_at, offset);
            while remaining
                .next_if(|activity| activity.date.date_naive() < date.date_naive())
                .is_some()
            {}
            let mut bucket = Vec::new();
            while let Some(activity) = remaining.next_if(|activity| is_same_day(activity.date, date)) {
                bucket.push(activity.clone());
            }
            DayBucket {
                date,
                activities: bucket,
            }
        })
        .collect()
}
