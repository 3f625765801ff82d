//! Calendar expansion: weekday patterns and explicit date sets into concrete
//! plan days.
//!
//! All date-offset arithmetic runs against an explicit week start
//! (`SchedulerConfig`) instead of an implicit calendar property, since the
//! week start silently shifts every computed offset.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};

// ---------------------------------------------------------------------------
/// Scheduler Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// First day of the training week. Offsets within a week are counted
    /// from here.
    pub week_start: Weekday,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
        }
    }
}

// ---------------------------------------------------------------------------
/// Week arithmetic
// ---------------------------------------------------------------------------

/// Offset of `weekday` from the configured week start (0..=6).
pub fn day_offset(weekday: Weekday, config: &SchedulerConfig) -> i64 {
    let start = config.week_start.num_days_from_monday() as i64;
    let day = weekday.num_days_from_monday() as i64;
    (day - start).rem_euclid(7)
}

/// First day of the week containing `date`, per the configured week start.
pub fn start_of_week(date: NaiveDate, config: &SchedulerConfig) -> NaiveDate {
    date - Duration::days(day_offset(date.weekday(), config))
}

// ---------------------------------------------------------------------------
/// Weekday Scheduler: recurring weekly expansion
// ---------------------------------------------------------------------------

/// Expand a weekday set into concrete dates across `weeks` calendar weeks.
///
/// Week 0 is the week containing `start_from`; dates in week 0 that fall
/// before `start_from` are truncated. Later weeks are never truncated.
/// Returns dates in chronological order. An empty weekday set or zero weeks
/// yields an empty result.
pub fn schedule_weekdays(
    start_from: NaiveDate,
    weekdays: &[Weekday],
    weeks: u32,
    config: &SchedulerConfig,
) -> Vec<NaiveDate> {
    if weekdays.is_empty() || weeks == 0 {
        return Vec::new();
    }

    // Dedup and order within the week by offset from the week start
    let offsets: BTreeSet<i64> = weekdays.iter().map(|d| day_offset(*d, config)).collect();

    let week_zero = start_of_week(start_from, config);
    let mut dates = Vec::with_capacity(offsets.len() * weeks as usize);

    for week in 0..weeks as i64 {
        let week_start = week_zero + Duration::weeks(week);
        for offset in &offsets {
            let date = week_start + Duration::days(*offset);
            if week == 0 && date < start_from {
                continue;
            }
            dates.push(date);
        }
    }

    dates
}

// ---------------------------------------------------------------------------
/// Exact Date Scheduler: explicit date sets
// ---------------------------------------------------------------------------

/// Normalize explicit instants to local calendar days: start-of-day,
/// de-duplicated, sorted ascending. No calendar arithmetic beyond that.
pub fn schedule_exact(dates: &[DateTime<Local>]) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = dates.iter().map(|dt| dt.date_naive()).collect();
    days.into_iter().collect()
}
