//! Apply pipeline: expands a weekly preview or schedule request into dated
//! plan-store writes and reports the affected dates.
//!
//! Writes go out sequentially, one date at a time, awaiting each before the
//! next. There is no transaction across dates: a failure mid-loop leaves the
//! earlier days applied, and the error reports exactly how far it got so the
//! caller can refresh those days and surface the failure.

use chrono::{DateTime, Duration, Local, NaiveDate, Weekday};

use crate::models::{Exercise, RoutineDefinition, WeeklyPreview};
use crate::plan_store::{PlanStore, PlanStoreError};
use crate::scheduler::{day_offset, schedule_exact, schedule_weekdays, start_of_week, SchedulerConfig};

// ---------------------------------------------------------------------------
/// Schedule Request
// ---------------------------------------------------------------------------

/// One user-initiated scheduling action: a single exercise payload plus how
/// it recurs.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub exercises: Vec<Exercise>,
    pub recurrence: Recurrence,
}

#[derive(Debug, Clone)]
pub enum Recurrence {
    /// Repeat on the given weekdays for `weeks` calendar weeks. Week zero is
    /// truncated to dates on or after `start_from`.
    Weekly {
        weekdays: Vec<Weekday>,
        weeks: u32,
        start_from: NaiveDate,
    },
    /// Apply to an explicit set of instants (normalized to calendar days).
    Exact { dates: Vec<DateTime<Local>> },
}

// ---------------------------------------------------------------------------
/// Error Handling
// ---------------------------------------------------------------------------

/// A write failed partway through an apply. `written` holds every date that
/// was persisted before the failure, in write order.
#[derive(Debug, thiserror::Error)]
#[error("Plan write failed for {failed_day} after {} successful writes: {source}", .written.len())]
pub struct ApplyError {
    pub written: Vec<NaiveDate>,
    pub failed_day: NaiveDate,
    #[source]
    pub source: PlanStoreError,
}

// ---------------------------------------------------------------------------
/// Apply operations
// ---------------------------------------------------------------------------

/// Commit a weekly preview to `weeks` calendar weeks starting at the week
/// containing `start_date`.
///
/// Unlike the weekday scheduler, this applies the start week in full - the
/// preview already reflects a "this week going forward" intent, so no
/// truncation happens here. Returns every date written, in write order
/// (chronological).
pub async fn apply_preview(
    preview: &WeeklyPreview,
    start_date: NaiveDate,
    weeks: u32,
    store: &PlanStore,
    config: &SchedulerConfig,
) -> Result<Vec<NaiveDate>, ApplyError> {
    // Order days by their offset within the configured week so writes are
    // chronological even under a non-Monday week start
    let mut days: Vec<(Weekday, &[Exercise])> = preview.iter().collect();
    days.sort_by_key(|(d, _)| day_offset(*d, config));

    let week_zero = start_of_week(start_date, config);
    let mut written = Vec::with_capacity(days.len() * weeks as usize);

    for week in 0..weeks as i64 {
        let week_start = week_zero + Duration::weeks(week);
        for (weekday, exercises) in &days {
            let date = week_start + Duration::days(day_offset(*weekday, config));
            if let Err(source) = store.add(exercises, date).await {
                return Err(ApplyError {
                    written,
                    failed_day: date,
                    source,
                });
            }
            written.push(date);
        }
    }

    Ok(written)
}

/// Expand a schedule request and write its payload to every resulting date.
///
/// Empty inputs - no exercises, no weekdays, zero weeks, no dates - are a
/// no-op, not an error: the result is empty and nothing is written.
pub async fn apply_request(
    request: &ScheduleRequest,
    store: &PlanStore,
    config: &SchedulerConfig,
) -> Result<Vec<NaiveDate>, ApplyError> {
    if request.exercises.is_empty() {
        return Ok(Vec::new());
    }

    let dates = match &request.recurrence {
        Recurrence::Weekly {
            weekdays,
            weeks,
            start_from,
        } => schedule_weekdays(*start_from, weekdays, *weeks, config),
        Recurrence::Exact { dates } => schedule_exact(dates),
    };

    let mut written = Vec::with_capacity(dates.len());
    for date in dates {
        if let Err(source) = store.add(&request.exercises, date).await {
            return Err(ApplyError {
                written,
                failed_day: date,
                source,
            });
        }
        written.push(date);
    }

    Ok(written)
}

/// Resolve a routine definition against the live catalog and commit the
/// resulting preview. Days whose names resolve to nothing simply don't get
/// scheduled.
pub async fn apply_routine(
    definition: &RoutineDefinition,
    catalog: &[Exercise],
    start_date: NaiveDate,
    weeks: u32,
    store: &PlanStore,
    config: &SchedulerConfig,
) -> Result<Vec<NaiveDate>, ApplyError> {
    let preview = definition.resolve(catalog);
    apply_preview(&preview, start_date, weeks, store, config).await
}
