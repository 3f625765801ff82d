//! Routine definitions and their resolved weekly previews.
//!
//! Routine days are keyed by calendar-native weekday numbers (1 = Sunday ...
//! 7 = Saturday) because that is how the authored catalog data is written;
//! everything downstream works in `chrono::Weekday` and walks weeks in
//! canonical Monday..Sunday order.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::exercise::{Exercise, Level};

// ---------------------------------------------------------------------------
/// Weekday numbering
// ---------------------------------------------------------------------------

/// Canonical walk order for a training week.
pub const CANONICAL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Convert a calendar-native weekday number (1 = Sunday ... 7 = Saturday).
pub fn weekday_from_number(n: u8) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        7 => Some(Weekday::Sat),
        _ => None,
    }
}

/// The calendar-native number (1 = Sunday ... 7 = Saturday) for a weekday.
pub fn weekday_number(day: Weekday) -> u8 {
    day.number_from_sunday() as u8
}

// ---------------------------------------------------------------------------
/// Routine Definition: authored weekly pattern
// ---------------------------------------------------------------------------

/// A human-authored routine: a weekly pattern of exercise names keyed by
/// weekday number. Absent key = rest day; present keys carry non-empty lists.
///
/// Exercise names (not ids) are stored so definitions survive catalog
/// updates; they resolve against a live catalog at apply time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineDefinition {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub level: Level,
    pub sessions_per_week: u8,
    pub days: BTreeMap<u8, Vec<String>>,
}

impl RoutineDefinition {
    /// Training weekdays of this routine, in canonical Monday..Sunday order.
    pub fn weekdays(&self) -> Vec<Weekday> {
        let days: Vec<Weekday> = self
            .days
            .keys()
            .filter_map(|n| weekday_from_number(*n))
            .collect();

        CANONICAL_WEEKDAYS
            .iter()
            .copied()
            .filter(|d| days.contains(d))
            .collect()
    }

    /// Resolve exercise names against a live catalog by case-insensitive
    /// exact name match. Unmatched names are skipped silently; a day whose
    /// entire list resolves to nothing is dropped rather than created empty.
    pub fn resolve(&self, catalog: &[Exercise]) -> WeeklyPreview {
        let mut preview = WeeklyPreview::new();

        for (number, names) in &self.days {
            let Some(weekday) = weekday_from_number(*number) else {
                continue;
            };

            let resolved: Vec<Exercise> = names
                .iter()
                .filter_map(|name| {
                    catalog
                        .iter()
                        .find(|e| e.name.eq_ignore_ascii_case(name))
                        .cloned()
                })
                .collect();

            if !resolved.is_empty() {
                preview.set_day(weekday, resolved);
            }
        }

        preview
    }
}

// ---------------------------------------------------------------------------
/// Weekly Preview: one resolved representative week
// ---------------------------------------------------------------------------

/// Ephemeral weekday -> exercises mapping for one representative week.
/// Rebuilt whenever filters change; never persisted.
#[derive(Debug, Clone, Default)]
pub struct WeeklyPreview {
    days: Vec<(Weekday, Vec<Exercise>)>,
}

impl WeeklyPreview {
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    /// Set the exercises for a weekday, replacing any previous list.
    /// Empty lists are dropped: a rest day is an absent key, not an empty one.
    pub fn set_day(&mut self, weekday: Weekday, exercises: Vec<Exercise>) {
        self.days.retain(|(d, _)| *d != weekday);
        if exercises.is_empty() {
            return;
        }
        self.days.push((weekday, exercises));
        self.days
            .sort_by_key(|(d, _)| d.num_days_from_monday());
    }

    pub fn day(&self, weekday: Weekday) -> Option<&[Exercise]> {
        self.days
            .iter()
            .find(|(d, _)| *d == weekday)
            .map(|(_, ex)| ex.as_slice())
    }

    /// Populated days in canonical Monday..Sunday order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Exercise])> {
        self.days.iter().map(|(d, ex)| (*d, ex.as_slice()))
    }

    pub fn populated_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
