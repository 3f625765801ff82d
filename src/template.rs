//! Template generation: builds a one-week preview from a master exercise
//! catalog, a training level, and a focus.
//!
//! The preview is ephemeral and rebuilt whenever filters change; committing
//! it to actual calendar weeks is `coordinator`'s job.

use chrono::Weekday;

use crate::models::routine::CANONICAL_WEEKDAYS;
use crate::models::{Discipline, Exercise, Focus, Level, WeeklyPreview};
use crate::picker::ExercisePicker;

// ---------------------------------------------------------------------------
/// Volume table
// ---------------------------------------------------------------------------

/// Exercises per session, split by discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeTarget {
    pub strength: usize,
    pub cardio: usize,
}

/// Fixed per-day volume for every (level, focus) pair. Design constant, not
/// derived.
pub fn volume_target(level: Level, focus: Focus) -> VolumeTarget {
    let (strength, cardio) = match (level, focus) {
        (Level::Beginner, Focus::Strength) => (3, 0),
        (Level::Intermediate, Focus::Strength) => (4, 0),
        (Level::Advanced, Focus::Strength) => (5, 0),
        (Level::Beginner, Focus::Cardio) => (0, 3),
        (Level::Intermediate, Focus::Cardio) => (0, 4),
        (Level::Advanced, Focus::Cardio) => (0, 5),
        (Level::Beginner, Focus::Hybrid) => (3, 1),
        (Level::Intermediate, Focus::Hybrid) => (4, 2),
        (Level::Advanced, Focus::Hybrid) => (5, 2),
    };
    VolumeTarget { strength, cardio }
}

// ---------------------------------------------------------------------------
/// Catalog partition
// ---------------------------------------------------------------------------

const STRENGTH_KEYWORDS: &[&str] = &[
    "press", "squat", "row", "curl", "deadlift", "lunge", "raise", "pull-up", "push-up", "dip",
];

const CARDIO_KEYWORDS: &[&str] = &[
    "run", "bike", "jump", "sprint", "swim", "ski", "burpee", "climber",
];

fn keyword_discipline(name: &str) -> Option<Discipline> {
    let lower = name.to_lowercase();
    if STRENGTH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(Discipline::Strength);
    }
    if CARDIO_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(Discipline::Cardio);
    }
    None
}

/// Split the catalog into strength and cardio pools by discipline tag.
///
/// If either pool comes back empty the whole catalog is re-classified by
/// name keywords instead - a lossy safety net for catalogs with missing or
/// one-sided tagging, not the primary path. Names matching neither keyword
/// set are dropped.
fn partition_catalog(catalog: &[Exercise]) -> (Vec<Exercise>, Vec<Exercise>) {
    let strength: Vec<Exercise> = catalog
        .iter()
        .filter(|e| e.discipline == Discipline::Strength)
        .cloned()
        .collect();
    let cardio: Vec<Exercise> = catalog
        .iter()
        .filter(|e| e.discipline == Discipline::Cardio)
        .cloned()
        .collect();

    if !strength.is_empty() && !cardio.is_empty() {
        return (strength, cardio);
    }

    let mut strength = Vec::new();
    let mut cardio = Vec::new();
    for exercise in catalog {
        match keyword_discipline(&exercise.name) {
            Some(Discipline::Strength) => strength.push(exercise.clone()),
            Some(Discipline::Cardio) => cardio.push(exercise.clone()),
            None => {}
        }
    }
    (strength, cardio)
}

// ---------------------------------------------------------------------------
/// Preview construction
// ---------------------------------------------------------------------------

/// Build a one-week preview for the given filters.
///
/// The user's weekdays are walked in canonical Monday..Sunday order. Pure
/// foci always pull from the matching pool; hybrid alternates strength and
/// cardio by position, starting with strength. If the selected weekdays
/// cover fewer sessions than `sessions_per_week`, additional days are drawn
/// from the remaining weekdays in canonical order (the alternation index
/// keeps counting) until the session count is met or all seven weekdays are
/// populated. A day whose pull yields nothing is dropped, not created empty.
pub fn build_preview(
    catalog: &[Exercise],
    level: Level,
    focus: Focus,
    weekdays: &[Weekday],
    sessions_per_week: u8,
) -> WeeklyPreview {
    let (strength, cardio) = partition_catalog(catalog);
    let target = volume_target(level, focus);

    let mut strength_picker = ExercisePicker::new(strength);
    let mut cardio_picker = ExercisePicker::new(cardio);

    let selected: Vec<Weekday> = CANONICAL_WEEKDAYS
        .iter()
        .copied()
        .filter(|d| weekdays.contains(d))
        .collect();

    let mut preview = WeeklyPreview::new();
    let mut position = 0usize;

    for day in &selected {
        let exercises = pull_for_position(
            focus,
            position,
            target,
            &mut strength_picker,
            &mut cardio_picker,
        );
        preview.set_day(*day, exercises);
        position += 1;
    }

    // Fill-in rule: top up from the unselected weekdays, canonical order
    if preview.populated_count() < sessions_per_week as usize {
        for day in CANONICAL_WEEKDAYS
            .iter()
            .copied()
            .filter(|d| !selected.contains(d))
        {
            if preview.populated_count() >= sessions_per_week as usize {
                break;
            }
            let exercises = pull_for_position(
                focus,
                position,
                target,
                &mut strength_picker,
                &mut cardio_picker,
            );
            preview.set_day(day, exercises);
            position += 1;
        }
    }

    preview
}

fn pull_for_position(
    focus: Focus,
    position: usize,
    target: VolumeTarget,
    strength_picker: &mut ExercisePicker,
    cardio_picker: &mut ExercisePicker,
) -> Vec<Exercise> {
    match focus {
        Focus::Strength => strength_picker.take(target.strength),
        Focus::Cardio => cardio_picker.take(target.cardio),
        Focus::Hybrid => {
            if position % 2 == 0 {
                strength_picker.take(target.strength)
            } else {
                cardio_picker.take(target.cardio)
            }
        }
    }
}
