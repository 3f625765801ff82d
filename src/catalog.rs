//! Routine catalog and master exercise catalog access.
//!
//! The routine catalog is a plain injectable value rather than a global:
//! construct it from any definition list, or use the built-in authored set.

use std::collections::BTreeMap;

use sqlx::Row;

use crate::db::DbPool;
use crate::models::{Exercise, Level, RoutineDefinition};

// ---------------------------------------------------------------------------
/// Routine Catalog
// ---------------------------------------------------------------------------

/// Read-only collection of named routine definitions.
pub struct RoutineCatalog {
    routines: Vec<RoutineDefinition>,
}

impl RoutineCatalog {
    pub fn new(routines: Vec<RoutineDefinition>) -> Self {
        Self { routines }
    }

    /// The built-in human-authored routines.
    pub fn builtin() -> Self {
        Self::new(builtin_routines())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutineDefinition> {
        self.routines.iter()
    }

    pub fn find(&self, id: &str) -> Option<&RoutineDefinition> {
        self.routines.iter().find(|r| r.id == id)
    }

    pub fn for_level(&self, level: Level) -> Vec<&RoutineDefinition> {
        self.routines.iter().filter(|r| r.level == level).collect()
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

fn definition(
    id: &str,
    title: &str,
    subtitle: &str,
    level: Level,
    days: Vec<(u8, Vec<&str>)>,
) -> RoutineDefinition {
    let sessions_per_week = days.len() as u8;
    let days: BTreeMap<u8, Vec<String>> = days
        .into_iter()
        .map(|(n, names)| (n, names.into_iter().map(String::from).collect()))
        .collect();

    RoutineDefinition {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        level,
        sessions_per_week,
        days,
    }
}

// Weekday numbers are calendar-native: 1 = Sunday ... 7 = Saturday
fn builtin_routines() -> Vec<RoutineDefinition> {
    vec![
        definition(
            "full_body_foundation",
            "Full Body Foundation",
            "Three sessions to build the habit",
            Level::Beginner,
            vec![
                (2, vec!["Goblet Squat", "Push-Up", "Dumbbell Row", "Plank"]),
                (
                    4,
                    vec!["Romanian Deadlift", "Overhead Press", "Lat Pulldown", "Dead Bug"],
                ),
                (
                    6,
                    vec!["Walking Lunge", "Incline Push-Up", "Seated Cable Row", "Side Plank"],
                ),
            ],
        ),
        definition(
            "engine_builder",
            "Engine Builder",
            "Aerobic base three days a week",
            Level::Beginner,
            vec![
                (3, vec!["Easy Run", "Jump Rope"]),
                (5, vec!["Interval Bike", "Mountain Climber"]),
                (7, vec!["Long Run"]),
            ],
        ),
        definition(
            "upper_lower_split",
            "Upper / Lower Split",
            "Four days, alternating halves",
            Level::Intermediate,
            vec![
                (
                    2,
                    vec!["Bench Press", "Bent-Over Row", "Overhead Press", "Pull-Up", "Biceps Curl"],
                ),
                (
                    3,
                    vec![
                        "Back Squat",
                        "Romanian Deadlift",
                        "Walking Lunge",
                        "Calf Raise",
                        "Hanging Knee Raise",
                    ],
                ),
                (
                    5,
                    vec![
                        "Incline Bench Press",
                        "Seated Cable Row",
                        "Lateral Raise",
                        "Face Pull",
                        "Triceps Extension",
                    ],
                ),
                (
                    6,
                    vec![
                        "Front Squat",
                        "Hip Thrust",
                        "Bulgarian Split Squat",
                        "Leg Curl",
                        "Standing Calf Raise",
                    ],
                ),
            ],
        ),
        definition(
            "push_pull_legs",
            "Push Pull Legs",
            "Six-day split for experienced lifters",
            Level::Advanced,
            vec![
                (
                    2,
                    vec!["Bench Press", "Overhead Press", "Incline Dumbbell Press", "Dip", "Triceps Extension"],
                ),
                (
                    3,
                    vec!["Deadlift", "Pull-Up", "Bent-Over Row", "Face Pull", "Biceps Curl"],
                ),
                (
                    4,
                    vec!["Back Squat", "Romanian Deadlift", "Leg Press", "Walking Lunge", "Standing Calf Raise"],
                ),
                (
                    5,
                    vec!["Incline Bench Press", "Lateral Raise", "Close-Grip Bench Press", "Push-Up", "Cable Fly"],
                ),
                (
                    6,
                    vec!["Chin-Up", "Seated Cable Row", "Single-Arm Dumbbell Row", "Shrug", "Hammer Curl"],
                ),
                (
                    7,
                    vec!["Front Squat", "Hip Thrust", "Bulgarian Split Squat", "Leg Curl", "Calf Raise"],
                ),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Master exercise catalog (database)
// ---------------------------------------------------------------------------

/// Load the full exercise catalog from the database
pub async fn load_exercise_catalog(pool: &DbPool) -> Result<Vec<Exercise>, String> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, category, discipline, image_url
        FROM exercises
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| format!("Failed to load exercise catalog: {}", e))?;

    let mut exercises = Vec::new();
    for row in rows {
        let discipline_str: String = row.get("discipline");
        let discipline = discipline_str.parse()?;

        exercises.push(Exercise {
            id: row.get("id"),
            name: row.get("name"),
            category: row.get("category"),
            discipline,
            image_url: row.get("image_url"),
        });
    }

    Ok(exercises)
}
