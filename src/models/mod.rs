pub mod exercise;
pub mod routine;

pub use exercise::{Discipline, Exercise, Focus, Level};
pub use routine::{RoutineDefinition, WeeklyPreview};
