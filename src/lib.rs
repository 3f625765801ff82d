//! Workout routine scheduling engine.
//!
//! Turns an abstract training routine - a weekly pattern of exercises keyed
//! by weekday, or an explicit set of calendar dates - into concrete per-date
//! plan entries, across any number of weeks. Pure library: the UI layer sits
//! on top and is not part of this crate.

pub mod catalog;
pub mod coordinator;
pub mod db;
pub mod models;
pub mod picker;
pub mod plan_store;
pub mod remote;
pub mod scheduler;
pub mod template;

#[cfg(test)]
pub mod test_utils;

pub use catalog::RoutineCatalog;
pub use coordinator::{apply_preview, apply_request, apply_routine, ApplyError, Recurrence, ScheduleRequest};
pub use models::{Discipline, Exercise, Focus, Level, RoutineDefinition, WeeklyPreview};
pub use picker::ExercisePicker;
pub use plan_store::{PlanStore, PlanStoreError};
pub use remote::{HttpPlanService, PlanService, PlanServiceConfig, PlanServiceError};
pub use scheduler::{schedule_exact, schedule_weekdays, SchedulerConfig};
pub use template::{build_preview, volume_target, VolumeTarget};
