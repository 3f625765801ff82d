//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Catalog seed data
//! - Mock data factories
//! - An in-memory plan service double

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{Discipline, Exercise};
use crate::remote::{PlanService, PlanServiceError};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed the master exercise catalog with a balanced test set.
/// Returns the IDs of created exercises
pub async fn seed_test_exercises(pool: &SqlitePool) -> Vec<String> {
  let exercises = [
    ("ex_squat", "Goblet Squat", "Legs", "strength"),
    ("ex_pushup", "Push-Up", "Chest", "strength"),
    ("ex_row", "Dumbbell Row", "Back", "strength"),
    ("ex_plank", "Plank", "Core", "strength"),
    ("ex_bench", "Bench Press", "Chest", "strength"),
    ("ex_backsquat", "Back Squat", "Legs", "strength"),
    ("ex_run", "Easy Run", "Conditioning", "cardio"),
    ("ex_bike", "Interval Bike", "Conditioning", "cardio"),
    ("ex_rope", "Jump Rope", "Conditioning", "cardio"),
    ("ex_climber", "Mountain Climber", "Conditioning", "cardio"),
  ];

  let mut ids = Vec::new();

  for (id, name, category, discipline) in exercises {
    sqlx::query(
      r#"
      INSERT OR REPLACE INTO exercises (id, name, category, discipline)
      VALUES (?1, ?2, ?3, ?4)
      "#,
    )
    .bind(id)
    .bind(name)
    .bind(category)
    .bind(discipline)
    .execute(pool)
    .await
    .expect("Failed to seed exercise");

    ids.push(id.to_string());
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock exercise for testing
pub fn mock_exercise(id: &str, name: &str, discipline: Discipline) -> Exercise {
  let category = match discipline {
    Discipline::Strength => "Full Body",
    Discipline::Cardio => "Conditioning",
  };
  Exercise {
    id: id.to_string(),
    name: name.to_string(),
    category: category.to_string(),
    discipline,
    image_url: None,
  }
}

/// ---------------------------------------------------------------------------
/// In-Memory Plan Service Double
/// ---------------------------------------------------------------------------

/// Plan service backed by a HashMap, with an optional injected failure day.
/// Counts successful upserts so tests can assert exact write counts.
pub struct MemoryPlanService {
  plans: Mutex<HashMap<NaiveDate, Vec<Exercise>>>,
  fail_on: Option<NaiveDate>,
  upserts: AtomicUsize,
}

impl MemoryPlanService {
  pub fn new() -> Self {
    Self {
      plans: Mutex::new(HashMap::new()),
      fail_on: None,
      upserts: AtomicUsize::new(0),
    }
  }

  /// A service that rejects writes for one specific day
  pub fn failing_on(day: NaiveDate) -> Self {
    Self {
      fail_on: Some(day),
      ..Self::new()
    }
  }

  pub fn seed_plan(&self, day: NaiveDate, exercises: Vec<Exercise>) {
    self.plans.lock().expect("plans lock").insert(day, exercises);
  }

  pub fn clear_plan(&self, day: NaiveDate) {
    self.plans.lock().expect("plans lock").remove(&day);
  }

  pub fn plan_for(&self, day: NaiveDate) -> Option<Vec<Exercise>> {
    self.plans.lock().expect("plans lock").get(&day).cloned()
  }

  pub fn upsert_count(&self) -> usize {
    self.upserts.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl PlanService for MemoryPlanService {
  async fn upsert_plan(
    &self,
    day: NaiveDate,
    exercises: &[Exercise],
  ) -> Result<(), PlanServiceError> {
    if self.fail_on == Some(day) {
      return Err(PlanServiceError::Api(format!("Injected failure for {}", day)));
    }

    self.plans.lock().expect("plans lock").insert(day, exercises.to_vec());
    self.upserts.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  async fn fetch_plan(&self, day: NaiveDate) -> Result<Option<Vec<Exercise>>, PlanServiceError> {
    Ok(self.plans.lock().expect("plans lock").get(&day).cloned())
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'plan_entries')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected both tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_exercises_returns_correct_count() {
    let pool = setup_test_db().await;

    let ids = seed_test_exercises(&pool).await;
    assert_eq!(ids.len(), 10);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
      .fetch_one(&pool)
      .await
      .expect("Failed to count exercises");

    assert_eq!(count, 10);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_memory_plan_service_tracks_writes() {
    let service = MemoryPlanService::new();
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    service
      .upsert_plan(day, &[mock_exercise("e1", "Push-Up", Discipline::Strength)])
      .await
      .expect("upsert");

    assert_eq!(service.upsert_count(), 1);
    assert_eq!(service.plan_for(day).map(|p| p.len()), Some(1));
    assert!(service.fetch_plan(day).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_memory_plan_service_injected_failure() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let service = MemoryPlanService::failing_on(day);

    let result = service
      .upsert_plan(day, &[mock_exercise("e1", "Push-Up", Discipline::Strength)])
      .await;

    assert!(result.is_err());
    assert_eq!(service.upsert_count(), 0);
  }
}
