//! Calendar-keyed plan store: a local sqlite cache of exercises-per-day with
//! write-through to the remote plan service.
//!
//! One row per day. Writing a day replaces its whole list - schedules
//! overwrite, they never append. The remote write happens first; the cache
//! only reflects days the service accepted.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::Row;

use crate::db::DbPool;
use crate::models::Exercise;
use crate::remote::{PlanService, PlanServiceError};
use crate::scheduler::{start_of_week, SchedulerConfig};

// ---------------------------------------------------------------------------
/// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanStoreError {
    #[error("Remote plan service failed: {0}")]
    Remote(#[from] PlanServiceError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Plan encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
/// Plan Store
// ---------------------------------------------------------------------------

pub struct PlanStore {
    pool: DbPool,
    remote: Arc<dyn PlanService>,
}

impl PlanStore {
    pub fn new(pool: DbPool, remote: Arc<dyn PlanService>) -> Self {
        Self { pool, remote }
    }

    /// Write a day's exercise list, replacing whatever was there.
    pub async fn add(&self, exercises: &[Exercise], day: NaiveDate) -> Result<(), PlanStoreError> {
        self.remote.upsert_plan(day, exercises).await?;
        self.cache_put(day, exercises).await
    }

    /// Remove one exercise from a day's list.
    pub async fn remove(&self, exercise_id: &str, day: NaiveDate) -> Result<(), PlanStoreError> {
        let mut current = self.exercises_on(day).await?;
        current.retain(|e| e.id != exercise_id);

        self.remote.upsert_plan(day, &current).await?;
        self.cache_put(day, &current).await
    }

    /// Cached exercise list for a day. A day with no plan yields an empty
    /// list.
    pub async fn exercises_on(&self, day: NaiveDate) -> Result<Vec<Exercise>, PlanStoreError> {
        let row = sqlx::query("SELECT exercises_json FROM plan_entries WHERE day = ?")
            .bind(day.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PlanStoreError::Database(format!("Failed to read plan entry: {}", e)))?;

        match row {
            Some(row) => {
                let json: String = row.get("exercises_json");
                Ok(serde_json::from_str(&json)?)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Re-pull one day from the remote service into the cache.
    pub async fn refresh(&self, day: NaiveDate) -> Result<(), PlanStoreError> {
        match self.remote.fetch_plan(day).await? {
            Some(exercises) => self.cache_put(day, &exercises).await,
            None => self.cache_delete(day).await,
        }
    }

    /// Re-pull a set of days, one at a time.
    pub async fn refresh_days(&self, days: &[NaiveDate]) -> Result<(), PlanStoreError> {
        for day in days {
            self.refresh(*day).await?;
        }
        Ok(())
    }

    /// Refresh the whole week containing `around`.
    pub async fn preload_week(
        &self,
        around: NaiveDate,
        config: &SchedulerConfig,
    ) -> Result<(), PlanStoreError> {
        let week_start = start_of_week(around, config);
        let days: Vec<NaiveDate> = (0..7).map(|d| week_start + Duration::days(d)).collect();
        self.refresh_days(&days).await
    }

    // -----------------------------------------------------------------------
    // Cache plumbing
    // -----------------------------------------------------------------------

    async fn cache_put(&self, day: NaiveDate, exercises: &[Exercise]) -> Result<(), PlanStoreError> {
        // An empty list is an absent day, not an empty row
        if exercises.is_empty() {
            return self.cache_delete(day).await;
        }

        let json = serde_json::to_string(exercises)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO plan_entries (day, exercises_json, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(day.to_string())
        .bind(&json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| PlanStoreError::Database(format!("Failed to write plan entry: {}", e)))?;

        Ok(())
    }

    async fn cache_delete(&self, day: NaiveDate) -> Result<(), PlanStoreError> {
        sqlx::query("DELETE FROM plan_entries WHERE day = ?")
            .bind(day.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| PlanStoreError::Database(format!("Failed to delete plan entry: {}", e)))?;

        Ok(())
    }
}
