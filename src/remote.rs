//! Remote plan persistence client.
//!
//! The engine treats the remote service as an opaque upsert/fetch store keyed
//! by calendar day: `upsert_plan` overwrites a day's exercise list (idempotent
//! per day), `fetch_plan` reads one back. `PlanStore` consumes this through
//! the `PlanService` trait so tests can swap in an in-memory double.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::models::Exercise;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const ENV_SERVICE_URL: &str = "PLAN_SERVICE_URL";
const ENV_API_KEY: &str = "PLAN_SERVICE_API_KEY";

#[derive(Debug, Clone)]
pub struct PlanServiceConfig {
  pub base_url: Url,
  pub api_key: String,
}

impl PlanServiceConfig {
  pub fn from_env() -> Result<Self, PlanServiceError> {
    // Pick up a local .env file if present
    dotenvy::dotenv().ok();

    let raw_url = env::var(ENV_SERVICE_URL)
      .map_err(|_| PlanServiceError::MissingConfig(ENV_SERVICE_URL.into()))?;
    let api_key = env::var(ENV_API_KEY)
      .map_err(|_| PlanServiceError::MissingConfig(ENV_API_KEY.into()))?;

    let base_url = Url::parse(&raw_url)
      .map_err(|e| PlanServiceError::InvalidUrl(format!("{}: {}", raw_url, e)))?;

    Ok(Self { base_url, api_key })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanServiceError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid service URL: {0}")]
  InvalidUrl(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Plan service error: {0}")]
  Api(String),

  #[error("Not authenticated with the plan service")]
  NotAuthenticated,
}

/// ---------------------------------------------------------------------------
/// Service Trait
/// ---------------------------------------------------------------------------

/// One logical remote operation pair. Upserts overwrite the day's list
/// server-side rather than appending.
#[async_trait]
pub trait PlanService: Send + Sync {
  async fn upsert_plan(
    &self,
    day: NaiveDate,
    exercises: &[Exercise],
  ) -> Result<(), PlanServiceError>;

  async fn fetch_plan(&self, day: NaiveDate) -> Result<Option<Vec<Exercise>>, PlanServiceError>;
}

/// Wire shape for a single day's plan
#[derive(Debug, Serialize, Deserialize)]
struct PlanDocument {
  exercises: Vec<Exercise>,
}

/// ---------------------------------------------------------------------------
/// HTTP Implementation
/// ---------------------------------------------------------------------------

pub struct HttpPlanService {
  config: PlanServiceConfig,
  client: Client,
}

impl HttpPlanService {
  pub fn new(config: PlanServiceConfig) -> Self {
    Self {
      config,
      client: Client::new(),
    }
  }

  fn plan_url(&self, day: NaiveDate) -> String {
    format!(
      "{}/plans/{}",
      self.config.base_url.as_str().trim_end_matches('/'),
      day
    )
  }
}

#[async_trait]
impl PlanService for HttpPlanService {
  async fn upsert_plan(
    &self,
    day: NaiveDate,
    exercises: &[Exercise],
  ) -> Result<(), PlanServiceError> {
    let body = PlanDocument {
      exercises: exercises.to_vec(),
    };

    let response = self
      .client
      .put(self.plan_url(day))
      .header("Authorization", format!("Bearer {}", self.config.api_key))
      .json(&body)
      .send()
      .await?;

    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
      return Err(PlanServiceError::NotAuthenticated);
    }

    if !response.status().is_success() {
      let error_text = response.text().await.unwrap_or_default();
      return Err(PlanServiceError::Api(format!(
        "Failed to upsert plan for {}: {}",
        day, error_text
      )));
    }

    Ok(())
  }

  async fn fetch_plan(&self, day: NaiveDate) -> Result<Option<Vec<Exercise>>, PlanServiceError> {
    let response = self
      .client
      .get(self.plan_url(day))
      .header("Authorization", format!("Bearer {}", self.config.api_key))
      .send()
      .await?;

    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
      return Err(PlanServiceError::NotAuthenticated);
    }

    // 404 means no plan stored for this day
    if response.status() == reqwest::StatusCode::NOT_FOUND {
      return Ok(None);
    }

    if !response.status().is_success() {
      let error_text = response.text().await.unwrap_or_default();
      return Err(PlanServiceError::Api(format!(
        "Failed to fetch plan for {}: {}",
        day, error_text
      )));
    }

    let response_text = response.text().await?;
    let document: PlanDocument = serde_json::from_str(&response_text).map_err(|e| {
      eprintln!("Failed to parse plan response: {}", e);
      eprintln!(
        "Raw response (first 500 chars): {}",
        &response_text[..response_text.len().min(500)]
      );
      PlanServiceError::Api(format!("Failed to parse plan for {}: {}", day, e))
    })?;

    Ok(Some(document.exercises))
  }
}
