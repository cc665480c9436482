//! Body-composition inference boundary
//!
//! Sends an image to the inference API and returns the structured estimate.
//! When inference is disabled in configuration, a deterministic simulated
//! estimate is derived from the image bytes instead; callers only depend on
//! the result shape, not on how it was produced.

use crate::config::InferenceConfig;
use crate::error::{AppError, AppResult};
use fittrack_shared::models::{FitnessLevel, OverallHealth};
use fittrack_shared::types::BodyCompositionEstimate;
use reqwest::Client;
use tracing::{debug, warn};

pub struct InferenceClient {
    http: Client,
    url: String,
    enabled: bool,
}

impl InferenceClient {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            http: Client::new(),
            url: config.url.clone(),
            enabled: config.enabled,
        }
    }

    /// Estimate body composition from a photo.
    pub async fn estimate(&self, image: &[u8]) -> AppResult<BodyCompositionEstimate> {
        if !self.enabled {
            warn!("inference disabled; returning simulated estimate");
            return Ok(simulate(image));
        }

        debug!(bytes = image.len(), "requesting body-composition inference");
        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote(format!(
                "inference request failed with status {status}"
            )));
        }
        Ok(response.json::<BodyCompositionEstimate>().await?)
    }
}

/// Deterministic stand-in estimate derived from the image contents. The same
/// photo always yields the same numbers.
fn simulate(image: &[u8]) -> BodyCompositionEstimate {
    let seed = image
        .iter()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(*b)));

    let body_fat_percentage = 12.0 + (seed % 230) as f64 / 10.0;
    let muscle_mass = 28.0 + (seed / 7 % 170) as f64 / 10.0;
    let confidence = 55.0 + (seed / 13 % 300) as f64 / 10.0;

    let fitness_level = if body_fat_percentage < 18.0 {
        FitnessLevel::Advanced
    } else if body_fat_percentage < 26.0 {
        FitnessLevel::Intermediate
    } else {
        FitnessLevel::Beginner
    };
    let overall_health = if body_fat_percentage < 22.0 {
        OverallHealth::Good
    } else if body_fat_percentage < 30.0 {
        OverallHealth::Average
    } else {
        OverallHealth::Poor
    };

    BodyCompositionEstimate {
        body_fat_percentage,
        muscle_mass,
        fitness_level,
        overall_health,
        confidence,
        notes: Some("Simulated estimate; enable inference for a model-backed analysis".to_string()),
    }
}
