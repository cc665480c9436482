//! Data export service
//!
//! Supports two formats:
//! - JSON: full structured export of every stored collection
//! - CSV: tabular workout export, one row per set

use crate::error::{AppError, AppResult};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use fittrack_shared::models::{BodyAnalysis, Workout};
use serde::{Deserialize, Serialize};

const EXPORT_VERSION: &str = "1.0";

/// Complete data export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub export_version: String,
    pub exported_at: DateTime<Utc>,
    pub device_id: String,
    pub workouts: Vec<Workout>,
    pub recent_exercises: Vec<String>,
    pub body_analyses: Vec<BodyAnalysis>,
}

/// CSV export row for workout data
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutCsvRow {
    pub date: String,
    pub workout_id: String,
    pub exercise: String,
    pub set_number: usize,
    pub weight_kg: f64,
    pub reps: u32,
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Export all stored data as one JSON document
    pub async fn export_json(store: &RecordStore) -> AppResult<DataExport> {
        let settings = store.settings().await?;
        let dataset = store.snapshot().await?;

        Ok(DataExport {
            export_version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            device_id: settings.device_id,
            workouts: dataset.workouts,
            recent_exercises: dataset.recent_exercises,
            body_analyses: dataset.body_analyses,
        })
    }

    /// Export workout history as CSV, one row per set
    pub async fn export_workouts_csv(store: &RecordStore) -> AppResult<String> {
        let workouts = store.workouts().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for workout in &workouts {
            for exercise in &workout.exercises {
                for (i, set) in exercise.sets.iter().enumerate() {
                    writer
                        .serialize(WorkoutCsvRow {
                            date: workout.date.to_rfc3339(),
                            workout_id: workout.id.clone(),
                            exercise: exercise.exercise_name.clone(),
                            set_number: i + 1,
                            weight_kg: set.weight,
                            reps: set.reps,
                        })
                        .map_err(|e| AppError::Internal(e.into()))?;
                }
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("finalizing CSV export: {e}")))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.into()))
    }
}
