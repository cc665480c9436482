//! Data models for the FitTrack application
//!
//! Everything that can appear in the sync blob serializes with camelCase
//! field names: the remote file format is shared with other devices and the
//! local store reuses the same representation. Identity and timestamp fields
//! carry serde defaults so a blob written by another device with a missing or
//! malformed entry still deserializes; such records are treated as new during
//! reconciliation instead of failing the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of exercises allowed in a single workout
pub const MAX_EXERCISES_PER_WORKOUT: usize = 8;

/// Maximum number of entries kept in the recent-exercise list
pub const RECENT_EXERCISES_CAP: usize = 10;

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Training level reported by a body analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Overall health classification reported by a body analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Good,
    #[default]
    Average,
    Poor,
}

/// A single set: weight lifted and repetitions performed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub weight: f64,
    pub reps: u32,
}

/// One exercise within a workout, with its ordered sets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub exercise_name: String,
    pub sets: Vec<ExerciseSet>,
}

/// A logged workout session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Opaque unique identifier (a UUID v4 string for locally created records)
    #[serde(default)]
    pub id: String,
    #[serde(default = "unix_epoch")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Origin tag identifying the device that created the record
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl Workout {
    /// Effective modification time used for conflict resolution:
    /// `updated_at` when present, otherwise the workout date.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.date)
    }
}

/// A stored body-composition analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unix_epoch")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub body_fat_percentage: f64,
    #[serde(default)]
    pub muscle_mass: f64,
    #[serde(default)]
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub overall_health: OverallHealth,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The aggregate exchanged as one JSON document between the local store and
/// the remote file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncDataset {
    pub workouts: Vec<Workout>,
    pub recent_exercises: Vec<String>,
    pub body_analyses: Vec<BodyAnalysis>,
}

impl SyncDataset {
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty() && self.recent_exercises.is_empty() && self.body_analyses.is_empty()
    }
}

/// Per-device bookkeeping, persisted locally and never synced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSettings {
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl DeviceSettings {
    /// Settings for a device that has never run before
    pub fn generate() -> Self {
        Self {
            device_id: Uuid::new_v4().to_string(),
            last_synced_at: None,
        }
    }
}
