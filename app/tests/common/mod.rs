//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use fittrack_app::config::{CloudConfig, SyncConfig};
use fittrack_app::remote::CloudDiskClient;
use fittrack_app::store::RecordStore;
use fittrack_app::sync::SyncService;
use fittrack_shared::models::{ExerciseEntry, ExerciseSet, SyncDataset, Workout};
use std::sync::Arc;

/// Remote folder used by the test sync configuration
pub const REMOTE_FOLDER: &str = "apps/fittrack";
/// Remote file used by the test sync configuration
pub const REMOTE_FILE: &str = "fittrack-data.json";

/// Path of the sync blob on the mock cloud-disk server
pub fn remote_file_path() -> String {
    format!("/files/{REMOTE_FOLDER}/{REMOTE_FILE}")
}

/// Path of the sync folder on the mock cloud-disk server
pub fn remote_folder_path() -> String {
    format!("/folders/{REMOTE_FOLDER}")
}

pub fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

/// Workout fixture with a single exercise
pub fn workout(id: &str, date: &str, updated_at: Option<&str>, device_id: &str) -> Workout {
    Workout {
        id: id.to_string(),
        date: ts(date),
        updated_at: updated_at.map(ts),
        device_id: device_id.to_string(),
        exercises: vec![ExerciseEntry {
            exercise_name: "Squat".to_string(),
            sets: vec![ExerciseSet { weight: 100.0, reps: 5 }],
        }],
    }
}

/// Dataset fixture containing only workouts
pub fn dataset(workouts: Vec<Workout>) -> SyncDataset {
    SyncDataset {
        workouts,
        recent_exercises: vec![],
        body_analyses: vec![],
    }
}

/// Sync service wired against a mock cloud-disk server
pub fn sync_service(server_url: &str, store: Arc<RecordStore>, enabled: bool) -> SyncService {
    let cloud = CloudConfig {
        base_url: server_url.to_string(),
        access_token: "test-token".to_string(),
    };
    let sync = SyncConfig {
        enabled,
        remote_folder: REMOTE_FOLDER.to_string(),
        remote_file: REMOTE_FILE.to_string(),
    };
    SyncService::new(store, CloudDiskClient::new(&cloud), &sync)
}
