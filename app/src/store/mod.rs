//! Record store: typed access to locally persisted collections
//!
//! Four independent keys, each holding one JSON document: device settings,
//! workouts, the recent-exercise list, and body analyses. The store is the
//! single owner of local persistence; services and the sync orchestrator go
//! through it rather than touching files themselves.

mod backend;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};

use crate::error::AppResult;
use chrono::Utc;
use fittrack_shared::models::{BodyAnalysis, DeviceSettings, SyncDataset, Workout};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::info;

const KEY_SETTINGS: &str = "settings";
const KEY_WORKOUTS: &str = "workouts";
const KEY_RECENT_EXERCISES: &str = "recent_exercises";
const KEY_BODY_ANALYSES: &str = "body_analyses";

/// Typed record store over a storage backend
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by one JSON file per key under `dir`
    pub fn file(dir: impl AsRef<Path>) -> Self {
        Self::new(Box::new(FileStorage::new(dir)))
    }

    /// In-memory store for tests
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    async fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        match self.backend.read(key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(T::default()),
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.backend.write(key, &raw).await
    }

    pub async fn workouts(&self) -> AppResult<Vec<Workout>> {
        self.read_json(KEY_WORKOUTS).await
    }

    pub async fn save_workouts(&self, workouts: &[Workout]) -> AppResult<()> {
        self.write_json(KEY_WORKOUTS, &workouts).await
    }

    pub async fn recent_exercises(&self) -> AppResult<Vec<String>> {
        self.read_json(KEY_RECENT_EXERCISES).await
    }

    pub async fn save_recent_exercises(&self, names: &[String]) -> AppResult<()> {
        self.write_json(KEY_RECENT_EXERCISES, &names).await
    }

    pub async fn body_analyses(&self) -> AppResult<Vec<BodyAnalysis>> {
        self.read_json(KEY_BODY_ANALYSES).await
    }

    pub async fn save_body_analyses(&self, analyses: &[BodyAnalysis]) -> AppResult<()> {
        self.write_json(KEY_BODY_ANALYSES, &analyses).await
    }

    /// Device settings, generating and persisting them on first access
    pub async fn settings(&self) -> AppResult<DeviceSettings> {
        match self.backend.read(KEY_SETTINGS).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let settings = DeviceSettings::generate();
                info!(device_id = %settings.device_id, "initialized device settings");
                self.write_json(KEY_SETTINGS, &settings).await?;
                Ok(settings)
            }
        }
    }

    pub async fn save_settings(&self, settings: &DeviceSettings) -> AppResult<()> {
        self.write_json(KEY_SETTINGS, settings).await
    }

    /// Snapshot the three synced collections as one dataset
    pub async fn snapshot(&self) -> AppResult<SyncDataset> {
        Ok(SyncDataset {
            workouts: self.workouts().await?,
            recent_exercises: self.recent_exercises().await?,
            body_analyses: self.body_analyses().await?,
        })
    }

    /// Commit a merged dataset, replacing all three synced collections
    pub async fn apply(&self, dataset: &SyncDataset) -> AppResult<()> {
        self.save_workouts(&dataset.workouts).await?;
        self.save_recent_exercises(&dataset.recent_exercises).await?;
        self.save_body_analyses(&dataset.body_analyses).await?;
        Ok(())
    }

    /// Explicit bulk clear: removes every record collection. Device identity
    /// survives, but sync bookkeeping is reset.
    pub async fn clear_all(&self) -> AppResult<()> {
        self.backend.remove(KEY_WORKOUTS).await?;
        self.backend.remove(KEY_RECENT_EXERCISES).await?;
        self.backend.remove(KEY_BODY_ANALYSES).await?;

        if let Some(raw) = self.backend.read(KEY_SETTINGS).await? {
            let mut settings: DeviceSettings = serde_json::from_str(&raw)?;
            settings.last_synced_at = None;
            self.write_json(KEY_SETTINGS, &settings).await?;
        }
        info!("cleared all local records");
        Ok(())
    }

    /// Stamp the time of the last successful sync
    pub async fn mark_synced(&self) -> AppResult<()> {
        let mut settings = self.settings().await?;
        settings.last_synced_at = Some(Utc::now());
        self.save_settings(&settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_shared::models::{ExerciseEntry, ExerciseSet};

    fn workout(id: &str) -> Workout {
        Workout {
            id: id.to_string(),
            date: Utc::now(),
            updated_at: None,
            device_id: "dev".to_string(),
            exercises: vec![ExerciseEntry {
                exercise_name: "Squat".to_string(),
                sets: vec![ExerciseSet { weight: 100.0, reps: 5 }],
            }],
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_collections() {
        let store = RecordStore::in_memory();
        assert!(store.workouts().await.unwrap().is_empty());
        assert!(store.recent_exercises().await.unwrap().is_empty());
        assert!(store.body_analyses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workouts_round_trip() {
        let store = RecordStore::in_memory();
        store.save_workouts(&[workout("a"), workout("b")]).await.unwrap();

        let loaded = store.workouts().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a");
    }

    #[tokio::test]
    async fn test_settings_generated_once() {
        let store = RecordStore::in_memory();
        let first = store.settings().await.unwrap();
        let second = store.settings().await.unwrap();
        assert_eq!(first.device_id, second.device_id);
    }

    #[tokio::test]
    async fn test_snapshot_and_apply() {
        let store = RecordStore::in_memory();
        store.save_workouts(&[workout("a")]).await.unwrap();
        store
            .save_recent_exercises(&["Squat".to_string()])
            .await
            .unwrap();

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.workouts.len(), 1);
        assert_eq!(snapshot.recent_exercises, vec!["Squat".to_string()]);

        let other = RecordStore::in_memory();
        other.apply(&snapshot).await.unwrap();
        assert_eq!(other.workouts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_device_identity() {
        let store = RecordStore::in_memory();
        let before = store.settings().await.unwrap();
        store.save_workouts(&[workout("a")]).await.unwrap();
        store.mark_synced().await.unwrap();

        store.clear_all().await.unwrap();

        assert!(store.workouts().await.unwrap().is_empty());
        let after = store.settings().await.unwrap();
        assert_eq!(after.device_id, before.device_id);
        assert!(after.last_synced_at.is_none());
    }
}
