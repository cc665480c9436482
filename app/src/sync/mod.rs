//! Sync orchestration between the local record store and the cloud drive
//!
//! One sync cycle: snapshot local data, fetch the remote blob, reconcile,
//! commit the merge locally, then upload. A failed fetch aborts before any
//! local write; a failed upload is reported as a failed sync but does not
//! roll back the local commit. Overlapping invocations are rejected by an
//! in-progress latch so a second sync can never merge against a stale local
//! snapshot.

pub mod merge;

use crate::config::SyncConfig;
use crate::error::{AppError, AppResult};
use crate::remote::CloudDiskClient;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use fittrack_shared::models::SyncDataset;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a completed sync cycle
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub workouts: usize,
    pub recent_exercises: usize,
    pub body_analyses: usize,
    /// Whether the remote side had a data file before this cycle
    pub remote_existed: bool,
    pub finished_at: DateTime<Utc>,
}

/// Drives sync cycles against the configured cloud disk
pub struct SyncService {
    store: Arc<RecordStore>,
    disk: CloudDiskClient,
    enabled: bool,
    remote_folder: String,
    remote_file: String,
    in_flight: AtomicBool,
}

impl SyncService {
    pub fn new(store: Arc<RecordStore>, disk: CloudDiskClient, config: &SyncConfig) -> Self {
        Self {
            store,
            disk,
            enabled: config.enabled,
            remote_folder: config.remote_folder.clone(),
            remote_file: config.remote_file.clone(),
            in_flight: AtomicBool::new(false),
        }
    }

    fn remote_path(&self) -> String {
        format!("{}/{}", self.remote_folder, self.remote_file)
    }

    /// Run one sync cycle. Returns an error if sync is disabled, another
    /// cycle is in flight, or a remote operation fails.
    pub async fn sync_now(&self) -> AppResult<SyncReport> {
        if !self.enabled {
            return Err(AppError::SyncDisabled);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("rejected sync: another cycle is in flight");
            return Err(AppError::SyncInProgress);
        }
        let result = self.run_cycle().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_cycle(&self) -> AppResult<SyncReport> {
        let local = self.store.snapshot().await?;
        info!(
            workouts = local.workouts.len(),
            recent_exercises = local.recent_exercises.len(),
            body_analyses = local.body_analyses.len(),
            "starting sync cycle"
        );

        // A failed fetch aborts here: local data is untouched.
        let remote = self.fetch_remote().await?;
        let remote_existed = remote.is_some();

        let merged = merge::merge_datasets(Some(local), remote);
        self.store.apply(&merged).await?;
        info!(
            workouts = merged.workouts.len(),
            recent_exercises = merged.recent_exercises.len(),
            body_analyses = merged.body_analyses.len(),
            "merged dataset committed locally"
        );

        // The merged data is already persisted locally; an upload failure is
        // reported to the caller but costs no local data.
        self.push_remote(&merged).await?;
        self.store.mark_synced().await?;

        let report = SyncReport {
            workouts: merged.workouts.len(),
            recent_exercises: merged.recent_exercises.len(),
            body_analyses: merged.body_analyses.len(),
            remote_existed,
            finished_at: Utc::now(),
        };
        info!(remote_path = %self.remote_path(), "sync cycle complete");
        Ok(report)
    }

    async fn fetch_remote(&self) -> AppResult<Option<SyncDataset>> {
        match self.disk.download(&self.remote_path()).await? {
            None => {
                info!("no remote data file yet");
                Ok(None)
            }
            Some(raw) => {
                let dataset = serde_json::from_str(&raw).map_err(|e| {
                    AppError::Remote(format!("remote data file is not valid JSON: {e}"))
                })?;
                Ok(Some(dataset))
            }
        }
    }

    async fn push_remote(&self, merged: &SyncDataset) -> AppResult<()> {
        self.disk.ensure_folder(&self.remote_folder).await?;
        let body = serde_json::to_string(merged)?;
        self.disk.upload(&self.remote_path(), body).await
    }
}
