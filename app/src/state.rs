//! Application state management
//!
//! The store, remote clients, and sync service are constructed exactly once
//! here and handed to whoever needs them by reference. Single-instance
//! semantics without hidden shared state.

use crate::config::AppConfig;
use crate::remote::{CloudDiskClient, InferenceClient};
use crate::store::RecordStore;
use crate::sync::SyncService;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Arc<AppConfig>,
    store: Arc<RecordStore>,
    inference: InferenceClient,
    sync: SyncService,
}

impl AppState {
    /// Build the application root from configuration
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(RecordStore::file(&config.storage.data_dir));
        let disk = CloudDiskClient::new(&config.cloud);
        let sync = SyncService::new(Arc::clone(&store), disk, &config.sync);
        let inference = InferenceClient::new(&config.inference);

        Self {
            config: Arc::new(config),
            store,
            inference,
            sync,
        }
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[inline]
    pub fn inference(&self) -> &InferenceClient {
        &self.inference
    }

    #[inline]
    pub fn sync(&self) -> &SyncService {
        &self.sync
    }
}
