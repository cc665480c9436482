//! Configuration management for FitTrack
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FT__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub cloud: CloudConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-key JSON record files
    pub data_dir: PathBuf,
}

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub enabled: bool,
    /// Folder on the cloud disk holding the sync blob
    pub remote_folder: String,
    /// File name of the sync blob inside the remote folder
    pub remote_file: String,
}

/// Cloud-disk API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub base_url: String,
    /// OAuth access token for the disk API
    pub access_token: String,
}

/// Body-composition inference configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// When false, analyses use a deterministic simulated estimate
    pub enabled: bool,
    pub url: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:8600/v1/body-composition".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from("data"),
            },
            sync: SyncConfig {
                enabled: false,
                remote_folder: "apps/fittrack".to_string(),
                remote_file: "fittrack-data.json".to_string(),
            },
            cloud: CloudConfig {
                base_url: "https://disk.example.com/api/v1".to_string(),
                access_token: String::new(),
            },
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FT__ prefix
    ///    e.g., FT__CLOUD__ACCESS_TOKEN=... sets cloud.access_token
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix("FT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
