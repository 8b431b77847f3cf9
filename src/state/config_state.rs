use crate::config::{
    app_directory, ProjectDirsExt, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECONDS,
};
use crate::error::Result;
use crate::playerdb::dto::player_profile::PlayerPlatform;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

const CONFIG_FILENAME: &str = "lookup_config.json";
const CONFIG_CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub default_platform: PlayerPlatform,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
}

fn default_config_version() -> u32 {
    CONFIG_CURRENT_VERSION
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_logging() -> bool {
    true
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_CURRENT_VERSION,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_platform: PlayerPlatform::default(),
            log_level: default_log_level(),
            file_logging: default_file_logging(),
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<LookupConfig>>,
    config_path: PathBuf,
    save_lock: Mutex<()>,
}

impl ConfigManager {
    /// Manager for the config file in the platform's config directory.
    pub fn new() -> Result<Self> {
        let config_path = app_directory()?.config_file(CONFIG_FILENAME);
        Ok(Self::with_path(config_path))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        debug!("ConfigManager: using path {:?}", config_path);
        Self {
            config: Arc::new(RwLock::new(LookupConfig::default())),
            config_path,
            save_lock: Mutex::new(()),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file. A missing file is created with defaults; an
    /// unparseable one is backed up and replaced by defaults.
    pub async fn load_config(&self) -> Result<LookupConfig> {
        if !self.config_path.exists() {
            info!("Config file not found, using default configuration");
            self.save_config().await?;
            return Ok(self.get_config().await);
        }

        info!("Loading lookup configuration from: {:?}", self.config_path);
        let config_data = fs::read_to_string(&self.config_path).await?;

        match serde_json::from_str::<LookupConfig>(&config_data) {
            Ok(loaded_config) => {
                debug!("Loaded config: {:?}", loaded_config);
                *self.config.write().await = loaded_config;
            }
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                warn!("Config file is corrupted, creating backup and using defaults");

                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(backup_err) = fs::copy(&self.config_path, &backup_path).await {
                    error!("Failed to backup corrupted config: {}", backup_err);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                *self.config.write().await = LookupConfig::default();
                self.save_config().await?;
            }
        }

        Ok(self.get_config().await)
    }

    pub async fn save_config(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        if let Some(parent_dir) = self.config_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir).await?;
            }
        }

        let config_data = {
            let config = self.config.read().await;
            serde_json::to_string_pretty(&*config)?
        };

        fs::write(&self.config_path, config_data).await?;
        info!("Saved lookup configuration to: {:?}", self.config_path);

        Ok(())
    }

    pub async fn get_config(&self) -> LookupConfig {
        self.config.read().await.clone()
    }

    pub async fn set_config(&self, new_config: LookupConfig) -> Result<()> {
        {
            let mut config = self.config.write().await;
            if *config == new_config {
                debug!("No config changes detected, skipping save");
                return Ok(());
            }
            let version = config.version;
            *config = LookupConfig {
                version,
                ..new_config
            };
        }
        self.save_config().await
    }
}
