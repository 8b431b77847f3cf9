use crate::error::{AppError, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://playerdb.co/api/player";
pub const FALLBACK_AVATAR_URL: &str = "https://api.dicebear.com/7.x/initials/svg";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

pub static APP_DIRECTORY: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("co", "playerdb", "PlayerDbRadar"));

pub static HTTP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub fn app_directory() -> Result<&'static ProjectDirs> {
    APP_DIRECTORY
        .as_ref()
        .ok_or_else(|| AppError::Config("Failed to get application directory".to_string()))
}

// Extension trait for ProjectDirs to resolve where our files live
pub trait ProjectDirsExt {
    fn config_file(&self, file_name: &str) -> PathBuf;
    fn log_dir(&self) -> PathBuf;
}

impl ProjectDirsExt for ProjectDirs {
    fn config_file(&self, file_name: &str) -> PathBuf {
        self.config_dir().join(file_name)
    }

    fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}

/// HTTP client with our agent and a bounded timeout.
///
/// Every `PlayerDbApi` owns its own client; there is no process-wide instance.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let timeout = Duration::from_secs(timeout_secs.max(1));
    reqwest::ClientBuilder::new()
        .user_agent(HTTP_USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))
}
