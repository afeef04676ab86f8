use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::types::BackendError;

/// Configuration for the launcher backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of rendered result rows. Values at or below zero
    /// render nothing.
    #[serde(default = "default_result_limit")]
    pub result_limit: i64,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    #[serde(default = "default_tailscale_binary")]
    pub tailscale_binary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            cache_ttl_secs: default_cache_ttl_secs(),
            command_timeout_secs: default_command_timeout_secs(),
            tailscale_binary: default_tailscale_binary(),
        }
    }
}

fn default_result_limit() -> i64 {
    9
}

fn default_cache_ttl_secs() -> u64 {
    10
}

fn default_command_timeout_secs() -> u64 {
    5
}

fn default_tailscale_binary() -> String {
    "tailscale".to_string()
}

impl Config {
    /// Load configuration from config.json next to the executable.
    /// Falls back to defaults if the file doesn't exist or can't be parsed.
    pub async fn load() -> Self {
        match Self::try_load().await {
            Ok(config) => {
                info!(
                    limit = config.result_limit,
                    ttl_secs = config.cache_ttl_secs,
                    binary = %config.tailscale_binary,
                    "Loaded configuration"
                );
                config
            }
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        }
    }

    async fn try_load() -> Result<Self, BackendError> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .await
            .map_err(|err| BackendError::Config(format!("Failed to read config file: {err}")))?;

        serde_json::from_str(&contents)
            .map_err(|err| BackendError::Config(format!("Failed to parse config.json: {err}")))
    }

    /// Get the path to the config.json file, expected beside the executable.
    fn get_config_path() -> PathBuf {
        if let Ok(exe_path) = std::env::current_exe() {
            debug!(path = %exe_path.display(), "Executable path detected");

            if let Some(exe_dir) = exe_path.parent() {
                let config_path = exe_dir.join("config.json");
                debug!(path = %config_path.display(), "Looking for config");
                return config_path;
            }
        }

        // Fallback: look in current directory
        warn!("Using fallback: looking for config.json in current directory");
        PathBuf::from("config.json")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Result limit clamped to zero; negative preferences render nothing.
    pub fn effective_limit(&self) -> usize {
        self.result_limit.max(0) as usize
    }
}
