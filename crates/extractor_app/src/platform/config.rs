use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use extractor_client::{ClientSettings, DEFAULT_API_BASE};
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "extractor.ron";
/// Overrides `api_url` when set to a non-empty value.
pub const API_URL_ENV: &str = "EXTRACTOR_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
}

/// Used when the configured timeout is zero.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_destination: LogDestination::File,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

impl AppConfig {
    pub fn apply_api_override(&mut self, value: Option<String>) {
        if let Some(api_url) = value.filter(|value| !value.trim().is_empty()) {
            self.api_url = api_url.trim().to_string();
        }
    }

    /// Replaces a zero timeout with the default. Returns whether it did.
    pub fn clamp_timeout(&mut self) -> bool {
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
            true
        } else {
            false
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::with_api_base(self.api_url.clone())
        }
    }
}

/// Reads the optional config file. `Ok(None)` when the file does not exist.
pub fn read_config_file(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
