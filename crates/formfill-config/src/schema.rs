//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub learning: LearningConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where learned mappings and the profile are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every record. `~` and `${VAR}` are expanded.
    #[serde(default = "default_storage_path")]
    pub path: String,

    #[serde(default = "default_mappings_record")]
    pub mappings_record: String,

    #[serde(default = "default_profile_record")]
    pub profile_record: String,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            mappings_record: default_mappings_record(),
            profile_record: default_profile_record(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.formfill/storage.json".to_string()
}

fn default_mappings_record() -> String {
    "customMappings".to_string()
}

fn default_profile_record() -> String {
    "userProfile".to_string()
}

/// Learn-request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    /// How long a captured element stays eligible for a learn request.
    #[serde(default = "default_capture_ttl_seconds")]
    pub capture_ttl_seconds: u64,
}

impl LearningConfig {
    pub fn capture_ttl(&self) -> Duration {
        Duration::from_secs(self.capture_ttl_seconds)
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            capture_ttl_seconds: default_capture_ttl_seconds(),
        }
    }
}

fn default_capture_ttl_seconds() -> u64 {
    30
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files.
    #[serde(default)]
    pub file_output: bool,

    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// Rotated files kept on disk.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl LoggingConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.directory))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            directory: default_log_directory(),
            max_files: default_max_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "~/.formfill/logs".to_string()
}

fn default_max_files() -> usize {
    7
}
