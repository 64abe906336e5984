//! Storage, upload and maintenance configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::env_or;

/// Periodic purge of expired ledger and revocation entries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether the background cleanup task runs at all
    pub enabled: bool,

    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,

    /// Days an expired refresh ledger entry is kept before deletion
    pub retention_days: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
            retention_days: 30,
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("CLEANUP_ENABLED", defaults.enabled),
            interval_seconds: env_or("CLEANUP_INTERVAL_SECONDS", defaults.interval_seconds),
            retention_days: env_or("CLEANUP_RETENTION_DAYS", defaults.retention_days),
        }
    }
}

/// Storage access configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Upper bound for a single storage call in milliseconds
    pub timeout_ms: u64,

    /// Directory holding uploaded file payloads
    pub upload_dir: PathBuf,

    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,

    /// Token cleanup settings
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
            cleanup: CleanupConfig::default(),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_ms: env_or("STORAGE_TIMEOUT_MS", defaults.timeout_ms),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            cleanup: CleanupConfig::from_env(),
        }
    }

    /// Storage timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
