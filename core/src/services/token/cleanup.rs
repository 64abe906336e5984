//! Periodic maintenance of the ledger and the revocation list
//!
//! Runs outside the request path. Revocation entries are dropped once the
//! token they block has expired on its own. Ledger entries are kept for a
//! retention window past their expiry so reuse of a rotated token is still
//! recognized for the token's whole life.

use chrono::Duration;
use std::sync::Arc;
use tg_shared::CleanupConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::{RefreshTokenLedger, RevocationList};

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// How long ledger entries are kept after expiry (in days)
    pub retention_days: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            retention_days: 30,
            enabled: true,
        }
    }
}

impl From<&CleanupConfig> for TokenCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds,
            retention_days: config.retention_days,
            enabled: config.enabled,
        }
    }
}

/// Service for cleaning up expired ledger and revocation entries
pub struct TokenCleanupService {
    ledger: Arc<dyn RefreshTokenLedger>,
    revocations: Arc<dyn RevocationList>,
    clock: Arc<dyn Clock>,
    config: TokenCleanupConfig,
}

impl TokenCleanupService {
    pub fn new(
        ledger: Arc<dyn RefreshTokenLedger>,
        revocations: Arc<dyn RevocationList>,
        clock: Arc<dyn Clock>,
        config: TokenCleanupConfig,
    ) -> Self {
        Self {
            ledger,
            revocations,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// A failure in one store does not stop the other; failures are collected
    /// in [`CleanupResult::errors`].
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting token cleanup cycle");

        let now = self.clock.now();
        let mut result = CleanupResult::default();

        match self.revocations.purge_expired(now).await {
            Ok(count) => result.revocation_entries_deleted = count,
            Err(e) => {
                error!("Failed to purge revocation list: {}", e);
                result.errors.push(format!("Revocation list cleanup error: {}", e));
            }
        }

        let cutoff = now - Duration::days(self.config.retention_days);
        match self.ledger.purge_expired(cutoff).await {
            Ok(count) => result.ledger_entries_deleted = count,
            Err(e) => {
                error!("Failed to purge refresh token ledger: {}", e);
                result.errors.push(format!("Ledger cleanup error: {}", e));
            }
        }

        info!(
            "Token cleanup completed - Ledger: {}, Revocation list: {}",
            result.ledger_entries_deleted, result.revocation_entries_deleted
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => error!("Token cleanup cycle failed: {}", e),
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Ledger entries deleted past the retention window
    pub ledger_entries_deleted: u64,
    /// Revocation entries deleted after their token expired
    pub revocation_entries_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_cleaned(&self) -> u64 {
        self.ledger_entries_deleted + self.revocation_entries_deleted
    }
}
