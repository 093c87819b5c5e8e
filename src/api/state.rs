//! Application State
//!
//! Shared state accessible by all handlers. Only settings live here; the
//! roster itself is read from disk again on every request.

use std::sync::Arc;
use std::time::Instant;

use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::roster::{load_roster, ClassRoster, LoadResult};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Roster location, dashboard settings and theme
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Read the roster for one render pass
    ///
    /// The outer error only covers a failed blocking task; load failures are
    /// returned as data so the caller decides how to present them.
    pub async fn load_roster(&self) -> ApiResult<LoadResult<ClassRoster>> {
        let path = self.config.roster.path.clone();
        tokio::task::spawn_blocking(move || load_roster(&path))
            .await
            .map_err(|e| ApiError::Internal(format!("Roster loader task failed: {}", e)))
    }
}
