//! Application state for API handlers

use crate::config::DaemonConfig;
use crate::library::ExampleLibrary;
use bproc_toolchain::Pipeline;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Immutable daemon configuration
    pub config: Arc<DaemonConfig>,

    /// Submission pipeline
    pub pipeline: Pipeline,

    /// Example programs
    pub examples: ExampleLibrary,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state. `cancel` flipping to `true` kills
    /// every toolchain run started through this state.
    pub fn new(config: Arc<DaemonConfig>, cancel: watch::Receiver<bool>) -> Self {
        let pipeline = Pipeline::new(
            config.toolchain.clone(),
            config.workspace.clone(),
            cancel,
        );
        let examples = ExampleLibrary::new(config.examples.dir.clone());

        Self {
            config,
            pipeline,
            examples,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
