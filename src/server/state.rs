//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::batch::LabelGenerator;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Parent directory for per-request scratch directories
    /// (system temp directory when `None`)
    pub scratch_dir: Option<PathBuf>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Loaded once at startup, read-only afterwards.
    pub generator: Arc<LabelGenerator>,
}

impl AppState {
    pub fn new(config: ServerConfig, generator: Arc<LabelGenerator>) -> Self {
        Self { config, generator }
    }
}
