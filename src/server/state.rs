//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::artifact::ArtifactStore;
use crate::pipeline::Pipeline;
use crate::session::SessionStore;
use crate::source::ConfigSource;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory or base URL holding `template-config.json`, `data.json`
    /// and the template images.
    pub source: String,
    /// TTF font for overlay text. `None` probes the system font dirs.
    pub font_path: Option<PathBuf>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// The configuration source, shared with the pipeline.
    pub source: Arc<dyn ConfigSource>,
    pub pipeline: Pipeline,
    pub sessions: SessionStore,
    pub artifacts: ArtifactStore,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig, source: Arc<dyn ConfigSource>, pipeline: Pipeline) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Self {
            config,
            source,
            pipeline,
            sessions: SessionStore::new(),
            artifacts: ArtifactStore::new(),
            boot_time,
        }
    }
}
