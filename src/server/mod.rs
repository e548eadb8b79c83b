//! # HTTP Server for Petition Sheet Generation
//!
//! Serves the embedded frontend and the JSON API around the generation
//! pipeline: browse the target directory, select a target, submit the
//! form, then download, print or discard the produced PDF.
//!
//! ## Usage
//!
//! ```bash
//! stampa serve --listen 0.0.0.0:8080 --source ./config
//! ```
//!
//! Then open http://localhost:8080 in a browser.

mod handlers;
mod state;
mod static_files;

pub use state::ServerConfig;

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use std::time::Duration;

use crate::error::StampaError;
use crate::pipeline::Pipeline;
use crate::source::{ConfigSource, FsSource, HttpSource};
use crate::typeface::Typeface;
use state::AppState;

/// Seconds between expiry sweeps of the session and artifact stores.
const SWEEP_INTERVAL_SECS: u64 = 60;

/// Open the configured source: URLs get the HTTP backend, anything else
/// is treated as a directory on disk.
pub fn open_source(spec: &str) -> Result<Arc<dyn ConfigSource>, StampaError> {
    if spec.starts_with("http://") || spec.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(spec)?))
    } else {
        Ok(Arc::new(FsSource::new(spec)))
    }
}

/// Start the HTTP server.
pub async fn serve(config: ServerConfig) -> Result<(), StampaError> {
    let source = open_source(&config.source)?;
    let face = Typeface::load_or_system(config.font_path.as_deref())?;
    let pipeline = Pipeline::new(source.clone(), face);
    let app_state = Arc::new(AppState::new(config.clone(), source, pipeline));

    // Spawn background expiry sweeps
    tokio::spawn(sweep_stores(app_state.clone()));

    let app = Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Directory API
        .route("/api/targets", get(handlers::targets::list))
        // Session + generation API
        .route("/api/session", post(handlers::generate::create_session))
        .route("/api/target/select", post(handlers::generate::select_target))
        .route("/api/form/submit", post(handlers::generate::submit_form))
        // Artifact API
        .route("/api/artifact/:id/pdf", get(handlers::artifacts::pdf))
        .route(
            "/api/artifact/:id/download",
            get(handlers::artifacts::download),
        )
        .route("/api/artifact/:id", delete(handlers::artifacts::discard))
        .with_state(app_state);

    println!("Stampa HTTP server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!("Configuration source: {}", config.source);
    println!();
    println!(
        "Open http://{}/ in your browser to generate sheets",
        config.listen_addr
    );
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task: drop expired session values and stale artifacts.
async fn sweep_stores(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
    loop {
        interval.tick().await;
        let now = chrono::Utc::now();

        let touched = state.sessions.sweep(now).await;
        if touched > 0 {
            println!("[session] Cleared expired data in {touched} sessions");
        }

        let reclaimed = state.artifacts.sweep(now).await;
        if reclaimed > 0 {
            println!("[artifact] Reclaimed {reclaimed} stale artifacts");
        }
    }
}
