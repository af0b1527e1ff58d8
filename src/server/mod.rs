//! # Web Form
//!
//! Single-page form for generating label archives over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! carelabel serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser. Each submission renders
//! the requested labels into a scratch directory and downloads them as a
//! ZIP. Requests are handled one batch at a time per submission; the
//! browser waits until the batch is done.

pub mod handlers;
mod state;
mod static_files;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::batch::LabelGenerator;
use crate::error::LabelError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(static_files::index_handler))
        .route("/api/options", get(handlers::labels::options))
        .route("/api/labels", post(handlers::labels::generate))
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use carelabel::batch::LabelGenerator;
/// use carelabel::catalog::TemplateStore;
/// use carelabel::config::LabelConfig;
/// use carelabel::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), carelabel::error::LabelError> {
/// let generator = LabelGenerator::new(LabelConfig::default(), TemplateStore::standard("."));
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     scratch_dir: None,
/// };
///
/// serve(config, generator).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, generator: LabelGenerator) -> Result<(), LabelError> {
    let app_state = Arc::new(AppState::new(config.clone(), Arc::new(generator)));
    let app = router(app_state);

    log::info!("Label generator HTTP server starting...");
    log::info!("Listening on: {}", config.listen_addr);
    log::info!("Open http://{}/ in your browser", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| LabelError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| LabelError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
