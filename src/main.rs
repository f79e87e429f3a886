mod config;
mod engine;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::engine::{DiagramEngine, DisabledEngine, HttpEngine};
use crate::services::points::PointFile;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("diagram engine: {0}")]
    Engine(#[from] engine::EngineError),
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Diagrams are optional: without an engine the map still stores points.
    let engine: Arc<dyn DiagramEngine> = match &config.engine_url {
        Some(url) => {
            let http = HttpEngine::new(url.clone(), config.engine_timeouts)?;
            tracing::info!(url = http.url(), "diagram engine configured");
            Arc::new(http)
        }
        None => {
            tracing::warn!("DIAGRAM_ENGINE_URL not set; diagrams disabled");
            Arc::new(DisabledEngine)
        }
    };

    let points = PointFile::new(config.points_file.clone());
    tracing::info!(path = %points.path().display(), "point storage");

    let state = state::AppState::new(points, engine, config.diagram);
    let app = routes::app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind).await.map_err(StartupError::Bind)?;
    tracing::info!(addr = %config.bind, "mapcells listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
