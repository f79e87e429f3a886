//! HTTP implementation of [`Backend`] over `reqwest`.
//!
//! Thin wrapper over the four backend endpoints. Status handling and body
//! decoding live in free functions so they can be tested without a server.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use tracing::debug;
use wire::{DiagramResponse, PointRecord};

use crate::config::ClientConfig;
use crate::sync::{Backend, SyncError};

pub const SAVE_POINTS_PATH: &str = "/save_points";
pub const GET_POINTS_PATH: &str = "/get_points";
pub const DIAGRAM_PATH: &str = "/voronoi";
pub const HEALTH_PATH: &str = "/healthz";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`SyncError::HttpClientBuild`] if the TLS stack cannot be set up.
    pub fn new(config: ClientConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SyncError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Load the stored point set.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success status, or an undecodable body.
    pub async fn load_points(&self) -> Result<Vec<PointRecord>, SyncError> {
        let text = self.get_text(GET_POINTS_PATH).await?;
        parse_points(&text)
    }

    /// Check that the backend is up.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or non-success status.
    pub async fn health(&self) -> Result<(), SyncError> {
        self.get_text(HEALTH_PATH).await.map(|_| ())
    }

    async fn get_text(&self, path: &str) -> Result<String, SyncError> {
        let response = self
            .http
            .get(self.config.endpoint(path))
            .send()
            .await
            .map_err(|e| SyncError::Request(e.to_string()))?;
        read_body(response).await
    }
}

#[async_trait::async_trait(?Send)]
impl Backend for HttpBackend {
    async fn save_points(&self, points: &[PointRecord]) -> Result<(), SyncError> {
        let response = self
            .http
            .post(self.config.endpoint(SAVE_POINTS_PATH))
            .json(points)
            .send()
            .await
            .map_err(|e| SyncError::Request(e.to_string()))?;
        read_body(response).await?;
        debug!(count = points.len(), "points saved");
        Ok(())
    }

    async fn fetch_diagram(&self) -> Result<DiagramResponse, SyncError> {
        let text = self.get_text(DIAGRAM_PATH).await?;
        Ok(parse_diagram(&text))
    }
}

// =============================================================================
// PARSING
// =============================================================================

async fn read_body(response: reqwest::Response) -> Result<String, SyncError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| SyncError::Request(e.to_string()))?;
    check_status(status, body)
}

/// Pass a 2xx body through; anything else becomes [`SyncError::Status`] carrying the body.
fn check_status(status: u16, body: String) -> Result<String, SyncError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(SyncError::Status { status, body }) }
}

/// Decode a `/voronoi` body. A body that is not a JSON object is treated as
/// "no diagram" rather than an error.
fn parse_diagram(body: &str) -> DiagramResponse {
    match serde_json::from_str::<DiagramResponse>(body) {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "diagram body is not valid JSON; treating as no diagram");
            DiagramResponse::empty()
        }
    }
}

fn parse_points(body: &str) -> Result<Vec<PointRecord>, SyncError> {
    serde_json::from_str(body).map_err(|e| SyncError::Parse(e.to_string()))
}
