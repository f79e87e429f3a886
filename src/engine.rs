//! Diagram engine adapter.
//!
//! DESIGN
//! ======
//! Cell computation is delegated to an external engine behind the
//! [`DiagramEngine`] trait. The server sends the ordered seeds and a clip box
//! and expects a GeoJSON `FeatureCollection` back whose feature ids are the
//! seed ids. [`HttpEngine`] speaks that contract over HTTP; [`DisabledEngine`]
//! stands in when no engine is configured.
//!
//! ERROR HANDLING
//! ==============
//! Engine failures are returned as [`EngineError`]. The diagram route logs
//! them and answers with a null diagram so the map stays usable.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::time::Duration;

use serde::Serialize;
use wire::{Bounds, FeatureCollection, PointRecord};

use crate::config::EngineTimeouts;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Request(String),
    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("engine response parse failed: {0}")]
    Parse(String),
    #[error("engine HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// One seed sent to the engine. `id` is the point's index in the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Seed {
    pub id: usize,
    pub lat: f64,
    pub lng: f64,
}

/// Axis-aligned clip rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl From<Bounds> for ClipBox {
    fn from(b: Bounds) -> Self {
        Self { min_lng: b.min_lng, min_lat: b.min_lat, max_lng: b.max_lng, max_lat: b.max_lat }
    }
}

/// Request body for the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineRequest {
    pub seeds: Vec<Seed>,
    pub clip: ClipBox,
}

impl EngineRequest {
    /// Seeds in stored order with their indices as ids.
    #[must_use]
    pub fn new(points: &[PointRecord], clip: ClipBox) -> Self {
        let seeds = points.iter().enumerate().map(|(id, p)| Seed { id, lat: p.lat, lng: p.lng }).collect();
        Self { seeds, clip }
    }
}

/// Computes one cell per seed, clipped to the request's box.
#[async_trait::async_trait]
pub trait DiagramEngine: Send + Sync {
    /// Returns `Ok(None)` when the engine has nothing to offer.
    async fn compute(&self, request: &EngineRequest) -> Result<Option<FeatureCollection>, EngineError>;
}

// =============================================================================
// HTTP ENGINE
// =============================================================================

pub struct HttpEngine {
    http: reqwest::Client,
    url: String,
}

impl HttpEngine {
    /// # Errors
    ///
    /// Returns [`EngineError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(url: String, timeouts: EngineTimeouts) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| EngineError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl DiagramEngine for HttpEngine {
    async fn compute(&self, request: &EngineRequest) -> Result<Option<FeatureCollection>, EngineError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| EngineError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| EngineError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(EngineError::Status { status, body: text });
        }

        parse_collection(&text)
    }
}

/// Decode the engine body. `null` means no diagram.
fn parse_collection(body: &str) -> Result<Option<FeatureCollection>, EngineError> {
    serde_json::from_str(body).map_err(|e| EngineError::Parse(e.to_string()))
}

// =============================================================================
// DISABLED ENGINE
// =============================================================================

/// Engine used when none is configured. Never produces a diagram.
pub struct DisabledEngine;

#[async_trait::async_trait]
impl DiagramEngine for DisabledEngine {
    async fn compute(&self, _request: &EngineRequest) -> Result<Option<FeatureCollection>, EngineError> {
        Ok(None)
    }
}
