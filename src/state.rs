//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the point file, the diagram engine, and diagram settings. Clone is
//! required by Axum; the store and engine are `Arc`-wrapped.

use std::sync::Arc;

use crate::config::DiagramSettings;
use crate::engine::DiagramEngine;
use crate::services::points::PointFile;

#[derive(Clone)]
pub struct AppState {
    pub points: Arc<PointFile>,
    pub engine: Arc<dyn DiagramEngine>,
    pub diagram: DiagramSettings,
}

impl AppState {
    #[must_use]
    pub fn new(points: PointFile, engine: Arc<dyn DiagramEngine>, diagram: DiagramSettings) -> Self {
        Self { points: Arc::new(points), engine, diagram }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use serde_json::json;
    use wire::{Feature, FeatureCollection, FeatureProperties};

    use super::*;
    use crate::engine::{DisabledEngine, EngineError, EngineRequest};

    /// Engine that answers one square cell per seed, ids matching seed ids.
    #[derive(Default)]
    pub struct SquareEngine {
        pub calls: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl DiagramEngine for SquareEngine {
        async fn compute(&self, request: &EngineRequest) -> Result<Option<FeatureCollection>, EngineError> {
            *self.calls.lock().unwrap() += 1;
            let features = request
                .seeds
                .iter()
                .map(|seed| {
                    let (x, y) = (seed.lng, seed.lat);
                    let mut feature = Feature::new(
                        json!({
                            "type": "Polygon",
                            "coordinates": [[[x - 0.5, y - 0.5], [x + 0.5, y - 0.5], [x + 0.5, y + 0.5], [x - 0.5, y - 0.5]]]
                        }),
                        FeatureProperties::default(),
                    );
                    feature.id = Some(json!(seed.id.to_string()));
                    feature
                })
                .collect();
            Ok(Some(FeatureCollection::new(features)))
        }
    }

    /// Engine that always fails.
    pub struct DownEngine;

    #[async_trait::async_trait]
    impl DiagramEngine for DownEngine {
        async fn compute(&self, _request: &EngineRequest) -> Result<Option<FeatureCollection>, EngineError> {
            Err(EngineError::Request("connection refused".to_owned()))
        }
    }

    /// App state backed by `points.json` inside `dir`.
    #[must_use]
    pub fn test_app_state(dir: &tempfile::TempDir, engine: Arc<dyn DiagramEngine>) -> AppState {
        AppState::new(PointFile::new(dir.path().join("points.json")), engine, DiagramSettings::default())
    }

    /// App state with diagrams disabled.
    #[must_use]
    pub fn test_app_state_without_engine(dir: &tempfile::TempDir) -> AppState {
        test_app_state(dir, Arc::new(DisabledEngine))
    }
}
