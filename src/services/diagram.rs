//! Diagram generation: seeds in, annotated cells out.
//!
//! DESIGN
//! ======
//! The engine knows nothing about categories. This service builds the clip
//! box around the stored points, asks the engine for cells, and copies each
//! point's category and index onto the cell whose id names that point.
//! Cells with an unknown id or no geometry are passed through untouched or
//! dropped respectively.

#[cfg(test)]
#[path = "diagram_test.rs"]
mod diagram_test;

use tracing::{debug, warn};
use wire::{Bounds, FeatureCollection, PointRecord};

use crate::config::DiagramSettings;
use crate::engine::{ClipBox, DiagramEngine, EngineRequest};

/// Seeds' bounding box grown by `padding_deg` and clamped to the world.
#[must_use]
pub fn clip_box(points: &[PointRecord], padding_deg: f64) -> Option<ClipBox> {
    let bounds = Bounds::from_positions(points.iter().map(PointRecord::position))?;
    Some(bounds.expand(padding_deg).clamp_to_world().into())
}

/// Tag each cell with its point's category and index; drop empty cells.
pub fn annotate(collection: &mut FeatureCollection, points: &[PointRecord]) {
    collection.features.retain(|feature| !feature.geometry.is_null());
    for feature in &mut collection.features {
        let Some(index) = feature.seed_index().filter(|&i| i < points.len()) else {
            continue;
        };
        feature.properties.category = points[index].category;
        feature.properties.point_index = Some(index);
    }
}

/// Compute the annotated diagram for `points`.
///
/// Returns `None` when there are too few points, when the engine has nothing
/// to offer, or when the engine fails (failures are logged).
pub async fn generate(
    engine: &dyn DiagramEngine,
    points: &[PointRecord],
    settings: DiagramSettings,
) -> Option<FeatureCollection> {
    if points.len() < settings.min_points {
        debug!(count = points.len(), min = settings.min_points, "too few points for a diagram");
        return None;
    }
    let clip = clip_box(points, settings.clip_padding_deg)?;
    let request = EngineRequest::new(points, clip);

    match engine.compute(&request).await {
        Ok(Some(mut collection)) => {
            annotate(&mut collection, points);
            debug!(cells = collection.features.len(), "diagram computed");
            Some(collection)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "diagram engine failed");
            None
        }
    }
}
