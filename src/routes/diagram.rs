//! Diagram route.

#[cfg(test)]
#[path = "diagram_test.rs"]
mod diagram_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use wire::DiagramResponse;

use crate::routes::points::store_error_to_status;
use crate::services::diagram;
use crate::state::AppState;

/// `GET /voronoi`: cells for the stored points, `{"geojson": null}` when
/// there is nothing to draw.
pub async fn voronoi(State(state): State<AppState>) -> Result<Json<DiagramResponse>, StatusCode> {
    let points = state.points.load().await.map_err(store_error_to_status)?;
    let cells = diagram::generate(state.engine.as_ref(), &points, state.diagram).await;
    Ok(Json(cells.as_ref().map_or_else(DiagramResponse::empty, DiagramResponse::from_collection)))
}
