//! Point list routes.

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::error;
use wire::PointRecord;

use crate::services::points::StoreError;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SaveResponse {
    pub status: &'static str,
}

/// `POST /save_points`: replace the stored point list.
pub async fn save_points(
    State(state): State<AppState>,
    Json(points): Json<Vec<PointRecord>>,
) -> Result<Json<SaveResponse>, StatusCode> {
    state.points.save(&points).await.map_err(store_error_to_status)?;
    Ok(Json(SaveResponse { status: "ok" }))
}

/// `GET /get_points`: the stored point list, empty when nothing is saved.
pub async fn get_points(State(state): State<AppState>) -> Result<Json<Vec<PointRecord>>, StatusCode> {
    let points = state.points.load().await.map_err(store_error_to_status)?;
    Ok(Json(points))
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    error!(error = %err, "point store failed");
    match err {
        StoreError::Io(_) | StoreError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
