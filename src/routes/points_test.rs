use wire::{Category, LatLng};

use super::*;
use crate::state::test_helpers::test_app_state_without_engine;

fn record(lat: f64, lng: f64, category: Option<char>) -> PointRecord {
    PointRecord::new(LatLng::new(lat, lng), category.and_then(Category::from_char))
}

#[tokio::test]
async fn get_points_is_empty_before_any_save() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_without_engine(&dir);
    let Json(points) = get_points(State(state)).await.unwrap();
    assert!(points.is_empty());
}

#[tokio::test]
async fn save_points_responds_ok_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_without_engine(&dir);
    let saved = vec![record(51.5, -0.1, Some('a')), record(48.9, 2.3, None)];

    let Json(response) = save_points(State(state.clone()), Json(saved.clone())).await.unwrap();
    assert_eq!(response, SaveResponse { status: "ok" });
    assert_eq!(serde_json::to_value(&response).unwrap(), serde_json::json!({"status": "ok"}));

    let Json(points) = get_points(State(state)).await.unwrap();
    assert_eq!(points, vec![record(51.5, -0.1, Some('A')), record(48.9, 2.3, None)]);
}

#[tokio::test]
async fn save_points_with_empty_list_clears_storage() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_without_engine(&dir);
    save_points(State(state.clone()), Json(vec![record(1.0, 1.0, None)])).await.unwrap();
    save_points(State(state.clone()), Json(Vec::new())).await.unwrap();

    let Json(points) = get_points(State(state)).await.unwrap();
    assert!(points.is_empty());
}

#[tokio::test]
async fn corrupt_storage_maps_to_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_without_engine(&dir);
    std::fs::write(state.points.path(), "[{").unwrap();

    let status = get_points(State(state)).await.unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn store_error_to_status_maps_io_to_500() {
    let err = StoreError::Io(std::io::Error::other("disk full"));
    assert_eq!(store_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}
