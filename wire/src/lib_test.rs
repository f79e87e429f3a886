use super::*;

// =============================================================================
// Category
// =============================================================================

#[test]
fn category_parse_upper_cases_letters() {
    assert_eq!(Category::parse("b").expect("letter").letter(), 'B');
    assert_eq!(Category::parse("B").expect("letter").letter(), 'B');
}

#[test]
fn category_parse_rejects_digits_and_multi_char_input() {
    assert_eq!(Category::parse("1"), Err(WireError::InvalidCategory("1".to_owned())));
    assert!(Category::parse("AB").is_err());
    assert!(Category::parse("").is_err());
    assert!(Category::parse("é").is_err());
    assert!(Category::parse("Escape").is_err());
}

#[test]
fn category_ordinal_spans_alphabet() {
    assert_eq!(Category::parse("A").expect("letter").ordinal(), 0);
    assert_eq!(Category::parse("z").expect("letter").ordinal(), 25);
}

#[test]
fn category_serializes_as_single_letter_string() {
    let json = serde_json::to_value(Category::parse("d").expect("letter")).expect("serialize");
    assert_eq!(json, serde_json::json!("D"));
}

// =============================================================================
// PointRecord
// =============================================================================

#[test]
fn point_record_serializes_absent_category_as_null() {
    let record = PointRecord::new(LatLng::new(51.5, -0.12), None);
    let json = serde_json::to_value(&record).expect("serialize");
    assert_eq!(json, serde_json::json!({ "lat": 51.5, "lng": -0.12, "category": null }));
}

#[test]
fn point_record_accepts_lowercase_and_drops_garbage_categories() {
    let records: Vec<PointRecord> = serde_json::from_str(
        r#"[{"lat":1,"lng":2,"category":"c"},{"lat":3,"lng":4,"category":"nope"},{"lat":5,"lng":6}]"#,
    )
    .expect("lenient decode");
    assert_eq!(records[0].category.map(Category::letter), Some('C'));
    assert!(records[1].category.is_none());
    assert!(records[2].category.is_none());
    assert_eq!(records[2].position(), LatLng::new(5.0, 6.0));
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn bounds_from_positions_empty_is_none() {
    assert!(Bounds::from_positions(Vec::new()).is_none());
}

#[test]
fn bounds_pad_grows_each_side_by_ratio_of_span() {
    let bounds = Bounds::from_positions([LatLng::new(0.0, 0.0), LatLng::new(10.0, 20.0)]).expect("bounds");
    let padded = bounds.pad(0.1);
    assert!((padded.min_lat - -1.0).abs() < 1e-9);
    assert!((padded.max_lat - 11.0).abs() < 1e-9);
    assert!((padded.min_lng - -2.0).abs() < 1e-9);
    assert!((padded.max_lng - 22.0).abs() < 1e-9);
}

#[test]
fn bounds_expand_then_clamp_stays_inside_world() {
    let bounds = Bounds::from_positions([LatLng::new(89.0, 179.0), LatLng::new(-89.5, -179.5)]).expect("bounds");
    let clip = bounds.expand(2.0).clamp_to_world();
    assert_eq!(clip, Bounds { min_lat: -90.0, min_lng: -180.0, max_lat: 90.0, max_lng: 180.0 });
}

// =============================================================================
// DiagramResponse
// =============================================================================

#[test]
fn diagram_response_null_geojson_has_no_collection() {
    let response: DiagramResponse = serde_json::from_str(r#"{"geojson":null}"#).expect("decode");
    assert!(response.collection().is_none());
    let missing: DiagramResponse = serde_json::from_str("{}").expect("decode");
    assert!(missing.collection().is_none());
}

#[test]
fn diagram_response_malformed_geojson_has_no_collection() {
    let response: DiagramResponse = serde_json::from_str(r#"{"geojson":{"features":"oops"}}"#).expect("decode");
    assert!(response.collection().is_none());
}

#[test]
fn diagram_response_decodes_typed_properties_and_keeps_extras() {
    let response: DiagramResponse = serde_json::from_value(serde_json::json!({
        "geojson": {
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "3",
                "geometry": { "type": "Polygon", "coordinates": [] },
                "properties": { "category": "a", "point_index": 3, "area": 12.5 }
            }]
        }
    }))
    .expect("decode");
    let collection = response.collection().expect("collection");
    let feature = &collection.features[0];
    assert_eq!(feature.seed_index(), Some(3));
    assert_eq!(feature.properties.point_index, Some(3));
    assert_eq!(feature.properties.category.map(Category::letter), Some('A'));
    assert_eq!(feature.properties.extra["area"], serde_json::json!(12.5));
}

#[test]
fn feature_seed_index_reads_numeric_ids_and_rejects_others() {
    let mut feature = Feature::new(Value::Null, FeatureProperties::default());
    feature.id = Some(serde_json::json!(7));
    assert_eq!(feature.seed_index(), Some(7));
    feature.id = Some(serde_json::json!("x7"));
    assert_eq!(feature.seed_index(), None);
    feature.id = Some(serde_json::json!(-1));
    assert_eq!(feature.seed_index(), None);
}
