//! Shared point and diagram model for the HTTP wire contract.
//!
//! This crate owns the JSON representation used by both the backend server
//! and the annotation client. Diagram geometry stays opaque
//! (`serde_json::Value`): only the per-feature properties the client styles
//! and selects by are typed.

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Error returned when parsing wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Category input was not exactly one ASCII letter.
    #[error("invalid category {0:?}: expected a single letter A-Z")]
    InvalidCategory(String),
}

// =============================================================================
// POSITION
// =============================================================================

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned lat/lng rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Smallest rectangle containing every position, or `None` when empty.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let seed = Self { min_lat: first.lat, min_lng: first.lng, max_lat: first.lat, max_lng: first.lng };
        Some(iter.fold(seed, |b, p| Self {
            min_lat: b.min_lat.min(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lat: b.max_lat.max(p.lat),
            max_lng: b.max_lng.max(p.lng),
        }))
    }

    /// Grow each side by `ratio` of the current span (0.1 = 10%).
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = (self.max_lat - self.min_lat).abs() * ratio;
        let lng_buffer = (self.max_lng - self.min_lng).abs() * ratio;
        self.expand_by(lat_buffer, lng_buffer)
    }

    /// Grow each side by a fixed number of degrees.
    #[must_use]
    pub fn expand(self, degrees: f64) -> Self {
        self.expand_by(degrees, degrees)
    }

    /// Clamp to lat [-90, 90] and lng [-180, 180].
    #[must_use]
    pub fn clamp_to_world(self) -> Self {
        Self {
            min_lat: self.min_lat.max(-90.0),
            min_lng: self.min_lng.max(-180.0),
            max_lat: self.max_lat.min(90.0),
            max_lng: self.max_lng.min(180.0),
        }
    }

    fn expand_by(self, lat: f64, lng: f64) -> Self {
        Self {
            min_lat: self.min_lat - lat,
            min_lng: self.min_lng - lng,
            max_lat: self.max_lat + lat,
            max_lng: self.max_lng + lng,
        }
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Single uppercase letter tag on a point.
///
/// Input is case-insensitive; the stored letter is always `A`..=`Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(char);

impl Category {
    /// Parse a category from user or wire input. Exactly one ASCII letter is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidCategory`] for empty, multi-character, or
    /// non-letter input.
    pub fn parse(raw: &str) -> Result<Self, WireError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| WireError::InvalidCategory(raw.to_owned())),
            _ => Err(WireError::InvalidCategory(raw.to_owned())),
        }
    }

    /// Build a category from one character, upper-casing ASCII letters.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    /// The uppercase letter.
    #[must_use]
    pub fn letter(self) -> char {
        self.0
    }

    /// Zero-based position in the alphabet (`A` = 0).
    #[must_use]
    pub fn ordinal(self) -> usize {
        (u32::from(self.0) - u32::from('A')) as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional category, treating anything unparseable as absent.
///
/// Stored or engine-provided data may carry free-form strings; those render
/// with the default color rather than failing the whole payload.
///
/// # Errors
///
/// Never fails on well-formed JSON.
pub fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Category::parse(&s).ok(),
        _ => None,
    })
}

// =============================================================================
// POINT RECORD
// =============================================================================

/// One point as persisted: `{lat, lng, category}` with `category` null when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
}

impl PointRecord {
    #[must_use]
    pub fn new(position: LatLng, category: Option<Category>) -> Self {
        Self { lat: position.lat, lng: position.lng, category }
    }

    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

// =============================================================================
// DIAGRAM
// =============================================================================

/// Body of the diagram endpoint. `geojson` is null when there is nothing to draw.
///
/// The payload is kept raw so a malformed collection degrades to "no diagram"
/// on the client instead of failing the whole response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramResponse {
    #[serde(default)]
    pub geojson: Option<Value>,
}

impl DiagramResponse {
    #[must_use]
    pub fn empty() -> Self {
        Self { geojson: None }
    }

    #[must_use]
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        Self { geojson: serde_json::to_value(collection).ok() }
    }

    /// Decode the payload into a feature collection.
    ///
    /// Returns `None` when the payload is absent or does not decode.
    #[must_use]
    pub fn collection(&self) -> Option<FeatureCollection> {
        let value = self.geojson.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { kind: feature_collection_type(), features }
    }
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_owned()
}

fn feature_type() -> String {
    "Feature".to_owned()
}

/// A GeoJSON `Feature`. One feature describes the cell around one point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub properties: FeatureProperties,
}

impl Feature {
    #[must_use]
    pub fn new(geometry: Value, properties: FeatureProperties) -> Self {
        Self { kind: feature_type(), id: None, geometry, properties }
    }

    /// Interpret `id` as a seed index (number or numeric string).
    #[must_use]
    pub fn seed_index(&self) -> Option<usize> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|v| usize::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Feature properties: the typed keys the client needs, plus passthrough extras.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    #[serde(default)]
    pub point_index: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
