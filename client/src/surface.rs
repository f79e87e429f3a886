//! Host capability surface: the map library and the status widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client never draws anything itself. A host (browser map, terminal,
//! test fake) implements [`MapSurface`] and [`InfoPanel`]; the app calls
//! them with fully styled markers and shapes, and the host reports user
//! input back as [`crate::input::InputEvent`]s carrying the identifiers it
//! was handed here.

use serde_json::Value;
use wire::{Bounds, LatLng};

use crate::consts::{
    MARKER_FILL_COLOR, MARKER_FILL_OPACITY, MARKER_RADIUS_PX, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT,
    OUTLINE_DEFAULT_COLOR, OUTLINE_DEFAULT_WEIGHT, OUTLINE_SELECTED_COLOR, OUTLINE_SELECTED_WEIGHT,
    SHAPE_FILL_OPACITY, SHAPE_OUTLINE_OPACITY,
};
use crate::info::SelectionInfo;
use crate::points::PointId;
use crate::render::ShapeClickHandler;

/// Host-assigned handle for one shape layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// One shape inside a layer, addressed by its slot in the submitted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    pub layer: LayerId,
    pub slot: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub color: &'static str,
    pub weight: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS_PX,
            fill_color: MARKER_FILL_COLOR,
            fill_opacity: MARKER_FILL_OPACITY,
            color: MARKER_STROKE_COLOR,
            weight: MARKER_STROKE_WEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    /// Outline color.
    pub color: &'static str,
    /// Outline weight.
    pub weight: f64,
    pub opacity: f64,
}

impl ShapeStyle {
    /// Style for a cell with the given fill, outlined as selected or not.
    #[must_use]
    pub fn cell(fill_color: &'static str, selected: bool) -> Self {
        let (color, weight) = if selected {
            (OUTLINE_SELECTED_COLOR, OUTLINE_SELECTED_WEIGHT)
        } else {
            (OUTLINE_DEFAULT_COLOR, OUTLINE_DEFAULT_WEIGHT)
        };
        Self { fill_color, fill_opacity: SHAPE_FILL_OPACITY, color, weight, opacity: SHAPE_OUTLINE_OPACITY }
    }

    /// Same fill, outline switched to selected or default.
    #[must_use]
    pub fn with_selected(&self, selected: bool) -> Self {
        Self::cell(self.fill_color, selected)
    }

    #[must_use]
    pub fn is_selected_outline(&self) -> bool {
        self.color == OUTLINE_SELECTED_COLOR && (self.weight - OUTLINE_SELECTED_WEIGHT).abs() < f64::EPSILON
    }
}

/// A diagram cell ready for the map.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledShape {
    /// Opaque GeoJSON geometry, passed through untouched.
    pub geometry: Value,
    pub style: ShapeStyle,
    /// Click handler, absent for cells that carry no point index.
    pub on_click: Option<ShapeClickHandler>,
}

/// Map capabilities the client relies on.
pub trait MapSurface {
    fn add_marker(&mut self, id: PointId, position: LatLng, style: &MarkerStyle);
    fn remove_marker(&mut self, id: PointId);
    fn bring_marker_to_front(&mut self, id: PointId);
    /// Add a layer of shapes; slot `i` of the layer is `shapes[i]`.
    fn add_shape_layer(&mut self, shapes: Vec<StyledShape>) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);
    fn restyle_shape(&mut self, shape: ShapeRef, style: &ShapeStyle);
    /// Z-order the layer beneath every marker.
    fn send_layer_to_back(&mut self, layer: LayerId);
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Visible status widgets: point counter and selection info.
pub trait InfoPanel {
    fn set_point_count(&mut self, count: usize);
    fn show_selection(&mut self, info: &SelectionInfo);
}
