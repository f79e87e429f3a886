//! Text map surface and info panel for the terminal session.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use client::info::SelectionInfo;
use client::points::PointId;
use client::surface::{InfoPanel, LayerId, MapSurface, MarkerStyle, ShapeRef, ShapeStyle, StyledShape};
use wire::{Bounds, LatLng};

// =============================================================================
// SURFACE
// =============================================================================

/// Keeps the drawn markers and the single diagram layer in memory and renders
/// them as text on demand.
#[derive(Debug, Default)]
pub struct TextSurface {
    markers: Vec<(PointId, LatLng)>,
    layer: Option<(LayerId, Vec<StyledShape>)>,
    viewport: Option<Bounds>,
    next_layer: u64,
}

impl TextSurface {
    /// Marker id at `position` in z-order (back to front).
    #[must_use]
    pub fn marker_at(&self, position: usize) -> Option<PointId> {
        self.markers.get(position).map(|(id, _)| *id)
    }

    /// Multi-line description of the map.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(v) = self.viewport {
            out.push_str(&format!(
                "viewport: lat {:.4}..{:.4}, lng {:.4}..{:.4}\n",
                v.min_lat, v.max_lat, v.min_lng, v.max_lng
            ));
        }
        for (n, (id, pos)) in self.markers.iter().enumerate() {
            out.push_str(&format!("marker {n} (#{}) at {:.5}, {:.5}\n", id.raw(), pos.lat, pos.lng));
        }
        match &self.layer {
            None => out.push_str("diagram: none\n"),
            Some((layer, shapes)) => {
                out.push_str(&format!("diagram: layer {} with {} cells\n", layer.0, shapes.len()));
                for (slot, shape) in shapes.iter().enumerate() {
                    let point = shape.on_click.map_or_else(|| "-".to_owned(), |h| h.point_index.to_string());
                    let outline = if shape.style.is_selected_outline() { " [selected]" } else { "" };
                    out.push_str(&format!("  cell {slot}: point {point} fill {}{outline}\n", shape.style.fill_color));
                }
            }
        }
        out
    }
}

impl MapSurface for TextSurface {
    fn add_marker(&mut self, id: PointId, position: LatLng, _style: &MarkerStyle) {
        self.markers.push((id, position));
    }

    fn remove_marker(&mut self, id: PointId) {
        self.markers.retain(|(m, _)| *m != id);
    }

    fn bring_marker_to_front(&mut self, id: PointId) {
        if let Some(pos) = self.markers.iter().position(|(m, _)| *m == id) {
            let marker = self.markers.remove(pos);
            self.markers.push(marker);
        }
    }

    fn add_shape_layer(&mut self, shapes: Vec<StyledShape>) -> LayerId {
        self.next_layer += 1;
        let id = LayerId(self.next_layer);
        self.layer = Some((id, shapes));
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        if self.layer.as_ref().is_some_and(|(id, _)| *id == layer) {
            self.layer = None;
        }
    }

    fn restyle_shape(&mut self, shape: ShapeRef, style: &ShapeStyle) {
        if let Some((id, shapes)) = self.layer.as_mut() {
            if *id == shape.layer {
                if let Some(target) = shapes.get_mut(shape.slot) {
                    target.style = style.clone();
                }
            }
        }
    }

    fn send_layer_to_back(&mut self, _layer: LayerId) {
        // Text output always lists the diagram after the markers.
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, Default)]
pub struct TextPanel {
    count: usize,
    selection: Option<SelectionInfo>,
}

impl TextPanel {
    /// One-line status: point count plus the selection panel when visible.
    #[must_use]
    pub fn status(&self) -> String {
        let mut line = format!("points: {}", self.count);
        let Some(info) = self.selection.as_ref() else {
            return line;
        };
        if let Some(label) = info.label() {
            line.push_str(&format!(" | selected category: {label}"));
        }
        if let Some((letter, color)) = info.badge() {
            line.push_str(&format!(" [{letter} {color}]"));
        }
        line
    }
}

impl InfoPanel for TextPanel {
    fn set_point_count(&mut self, count: usize) {
        self.count = count;
    }

    fn show_selection(&mut self, info: &SelectionInfo) {
        self.selection = Some(info.clone());
    }
}
