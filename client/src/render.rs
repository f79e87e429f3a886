//! Diagram rendering: feature collection in, styled map layer out.
//!
//! DESIGN
//! ======
//! Every refresh tears the previous layer down completely and builds a new
//! one; nothing is patched in place. The selection survives as a point
//! index owned by the selection controller. After each rebuild the renderer
//! scans the fresh shapes for the one whose `point_index` matches and caches
//! a [`ShapeRef`] to it, so a later deselect can demote that shape without
//! another scan. The cache is only valid for the layer it was taken from and
//! is dropped with it.
//!
//! Handlers on the surface keep the index the cell was drawn with. A removal
//! between two renders shifts the live indices here (see
//! [`DiagramRenderer::shift_down`]), and hosts' clicks are mapped back to the
//! current index through [`DiagramRenderer::resolve`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wire::FeatureCollection;

use crate::input::Modifiers;
use crate::palette::CategoryPalette;
use crate::surface::{LayerId, MapSurface, ShapeRef, ShapeStyle, StyledShape};

// =============================================================================
// CLICK HANDLERS
// =============================================================================

/// Per-shape click handler. Built with the shape's point index at draw time
/// so the host reports clicks by identifier instead of by shape object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeClickHandler {
    pub point_index: usize,
}

/// Result of a click on a diagram shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeClick {
    /// Shift was held: stop propagation and select this point's cell.
    Select(usize),
    /// Plain click: let it reach the map click handler.
    PassThrough,
}

impl ShapeClickHandler {
    /// Only shift-clicks select, so plain clicks on a cell still add points.
    #[must_use]
    pub fn handle(self, modifiers: Modifiers) -> ShapeClick {
        if modifiers.shift { ShapeClick::Select(self.point_index) } else { ShapeClick::PassThrough }
    }
}

// =============================================================================
// RENDERER
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct RenderedShape {
    drawn_index: Option<usize>,
    point_index: Option<usize>,
    style: ShapeStyle,
}

/// Outcome of one [`DiagramRenderer::render`] call that produced a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSummary {
    pub layer: LayerId,
    pub shapes: usize,
    pub selected: Option<ShapeRef>,
}

#[derive(Debug, Default)]
pub struct DiagramRenderer {
    palette: CategoryPalette,
    layer: Option<LayerId>,
    shapes: Vec<RenderedShape>,
    selected: Option<ShapeRef>,
}

impl DiagramRenderer {
    #[must_use]
    pub fn new(palette: CategoryPalette) -> Self {
        Self { palette, ..Self::default() }
    }

    /// Remove the current layer and drop the cached selected shape.
    pub fn teardown<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        if let Some(layer) = self.layer.take() {
            surface.remove_layer(layer);
        }
        self.shapes.clear();
        self.selected = None;
    }

    /// Replace the rendered diagram.
    ///
    /// The previous layer is always removed first. Returns `None` when there
    /// is nothing to draw (no collection, or a collection without features),
    /// in which case no layer is created.
    pub fn render<M: MapSurface + ?Sized>(
        &mut self,
        surface: &mut M,
        diagram: Option<&FeatureCollection>,
        selection: Option<usize>,
    ) -> Option<RenderSummary> {
        self.teardown(surface);

        let collection = diagram.filter(|c| !c.features.is_empty())?;
        let mut styled = Vec::with_capacity(collection.features.len());
        let mut selected_slot = None;

        for (slot, feature) in collection.features.iter().enumerate() {
            let point_index = feature.properties.point_index;
            // Only the first cell for the selected point is bold; it is the one cached.
            let is_selected = selected_slot.is_none() && point_index.is_some() && point_index == selection;
            if is_selected {
                selected_slot = Some(slot);
            }
            let style = ShapeStyle::cell(self.palette.color_for(feature.properties.category), is_selected);
            self.shapes.push(RenderedShape { drawn_index: point_index, point_index, style: style.clone() });
            styled.push(StyledShape {
                geometry: feature.geometry.clone(),
                style,
                on_click: point_index.map(|point_index| ShapeClickHandler { point_index }),
            });
        }

        let layer = surface.add_shape_layer(styled);
        surface.send_layer_to_back(layer);
        self.layer = Some(layer);
        self.selected = selected_slot.map(|slot| ShapeRef { layer, slot });

        Some(RenderSummary { layer, shapes: self.shapes.len(), selected: self.selected })
    }

    /// Demote the cached selected shape, then promote the shape for `index`.
    ///
    /// Returns the promoted shape, or `None` if the current layer has no
    /// shape for that point.
    pub fn highlight<M: MapSurface + ?Sized>(&mut self, surface: &mut M, index: usize) -> Option<ShapeRef> {
        self.unhighlight(surface);
        let layer = self.layer?;
        let slot = self.shapes.iter().position(|s| s.point_index == Some(index))?;
        let shape = ShapeRef { layer, slot };
        self.restyle(surface, shape, true);
        self.selected = Some(shape);
        Some(shape)
    }

    /// Renormalize the live cells after the point at `removed` is deleted.
    ///
    /// The removed point's cell loses its index; later cells move down by one.
    pub fn shift_down(&mut self, removed: usize) {
        for shape in &mut self.shapes {
            shape.point_index = match shape.point_index {
                Some(i) if i == removed => None,
                Some(i) if i > removed => Some(i - 1),
                other => other,
            };
        }
    }

    /// Map a handler from the live layer to the point its cell stands for now.
    ///
    /// Returns `None` when no live cell was drawn for the handler or the
    /// cell's point has been removed since.
    #[must_use]
    pub fn resolve(&self, handler: ShapeClickHandler) -> Option<ShapeClickHandler> {
        let shape = self.shapes.iter().find(|s| s.drawn_index == Some(handler.point_index))?;
        shape.point_index.map(|point_index| ShapeClickHandler { point_index })
    }

    /// Handler drawn on the live cell of point `index`, as a host would
    /// report it when that cell is clicked.
    #[must_use]
    pub fn handler_for(&self, index: usize) -> Option<ShapeClickHandler> {
        let shape = self.shapes.iter().find(|s| s.point_index == Some(index))?;
        shape.drawn_index.map(|point_index| ShapeClickHandler { point_index })
    }

    /// Restore the default outline on the cached selected shape, if any.
    pub fn unhighlight<M: MapSurface + ?Sized>(&mut self, surface: &mut M) {
        if let Some(shape) = self.selected.take() {
            self.restyle(surface, shape, false);
        }
    }

    fn restyle<M: MapSurface + ?Sized>(&mut self, surface: &mut M, shape: ShapeRef, selected: bool) {
        if self.layer != Some(shape.layer) {
            return;
        }
        if let Some(rendered) = self.shapes.get_mut(shape.slot) {
            rendered.style = rendered.style.with_selected(selected);
            surface.restyle_shape(shape, &rendered.style);
        }
    }

    #[must_use]
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<ShapeRef> {
        self.selected
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Current style of the shape in `slot` of the live layer.
    #[must_use]
    pub fn shape_style(&self, slot: usize) -> Option<&ShapeStyle> {
        self.shapes.get(slot).map(|s| &s.style)
    }

    /// Point index carried by the shape in `slot` of the live layer.
    #[must_use]
    pub fn shape_point_index(&self, slot: usize) -> Option<usize> {
        self.shapes.get(slot).and_then(|s| s.point_index)
    }
}
