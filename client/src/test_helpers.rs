//! In-memory fakes for the map surface, info panel and backend.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde_json::json;
use wire::{Bounds, DiagramResponse, Feature, FeatureCollection, FeatureProperties, LatLng, PointRecord};

use crate::info::SelectionInfo;
use crate::points::PointId;
use crate::surface::{InfoPanel, LayerId, MapSurface, MarkerStyle, ShapeRef, ShapeStyle, StyledShape};
use crate::sync::{Backend, SyncError};

// =============================================================================
// MAP SURFACE
// =============================================================================

#[derive(Debug, Default)]
pub struct FakeSurface {
    /// Markers in z-order, front-most last.
    pub markers: Vec<(PointId, LatLng)>,
    pub layers: BTreeMap<u64, Vec<StyledShape>>,
    /// Layers sent behind the markers.
    pub back_layers: Vec<LayerId>,
    pub removed_layers: Vec<LayerId>,
    pub restyles: usize,
    pub fitted: Option<Bounds>,
    next_layer: u64,
}

impl FakeSurface {
    /// The single live layer, if any.
    pub fn live_layer(&self) -> Option<(LayerId, &Vec<StyledShape>)> {
        self.layers.iter().next_back().map(|(id, shapes)| (LayerId(*id), shapes))
    }

    pub fn shape(&self, shape: ShapeRef) -> Option<&StyledShape> {
        self.layers.get(&shape.layer.0).and_then(|shapes| shapes.get(shape.slot))
    }

    /// Slots of the live layer drawn with the selected outline.
    pub fn bold_slots(&self) -> Vec<usize> {
        self.live_layer()
            .map(|(_, shapes)| {
                shapes
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.style.is_selected_outline())
                    .map(|(slot, _)| slot)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn marker_ids(&self) -> Vec<PointId> {
        self.markers.iter().map(|(id, _)| *id).collect()
    }
}

impl MapSurface for FakeSurface {
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
        self.layers.insert(self.next_layer, shapes);
        LayerId(self.next_layer)
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer.0);
        self.removed_layers.push(layer);
    }

    fn restyle_shape(&mut self, shape: ShapeRef, style: &ShapeStyle) {
        if let Some(target) = self.layers.get_mut(&shape.layer.0).and_then(|s| s.get_mut(shape.slot)) {
            target.style = style.clone();
            self.restyles += 1;
        }
    }

    fn send_layer_to_back(&mut self, layer: LayerId) {
        self.back_layers.push(layer);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted = Some(bounds);
    }
}

// =============================================================================
// INFO PANEL
// =============================================================================

#[derive(Debug, Default)]
pub struct FakePanel {
    pub count: Option<usize>,
    pub info: Option<SelectionInfo>,
    pub info_updates: usize,
}

impl InfoPanel for FakePanel {
    fn set_point_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn show_selection(&mut self, info: &SelectionInfo) {
        self.info = Some(info.clone());
        self.info_updates += 1;
    }
}

// =============================================================================
// BACKEND
// =============================================================================

#[derive(Debug, Clone)]
pub enum DiagramMode {
    /// One feature per stored point, carrying its index and category.
    Echo,
    Fixed(DiagramResponse),
    FailStatus(u16),
}

/// Backend that stores saves in memory and answers diagrams per [`DiagramMode`].
#[derive(Debug)]
pub struct FakeBackend {
    pub stored: RefCell<Vec<PointRecord>>,
    pub saves: RefCell<Vec<Vec<PointRecord>>>,
    pub fetches: Cell<usize>,
    pub fail_saves: Cell<bool>,
    pub mode: RefCell<DiagramMode>,
    /// Call order, `"save"` / `"fetch"`.
    pub calls: RefCell<Vec<&'static str>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::with_points(Vec::new())
    }
}

impl FakeBackend {
    pub fn with_points(points: Vec<PointRecord>) -> Self {
        Self {
            stored: RefCell::new(points),
            saves: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
            fail_saves: Cell::new(false),
            mode: RefCell::new(DiagramMode::Echo),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: DiagramMode) {
        *self.mode.borrow_mut() = mode;
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn last_save(&self) -> Option<Vec<PointRecord>> {
        self.saves.borrow().last().cloned()
    }
}

/// A diagram with one feature per record, in order.
pub fn echo_diagram(points: &[PointRecord]) -> DiagramResponse {
    if points.is_empty() {
        return DiagramResponse::empty();
    }
    let features = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut feature = Feature::new(
                json!({ "type": "Point", "coordinates": [p.lng, p.lat] }),
                FeatureProperties { category: p.category, point_index: Some(i), ..FeatureProperties::default() },
            );
            feature.id = Some(json!(i));
            feature
        })
        .collect();
    DiagramResponse::from_collection(&FeatureCollection::new(features))
}

#[async_trait::async_trait(?Send)]
impl Backend for FakeBackend {
    async fn save_points(&self, points: &[PointRecord]) -> Result<(), SyncError> {
        self.calls.borrow_mut().push("save");
        if self.fail_saves.get() {
            return Err(SyncError::Request("connection refused".to_owned()));
        }
        self.saves.borrow_mut().push(points.to_vec());
        *self.stored.borrow_mut() = points.to_vec();
        Ok(())
    }

    async fn fetch_diagram(&self) -> Result<DiagramResponse, SyncError> {
        self.calls.borrow_mut().push("fetch");
        self.fetches.set(self.fetches.get() + 1);
        let mode = self.mode.borrow().clone();
        match mode {
            DiagramMode::Echo => Ok(echo_diagram(&self.stored.borrow())),
            DiagramMode::Fixed(response) => Ok(response),
            DiagramMode::FailStatus(status) => Err(SyncError::Status { status, body: "fake failure".to_owned() }),
        }
    }
}
