//! Application state: points, selection, palette.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AppState` per annotation session, owned by the
//! [`crate::app::AnnotationApp`] controller. Nothing here touches the map:
//! this is the logical model the renderer and the info panel are derived
//! from. The only way to remove a point is [`AppState::remove_point`], which
//! renormalizes the selection in the same step.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use tracing::debug;
use wire::{Category, LatLng};

use crate::info::SelectionInfo;
use crate::palette::CategoryPalette;
use crate::points::{CategoryError, Point, PointId, PointStore};
use crate::selection::{Selection, SelectionController, Shift};

#[derive(Debug, Default)]
pub struct AppState {
    points: PointStore,
    selection: SelectionController,
    palette: CategoryPalette,
}

impl AppState {
    #[must_use]
    pub fn new(palette: CategoryPalette) -> Self {
        Self { palette, ..Self::default() }
    }

    #[must_use]
    pub fn points(&self) -> &PointStore {
        &self.points
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection.state()
    }

    #[must_use]
    pub fn palette(&self) -> &CategoryPalette {
        &self.palette
    }

    /// Append a point, returning its index and marker key.
    pub fn add_point(&mut self, position: LatLng, category: Option<Category>) -> (usize, PointId) {
        self.points.insert(position, category)
    }

    /// Remove the point at `index` and shift the selection to match.
    ///
    /// Returns `None` (and changes nothing) when `index` is out of range.
    pub fn remove_point(&mut self, index: usize) -> Option<(Point, Shift)> {
        let point = self.points.remove_at(index)?;
        let shift = self.selection.shift_down(index);
        Some((point, shift))
    }

    /// Select the cell for point `index`, returning the previous selection.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.selection.select(index)
    }

    pub fn deselect(&mut self) -> Option<usize> {
        self.selection.deselect()
    }

    /// Set the category of the point at `index` from raw input.
    ///
    /// # Errors
    ///
    /// See [`PointStore::set_category`].
    pub fn set_category(&mut self, index: usize, letter: &str) -> Result<Category, CategoryError> {
        self.points.set_category(index, letter)
    }

    /// Set `category` on the selected point.
    ///
    /// Returns the index that changed, or `None` if nothing is selected or
    /// the selection no longer names a point.
    pub fn categorize_selected(&mut self, category: Category) -> Option<usize> {
        let index = self.selection.index()?;
        match self.points.assign_category(index, category) {
            Ok(()) => Some(index),
            Err(e) => {
                debug!(index, error = %e, "selection names no point; category not set");
                None
            }
        }
    }

    #[must_use]
    pub fn selection_info(&self) -> SelectionInfo {
        SelectionInfo::derive(&self.points, self.selection.state(), &self.palette)
    }
}
