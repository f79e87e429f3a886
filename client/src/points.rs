//! Ordered point collection.
//!
//! DESIGN
//! ======
//! A point's identity for diagram correlation is its position in the
//! sequence: removing point `i` shifts every later point down by one. Markers
//! on the map need a key that survives those shifts, so each point also
//! carries a [`PointId`] allocated once at insertion and never reused.

#[cfg(test)]
#[path = "points_test.rs"]
mod points_test;

use wire::{Category, LatLng, PointRecord, WireError};

/// Stable marker key for a point. Unlike the positional index it never shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u64);

impl PointId {
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A user-placed location with an optional category.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub position: LatLng,
    pub category: Option<Category>,
}

impl Point {
    /// Wire form of this point.
    #[must_use]
    pub fn record(&self) -> PointRecord {
        PointRecord::new(self.position, self.category)
    }
}

/// Why a category change was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error(transparent)]
    Invalid(#[from] WireError),
    #[error("no point at index {0}")]
    NoSuchPoint(usize),
}

/// Ordered collection of annotated points.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Point>,
    next_id: u64,
}

impl PointStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point and return its index (`count() - 1`).
    pub fn add(&mut self, position: LatLng, category: Option<Category>) -> usize {
        self.insert(position, category).0
    }

    /// Append a point and return both its index and its marker key.
    pub fn insert(&mut self, position: LatLng, category: Option<Category>) -> (usize, PointId) {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(Point { id, position, category });
        (self.points.len() - 1, id)
    }

    /// Remove the point at `index`. Out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Point> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// Set the category of the point at `index` from raw input.
    ///
    /// Only a single letter is accepted; lower case is normalized.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] for invalid input or a missing point. The
    /// store is unchanged in both cases.
    pub fn set_category(&mut self, index: usize, letter: &str) -> Result<Category, CategoryError> {
        let category = Category::parse(letter)?;
        self.assign_category(index, category)?;
        Ok(category)
    }

    /// Set an already-validated category on the point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::NoSuchPoint`] when `index` is out of range.
    pub fn assign_category(&mut self, index: usize, category: Category) -> Result<(), CategoryError> {
        let point = self.points.get_mut(index).ok_or(CategoryError::NoSuchPoint(index))?;
        point.category = Some(category);
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Current positional index of the point with `id`.
    #[must_use]
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// The full ordered sequence in wire form.
    #[must_use]
    pub fn records(&self) -> Vec<PointRecord> {
        self.points.iter().map(Point::record).collect()
    }
}
