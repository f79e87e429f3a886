//! Which diagram cell is selected, keyed by point index.
//!
//! Rendered cells are rebuilt on every diagram refresh, so the selection is
//! a logical index into the point sequence rather than a reference to any
//! rendered object. The renderer re-resolves the matching cell after each
//! rebuild.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

/// Selection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(usize),
}

impl Selection {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Unselected => None,
            Self::Selected(index) => Some(index),
        }
    }

    #[must_use]
    pub fn is_selected(self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

/// Effect of a point removal on the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Removed point was after the selection, or nothing was selected.
    Unchanged,
    /// Removed point was before the selection; it now points at `index`.
    Decremented(usize),
    /// The selected point itself was removed.
    Cleared,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> Selection {
        self.state
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.state.index()
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    /// Select `index`, returning the previously selected index.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        std::mem::replace(&mut self.state, Selection::Selected(index)).index()
    }

    /// Clear the selection, returning the previously selected index.
    pub fn deselect(&mut self) -> Option<usize> {
        std::mem::take(&mut self.state).index()
    }

    /// Renormalize after the point at `removed` was deleted.
    pub fn shift_down(&mut self, removed: usize) -> Shift {
        match self.state {
            Selection::Selected(index) if index == removed => {
                self.state = Selection::Unselected;
                Shift::Cleared
            }
            Selection::Selected(index) if index > removed => {
                self.state = Selection::Selected(index - 1);
                Shift::Decremented(index - 1)
            }
            _ => Shift::Unchanged,
        }
    }
}
