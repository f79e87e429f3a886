//! Selection info panel contents.

#[cfg(test)]
#[path = "info_test.rs"]
mod info_test;

use crate::palette::CategoryPalette;
use crate::points::PointStore;
use crate::selection::Selection;

/// Label shown for a selected point without a category.
pub const NO_CATEGORY_LABEL: &str = "None (gray)";

/// What the selection panel shows. A pure function of store, selection and palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionInfo {
    /// Nothing selected, or the selection no longer names a point.
    Hidden,
    /// Selected point has a category: letter label and colored badge.
    Categorized { letter: char, color: &'static str },
    /// Selected point has no category: "none" label, badge hidden.
    Uncategorized,
}

impl SelectionInfo {
    #[must_use]
    pub fn derive(points: &PointStore, selection: Selection, palette: &CategoryPalette) -> Self {
        let Some(point) = selection.index().and_then(|i| points.get(i)) else {
            return Self::Hidden;
        };
        match point.category {
            Some(category) => Self::Categorized { letter: category.letter(), color: palette.color_for(Some(category)) },
            None => Self::Uncategorized,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Category label text, `None` when the panel is hidden.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Categorized { letter, .. } => Some(letter.to_string()),
            Self::Uncategorized => Some(NO_CATEGORY_LABEL.to_owned()),
        }
    }

    /// Badge letter and background color, `None` when the badge is hidden.
    #[must_use]
    pub fn badge(&self) -> Option<(char, &'static str)> {
        match self {
            Self::Categorized { letter, color } => Some((*letter, *color)),
            _ => None,
        }
    }
}
