//! Category letter to display color mapping.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use wire::Category;

/// Color for points with no category or an unrecognized one.
pub const DEFAULT_COLOR: &str = "#999999";

const LETTER_COLORS: [&str; 26] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c", "#fabebe",
    "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3", "#808000", "#ffd8b1", "#000075", "#808080",
    "#ff6f61", "#6b5b95", "#88b04b", "#f7cac9", "#92a8d1", "#955251",
];

/// Fixed palette: one color per letter plus a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryPalette {
    letters: [&'static str; 26],
    default: &'static str,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl CategoryPalette {
    pub const STANDARD: Self = Self { letters: LETTER_COLORS, default: DEFAULT_COLOR };

    #[must_use]
    pub fn color_for(&self, category: Option<Category>) -> &'static str {
        category.map_or(self.default, |c| self.letters[c.ordinal()])
    }

    /// Case-insensitive lookup from raw input; anything but one letter maps to the default.
    #[must_use]
    pub fn color_for_raw(&self, raw: Option<&str>) -> &'static str {
        match raw.map(Category::parse) {
            Some(Ok(category)) => self.color_for(Some(category)),
            _ => self.default,
        }
    }

    #[must_use]
    pub fn default_color(&self) -> &'static str {
        self.default
    }
}
