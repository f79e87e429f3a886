//! Shared styling constants for markers and diagram shapes.

// ── Markers ─────────────────────────────────────────────────────

/// Point marker circle radius in screen pixels.
pub const MARKER_RADIUS_PX: f64 = 8.0;

pub const MARKER_FILL_COLOR: &str = "#ff4444";

pub const MARKER_FILL_OPACITY: f64 = 0.9;

pub const MARKER_STROKE_COLOR: &str = "#aa0000";

pub const MARKER_STROKE_WEIGHT: f64 = 2.0;

// ── Diagram shapes ──────────────────────────────────────────────

pub const SHAPE_FILL_OPACITY: f64 = 0.5;

pub const SHAPE_OUTLINE_OPACITY: f64 = 1.0;

/// Outline of an unselected cell.
pub const OUTLINE_DEFAULT_COLOR: &str = "#333";
pub const OUTLINE_DEFAULT_WEIGHT: f64 = 2.0;

/// Outline of the selected cell.
pub const OUTLINE_SELECTED_COLOR: &str = "#000";
pub const OUTLINE_SELECTED_WEIGHT: f64 = 4.0;

// ── Viewport ────────────────────────────────────────────────────

/// Fraction of the point span added on each side when fitting the initial view.
pub const FIT_BOUNDS_PADDING: f64 = 0.1;
