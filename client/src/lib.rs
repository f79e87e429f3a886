//! Map annotation client core.
//!
//! Users place points on a map, tag them with single-letter categories, and
//! see a diagram of cells (one per point) computed by the backend. This crate
//! owns the session logic: the ordered point set, cell selection, keyboard
//! categorization, diagram styling, and the persist-then-refresh sync cycle.
//! The host supplies a [`surface::MapSurface`] and [`surface::InfoPanel`]
//! and forwards raw input as [`input::InputEvent`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Top-level [`app::AnnotationApp`] controller |
//! | [`state`] | Points, selection and palette for one session |
//! | [`points`] | Ordered point store with stable marker ids |
//! | [`selection`] | Selected-cell state and index renormalization |
//! | [`input`] | Input events and the event-to-command translator |
//! | [`render`] | Diagram layer construction and highlight restyling |
//! | [`palette`] | Category letter to color mapping |
//! | [`info`] | Selection panel contents |
//! | [`surface`] | Host traits for the map and the info panel |
//! | [`sync`] | Backend trait, sync tickets and generations |
//! | [`http`] | `reqwest` implementation of [`sync::Backend`] |
//! | [`config`] | Environment-driven client configuration |
//! | [`consts`] | Marker and outline styling constants |

pub mod app;
pub mod config;
pub mod consts;
pub mod http;
pub mod info;
pub mod input;
pub mod palette;
pub mod points;
pub mod render;
pub mod selection;
pub mod state;
pub mod surface;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_helpers;
