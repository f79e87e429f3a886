//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own storage and diagram generation so route handlers stay
//! focused on request/response translation.

pub mod diagram;
pub mod points;
