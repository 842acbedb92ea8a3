//! Reusable render pieces for the panel
//!
//! - [`colors`] - named color constructors shared across the draw code
//! - [`HealthBar`] - two-segment health/shield bar with centered label

pub mod colors;
mod health_bar;

pub use health_bar::HealthBar;
