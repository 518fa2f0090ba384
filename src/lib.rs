//! Render a pre-built disk usage index as aligned terminal listings.
//!
//! The crate splits into the index interface ([`index`]), the renderer
//! ([`render`]), and small ambient helpers for units, terminal detection,
//! and application directories. The binary layers CLI parsing and settings
//! resolution on top.

pub mod app_dirs;
pub mod index;
pub mod render;
pub mod terminal;
pub mod units;
