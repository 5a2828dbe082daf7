//! Panels around the calculator display.
//!
//! - `header` - title bar with the theme toggle and settings button
//! - `sidebar` - search box and the category/calculator navigation
//! - `status_bar` - mounted calculator and status messages
//! - `modal` - theme variant picker overlay
//!
//! The display itself is drawn by [`crate::render`].

pub mod header;
pub mod modal;
pub mod sidebar;
pub mod status_bar;
