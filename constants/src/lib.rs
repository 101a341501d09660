//! Shared tuning values for the plate model viewer.

pub mod animation;
pub mod background;
pub mod catalog;
pub mod render_settings;
pub mod scene;
