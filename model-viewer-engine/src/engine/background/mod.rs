//! Background presets and their render paths.
//!
//! The controller cycles an ordered preset list. Flat colours only change the
//! clear colour. The gradient and the star field are built on first use and
//! reused afterwards:
//!
//! ```text
//! Color     ─> ClearColor, main camera clears
//! Gradient  ─> backdrop Camera2d (order -1) draws quad, main camera keeps it
//! Starfield ─> black clear, 5000 points drifting about Y
//! ```

/// Cycle handling and activation of the current preset.
pub mod controller;

/// Gradient material, backdrop camera and full-screen quad.
pub mod gradient;

/// Preset list built from the constants crate.
pub mod presets;

/// Star field generation and drift.
pub mod starfield;
