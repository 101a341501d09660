//! Camera navigation for the model viewer.
//!
//! Provides a damped orbit camera with mouse orbit, pan and zoom, updated
//! once per frame.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
