//! User-facing viewer controls.
//!
//! Every UI trigger becomes one of three events, whichever surface it came
//! from:
//!
//! ```text
//! Host page (RPC) / keyboard (native)
//!   ├─> SwitchModelEvent      ──> view::switching
//!   ├─> AnimationModeEvent    ──> view::view_state
//!   └─> CycleBackgroundEvent  ──> background::controller
//! ```
//!
//! On WASM builds the keyboard system is a no-op and the host page is the
//! only source.

/// Viewer command events and native keyboard shortcuts.
pub mod viewer_events;
