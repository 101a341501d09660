//! Viewer state and the operations that mutate it.
//!
//! `ViewState` holds the current model, the animation flags, the highlighted
//! action and the background index. Only the event handlers in this module
//! and the background controller write to it.

/// Model switching with visibility and plate updates.
pub mod switching;

/// View state resource and animation mode selection.
pub mod view_state;
