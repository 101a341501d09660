//! JSON-RPC 2.0 communication layer for the hosting web page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page's
//! controls via `postMessage`, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (buttons, select)  <──postMessage──>  Bevy (canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Dispatch viewer event
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        ├─ Notification (no ID) ───────────────> │ (processed, no reply)
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Methods
//!
//! - `switch_model { model }`: Show a catalog model
//! - `set_animation_mode { mode }`: `jump`, `rotate`, `both` or `stop`
//! - `change_background`: Advance to the next background preset
//! - `get_models`: Loaded ids in catalog order, current id, failed ids
//! - `get_view_state`: Current model, animation flags, highlight, background index
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! `model_loaded`, `model_load_failed`, `model_switched`, `switch_failed`,
//! `animation_mode_changed`, `background_changed`, `viewer_ready`, `fps_update`.

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
