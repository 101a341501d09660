use crate::controls::viewer_events::{
    AnimationModeEvent, CommandSource, CycleBackgroundEvent, SwitchModelEvent,
};
use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::core::app_setup::ViewerSet;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::registry::ModelRegistry;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::engine::view::view_state::{AnimationAction, ViewState};
use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last flush.
    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    #[cfg(test)]
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC communication layer between the viewer and its page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(ViewerSet::Input),
            )
            .add_systems(Update, send_outgoing_messages.in_set(ViewerSet::Output));

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // The host page posts JSON strings; anything else is not for us.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
pub(crate) struct IncomingRpcMessage {
    pub(crate) content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Event writers for every command the host page can issue.
#[derive(SystemParam)]
pub(crate) struct ViewerCommandWriters<'w> {
    switch_events: EventWriter<'w, SwitchModelEvent>,
    animation_events: EventWriter<'w, AnimationModeEvent>,
    background_events: EventWriter<'w, CycleBackgroundEvent>,
}

/// Read-only viewer state answered by query methods.
#[derive(SystemParam)]
pub(crate) struct ViewerQueries<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    view_state: Res<'w, ViewState>,
    registry: Res<'w, ModelRegistry>,
    loading_progress: Res<'w, LoadingProgress>,
    catalog: Option<Res<'w, ModelCatalog>>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    queries: ViewerQueries,
    mut writers: ViewerCommandWriters,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                // Responses echoed back to this window have no method.
                debug!("Ignoring RPC message ({parse_error}): {}", event.content);
                continue;
            }
        };

        if let Some(response) = handle_rpc_request(&request, &queries, &mut writers) {
            rpc_interface.queue_response(response);
        }
    }
}

/// Handle an individual RPC message. Requests without an ID are processed
/// but never answered.
fn handle_rpc_request(
    request: &RpcRequest,
    queries: &ViewerQueries,
    writers: &mut ViewerCommandWriters,
) -> Option<RpcResponse> {
    let id = request.id.clone();

    let result = match request.method.as_str() {
        "switch_model" => handle_switch_model(&request.params, writers),
        "set_animation_mode" => handle_set_animation_mode(&request.params, writers),
        "change_background" => handle_change_background(writers),
        "get_models" => handle_get_models(queries),
        "get_view_state" => Ok(queries.view_state.to_json()),
        "get_fps" => handle_get_fps(&queries.diagnostics),
        _ => {
            // Our own notifications come back here when the page shares our window.
            let Some(id) = id else {
                debug!("Ignoring RPC notification: {}", request.method);
                return None;
            };
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = id?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Dispatch a model switch. Unknown ids are reported through `switch_failed`.
fn handle_switch_model(
    params: &serde_json::Value,
    writers: &mut ViewerCommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SwitchModelParams {
        model: String,
    }

    let switch_params = serde_json::from_value::<SwitchModelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'model' parameter"))?;

    writers.switch_events.write(SwitchModelEvent {
        model_id: switch_params.model.clone(),
        source: CommandSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "requested": switch_params.model
    }))
}

fn handle_set_animation_mode(
    params: &serde_json::Value,
    writers: &mut ViewerCommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct AnimationModeParams {
        mode: String,
    }

    let mode_params = serde_json::from_value::<AnimationModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;

    let action = AnimationAction::from_string(&mode_params.mode).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown animation mode: {}", mode_params.mode))
    })?;

    writers.animation_events.write(AnimationModeEvent {
        action,
        source: CommandSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "active": action.as_str()
    }))
}

fn handle_change_background(
    writers: &mut ViewerCommandWriters,
) -> Result<serde_json::Value, RpcError> {
    writers.background_events.write(CycleBackgroundEvent {
        source: CommandSource::Rpc,
    });

    Ok(serde_json::json!({ "success": true }))
}

/// Registered models in catalog order, plus the current one and any failures.
fn handle_get_models(queries: &ViewerQueries) -> Result<serde_json::Value, RpcError> {
    let loaded: Vec<&str> = queries
        .catalog
        .as_deref()
        .map(|catalog| {
            catalog
                .ids()
                .filter(|id| queries.registry.contains(id))
                .collect()
        })
        .unwrap_or_default();

    Ok(serde_json::json!({
        "models": loaded,
        "current": queries.view_state.current_model,
        "failed": queries.loading_progress.failed,
    }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = smoothed_fps(diagnostics).unwrap_or(0.0);

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
