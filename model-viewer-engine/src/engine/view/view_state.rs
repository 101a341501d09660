use crate::controls::viewer_events::AnimationModeEvent;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use serde::Serialize;

/// Which parts of the model animation run. `paused` overrides the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimationFlags {
    pub jumping: bool,
    pub rotating: bool,
    pub paused: bool,
}

impl Default for AnimationFlags {
    fn default() -> Self {
        Self {
            jumping: true,
            rotating: false,
            paused: false,
        }
    }
}

/// Mutually exclusive animation modes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationAction {
    Jump,
    Rotate,
    Both,
    Stop,
}

impl AnimationAction {
    #[cfg(test)]
    pub const ALL: [AnimationAction; 4] = [Self::Jump, Self::Rotate, Self::Both, Self::Stop];

    /// Convert string identifier to an action for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jump" => Some(Self::Jump),
            "rotate" => Some(Self::Rotate),
            "both" => Some(Self::Both),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Rotate => "rotate",
            Self::Both => "both",
            Self::Stop => "stop",
        }
    }

    /// Replaces the flags as a unit. Stop only sets `paused`.
    pub fn apply(self, flags: AnimationFlags) -> AnimationFlags {
        match self {
            Self::Jump => AnimationFlags {
                jumping: true,
                rotating: false,
                paused: false,
            },
            Self::Rotate => AnimationFlags {
                jumping: false,
                rotating: true,
                paused: false,
            },
            Self::Both => AnimationFlags {
                jumping: true,
                rotating: true,
                paused: false,
            },
            Self::Stop => AnimationFlags {
                paused: true,
                ..flags
            },
        }
    }
}

/// Everything the user has chosen: model, animation mode and background.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_model: Option<String>,
    pub flags: AnimationFlags,
    /// Last action taken, used for UI highlight.
    pub active_action: AnimationAction,
    pub background_index: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_model: None,
            flags: AnimationFlags::default(),
            active_action: AnimationAction::Jump,
            background_index: 0,
        }
    }
}

impl ViewState {
    pub fn set_animation(&mut self, action: AnimationAction) {
        self.flags = action.apply(self.flags);
        self.active_action = action;
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "current_model": self.current_model,
            "flags": self.flags,
            "active_action": self.active_action,
            "background_index": self.background_index,
        })
    }
}

/// Applies animation mode requests and mirrors the highlight to the host page.
pub fn handle_animation_mode_events(
    mut events: EventReader<AnimationModeEvent>,
    mut view_state: ResMut<ViewState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        view_state.set_animation(event.action);
        info!(
            "Animation mode {} via {:?}: {:?}",
            event.action.as_str(),
            event.source,
            view_state.flags
        );

        rpc_interface.send_notification(
            "animation_mode_changed",
            serde_json::json!({
                "active": event.action.as_str(),
                "flags": view_state.flags,
            }),
        );
    }
}
