#[cfg(not(target_arch = "wasm32"))]
use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::view::view_state::AnimationAction;
use bevy::prelude::*;

/// Origin of a viewer command, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Rpc,
    Keyboard,
    Loader,
}

/// Request to display another catalog model.
#[derive(Event, Debug, Clone)]
pub struct SwitchModelEvent {
    pub model_id: String,
    pub source: CommandSource,
}

/// Request to change the animation mode.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationModeEvent {
    pub action: AnimationAction,
    pub source: CommandSource,
}

/// Request to advance to the next background preset.
#[derive(Event, Debug, Clone, Copy)]
pub struct CycleBackgroundEvent {
    pub source: CommandSource,
}

#[cfg(not(target_arch = "wasm32"))]
const MODEL_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Keyboard shortcuts (native builds only): digits pick catalog models in
/// order, J/R/B/Space pick the animation mode, G cycles the background.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_viewer_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Option<Res<ModelCatalog>>,
    mut switch_events: EventWriter<SwitchModelEvent>,
    mut animation_events: EventWriter<AnimationModeEvent>,
    mut background_events: EventWriter<CycleBackgroundEvent>,
) {
    let source = CommandSource::Keyboard;

    if let Some(catalog) = catalog {
        for (key, id) in MODEL_KEYS.iter().zip(catalog.ids()) {
            if keyboard.just_pressed(*key) {
                switch_events.write(SwitchModelEvent {
                    model_id: id.to_string(),
                    source,
                });
            }
        }
    }

    let animation_keys = [
        (KeyCode::KeyJ, AnimationAction::Jump),
        (KeyCode::KeyR, AnimationAction::Rotate),
        (KeyCode::KeyB, AnimationAction::Both),
        (KeyCode::Space, AnimationAction::Stop),
    ];
    for (key, action) in animation_keys {
        if keyboard.just_pressed(key) {
            animation_events.write(AnimationModeEvent { action, source });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        background_events.write(CycleBackgroundEvent { source });
    }
}

/// Placeholder system for WASM builds where the host page drives the viewer over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_viewer_keyboard_shortcuts() {}
