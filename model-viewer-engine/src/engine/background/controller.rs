use crate::controls::viewer_events::CycleBackgroundEvent;
use crate::engine::background::gradient::{
    GradientBackdropCamera, GradientBackdropHandles, GradientMaterial, spawn_gradient_backdrop,
    update_gradient_stops,
};
use crate::engine::background::presets::{BackgroundPreset, BackgroundPresets, hex_color};
use crate::engine::background::starfield::{Starfield, spawn_starfield};
use crate::engine::camera::orbit_camera::MainCamera;
use crate::engine::view::view_state::ViewState;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::PrimaryWindow;
use constants::background::STARFIELD_CLEAR_COLOR;

const FALLBACK_BACKDROP_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

/// Render objects built on first use and reused for the rest of the session.
#[derive(Resource, Default)]
pub struct BackgroundCache {
    gradient: Option<GradientBackdropHandles>,
    starfield: Option<Entity>,
    applied: Option<usize>,
}

#[cfg(test)]
impl BackgroundCache {
    pub fn gradient(&self) -> Option<&GradientBackdropHandles> {
        self.gradient.as_ref()
    }

    pub fn starfield(&self) -> Option<Entity> {
        self.starfield
    }
}

/// Advances the background index with wraparound.
pub fn handle_cycle_background_events(
    mut events: EventReader<CycleBackgroundEvent>,
    presets: Res<BackgroundPresets>,
    mut view_state: ResMut<ViewState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let index = presets.next_index(view_state.background_index);
        view_state.background_index = index;

        let kind = presets.get(index).map_or("none", BackgroundPreset::kind);
        info!("Background {index} ({kind}) via {:?}", event.source);

        rpc_interface.send_notification(
            "background_changed",
            serde_json::json!({
                "index": index,
                "kind": kind,
            }),
        );
    }
}

/// Activates the render path of the current preset whenever the index changes.
#[allow(clippy::too_many_arguments)]
pub fn apply_active_background(
    mut commands: Commands,
    view_state: Res<ViewState>,
    presets: Res<BackgroundPresets>,
    mut cache: ResMut<BackgroundCache>,
    mut clear_color: ResMut<ClearColor>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut gradient_materials: ResMut<Assets<GradientMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut main_cameras: Query<&mut Camera, (With<MainCamera>, Without<GradientBackdropCamera>)>,
    mut backdrop_cameras: Query<&mut Camera, (With<GradientBackdropCamera>, Without<MainCamera>)>,
    mut stars: Query<&mut Visibility, With<Starfield>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let index = view_state.background_index;
    let cache = &mut *cache;
    if cache.applied == Some(index) {
        return;
    }
    let Some(preset) = presets.get(index).copied() else {
        warn!("Background index {index} has no preset");
        return;
    };

    match preset {
        BackgroundPreset::Color(color) => clear_color.0 = color,
        BackgroundPreset::Gradient { bottom, top } => match &cache.gradient {
            Some(handles) => update_gradient_stops(&mut gradient_materials, handles, bottom, top),
            None => {
                let size = windows
                    .single()
                    .map(|window| window.size())
                    .unwrap_or(FALLBACK_BACKDROP_SIZE);
                cache.gradient = Some(spawn_gradient_backdrop(
                    &mut commands,
                    &mut meshes,
                    &mut gradient_materials,
                    bottom,
                    top,
                    size,
                ));
            }
        },
        BackgroundPreset::Starfield => {
            clear_color.0 = hex_color(STARFIELD_CLEAR_COLOR);
            if cache.starfield.is_none() {
                cache.starfield = Some(spawn_starfield(
                    &mut commands,
                    &mut meshes,
                    &mut standard_materials,
                ));
            }
        }
    }

    let gradient_active = matches!(preset, BackgroundPreset::Gradient { .. });
    let starfield_active = matches!(preset, BackgroundPreset::Starfield);

    // The backdrop camera clears and draws first; the main camera must keep its output.
    for mut camera in &mut main_cameras {
        camera.clear_color = if gradient_active {
            ClearColorConfig::None
        } else {
            ClearColorConfig::Default
        };
    }
    if let Some(Ok(mut camera)) = cache
        .gradient
        .as_ref()
        .map(|handles| backdrop_cameras.get_mut(handles.camera))
    {
        camera.is_active = gradient_active;
    }
    for mut visibility in &mut stars {
        *visibility = if starfield_active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    cache.applied = Some(index);
}
