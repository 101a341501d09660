use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy::sprite::Material2dPlugin;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::scene::{CAMERA_FAR, CAMERA_FOCUS, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START};
// Crate engine modules
use crate::engine::animation::driver::{AnimationClock, animate_current_model};
use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::assets::stl_loader::StlLoader;
use crate::engine::background::controller::{
    BackgroundCache, apply_active_background, handle_cycle_background_events,
};
use crate::engine::background::gradient::{GradientMaterial, fit_gradient_backdrop};
use crate::engine::background::presets::BackgroundPresets;
use crate::engine::background::starfield::drift_starfield;
use crate::engine::camera::orbit_camera::{MainCamera, OrbitCamera, orbit_camera_controller};
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::registry::ModelRegistry;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::view::switching::handle_switch_model_events;
use crate::engine::view::view_state::{ViewState, handle_animation_mode_events};
// Loading and transitions
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{CatalogLoader, resolve_catalog_system, start_loading};
use crate::engine::loading::model_assembler::{
    ModelLoadSettled, PendingModels, poll_model_loads, spawn_settled_models,
};
use crate::engine::loading::progress::LoadingProgress;
// Controls and Web RPC
use crate::controls::viewer_events::{
    AnimationModeEvent, CycleBackgroundEvent, SwitchModelEvent, handle_viewer_keyboard_shortcuts,
};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

/// Per-frame phases, run in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    /// Keyboard and host page commands become events.
    Input,
    /// Settled model loads join the scene.
    Assemble,
    /// Switch, animation and background requests are applied.
    Commands,
    Animate,
    /// Notifications and responses leave for the host page.
    Output,
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ModelCatalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ModelCatalog>::new(&["json"]))
        .add_plugins(Material2dPlugin::<GradientMaterial>::default())
        .add_plugins(WebRpcPlugin)
        .init_asset_loader::<StlLoader>();

    app.configure_sets(
        Update,
        (
            ViewerSet::Input,
            ViewerSet::Assemble,
            ViewerSet::Commands,
            ViewerSet::Animate,
            ViewerSet::Output,
        )
            .chain(),
    );

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<CatalogLoader>()
        .init_resource::<PendingModels>()
        .init_resource::<ModelRegistry>()
        .init_resource::<ViewState>()
        .init_resource::<AnimationClock>()
        .init_resource::<BackgroundPresets>()
        .init_resource::<BackgroundCache>()
        .insert_resource(OrbitCamera::from_position(CAMERA_START, CAMERA_FOCUS))
        .add_event::<ModelLoadSettled>()
        .add_event::<SwitchModelEvent>()
        .add_event::<AnimationModeEvent>()
        .add_event::<CycleBackgroundEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            resolve_catalog_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (poll_model_loads, spawn_settled_models)
                .chain()
                .in_set(ViewerSet::Assemble)
                .run_if(in_state(AppState::Assembling)),
        )
        .add_systems(
            Update,
            transition_to_running
                .in_set(ViewerSet::Output)
                .run_if(in_state(AppState::Assembling)),
        );

    // Interactive systems run from the first frame; switching simply fails
    // until the requested model has arrived.
    app.add_systems(
        Update,
        handle_viewer_keyboard_shortcuts.in_set(ViewerSet::Input),
    )
    .add_systems(
        Update,
        (
            handle_switch_model_events,
            handle_animation_mode_events,
            handle_cycle_background_events,
            apply_active_background,
        )
            .chain()
            .in_set(ViewerSet::Commands),
    )
    .add_systems(
        Update,
        (
            animate_current_model,
            drift_starfield,
            orbit_camera_controller,
            fit_gradient_backdrop,
        )
            .in_set(ViewerSet::Animate),
    )
    .add_systems(Update, fps_notification_system.in_set(ViewerSet::Output));

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system.in_set(ViewerSet::Output));
    }

    app
}

fn spawn_main_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
        MainCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    println!("=== PLATE MODEL VIEWER ===");

    spawn_lighting(&mut commands);
    spawn_main_camera(&mut commands, &orbit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
