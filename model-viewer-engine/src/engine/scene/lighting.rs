use crate::engine::background::presets::hex_color;
use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, AMBIENT_LIGHT_COLOR, BACK_LIGHT_ILLUMINANCE, BACK_LIGHT_POSITION,
    KEY_LIGHT_ILLUMINANCE, KEY_LIGHT_POSITION,
};

/// Dim ambient fill plus a key light and an opposing back light.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: hex_color(AMBIENT_LIGHT_COLOR),
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });

    for (position, illuminance) in [
        (KEY_LIGHT_POSITION, KEY_LIGHT_ILLUMINANCE),
        (BACK_LIGHT_POSITION, BACK_LIGHT_ILLUMINANCE),
    ] {
        commands.spawn((
            DirectionalLight {
                illuminance,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}
