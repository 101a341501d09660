use crate::engine::scene::registry::{LoadedModel, ModelPlacement, ModelRegistry};
use crate::engine::view::view_state::{AnimationFlags, ViewState};
use bevy::prelude::*;
use constants::animation::{
    JUMP_BASELINE, JUMP_FREQUENCY, JUMP_HEIGHT, MODEL_CONTAINER_LIFT, REST_OFFSET, ROTATION_SPEED,
};

/// Bounce phase accumulator, shared by every model.
#[derive(Resource, Default, Debug)]
pub struct AnimationClock {
    pub phase: f32,
}

/// Vertical offset of the bounce. Period is `PI / JUMP_FREQUENCY`.
pub fn bounce_offset(phase: f32) -> f32 {
    (phase * JUMP_FREQUENCY).sin().abs() * JUMP_HEIGHT - JUMP_HEIGHT / 2.0 + JUMP_BASELINE
}

/// World height of a model resting at `placement`.
pub fn resting_height(placement: &Transform) -> f32 {
    placement.translation.y + MODEL_CONTAINER_LIFT + REST_OFFSET
}

/// One frame of model animation. Paused leaves `transform` and the clock untouched.
pub fn advance_model(
    flags: AnimationFlags,
    clock: &mut AnimationClock,
    delta: f32,
    placement: &Transform,
    transform: &mut Transform,
) {
    if flags.paused {
        return;
    }

    let offset = if flags.jumping {
        clock.phase += delta;
        bounce_offset(clock.phase)
    } else {
        REST_OFFSET
    };
    transform.translation.y = placement.translation.y + MODEL_CONTAINER_LIFT + offset;

    if flags.rotating {
        transform.rotate_local_z(delta * ROTATION_SPEED);
    }
}

pub fn animate_current_model(
    time: Res<Time>,
    view_state: Res<ViewState>,
    registry: Res<ModelRegistry>,
    mut clock: ResMut<AnimationClock>,
    mut models: Query<(&ModelPlacement, &mut Transform), With<LoadedModel>>,
) {
    let Some(entity) = view_state
        .current_model
        .as_deref()
        .and_then(|id| registry.get(id))
    else {
        return;
    };
    let Ok((placement, mut transform)) = models.get_mut(entity) else {
        return;
    };

    advance_model(
        view_state.flags,
        &mut clock,
        time.delta_secs(),
        &placement.0,
        &mut transform,
    );
}
