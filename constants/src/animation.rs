/// Peak-to-trough height of the bounce.
pub const JUMP_HEIGHT: f32 = 0.5;

/// Angular frequency applied to the phase accumulator (rad/s).
pub const JUMP_FREQUENCY: f32 = 2.0;

/// Height of the group every catalog model is placed in. The bounce is
/// measured from here.
pub const MODEL_CONTAINER_LIFT: f32 = 2.0;

/// Fixed lift added to every bounce sample.
pub const JUMP_BASELINE: f32 = 2.0;

/// Offset used while jumping is off. Equal to the bounce at phase zero.
pub const REST_OFFSET: f32 = JUMP_BASELINE - JUMP_HEIGHT / 2.0;

/// Spin speed around the model's local Z axis (rad/s).
pub const ROTATION_SPEED: f32 = 1.0;

/// Star field drift around the vertical axis, applied once per frame.
pub const STAR_DRIFT_PER_FRAME: f32 = 0.0005;
