use bevy::math::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Default plate pose, restored whenever the plate is shown again.
pub const PLATE_TRANSLATION: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const PLATE_ROTATION_X: f32 = -FRAC_PI_2;
pub const PLATE_SCALE: f32 = 0.5;

/// Camera starts here, looking at `CAMERA_FOCUS`.
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 3.0, 8.0);
pub const CAMERA_FOCUS: Vec3 = Vec3::ZERO;
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
