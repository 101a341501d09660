use bevy::math::Vec3;

pub const AMBIENT_LIGHT_COLOR: u32 = 0x404040;
pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 400.0;

/// Key light shining from `KEY_LIGHT_POSITION` towards the origin.
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 1.0);
pub const KEY_LIGHT_ILLUMINANCE: f32 = 8_000.0;

pub const BACK_LIGHT_POSITION: Vec3 = Vec3::new(-1.0, -1.0, -1.0);
pub const BACK_LIGHT_ILLUMINANCE: f32 = 5_000.0;

/// Fraction of the pending orbit motion applied (and removed) per frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_PAN_SENSITIVITY: f32 = 0.002;
pub const ORBIT_ZOOM_SENSITIVITY: f32 = 0.1;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 200.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Interval between fps notifications to the host page (seconds).
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;
