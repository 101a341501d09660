use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SENSITIVITY,
    ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SENSITIVITY, ORBIT_ZOOM_SENSITIVITY,
};

/// The perspective camera the scene is viewed through.
#[derive(Component)]
pub struct MainCamera;

/// Orbit camera around a focus point with damped inertia.
///
/// Input accumulates into pending deltas; each `update` applies a
/// `damping` fraction of them and keeps the rest for later frames.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(ORBIT_MIN_DISTANCE);
        Self {
            focus,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            damping: ORBIT_DAMPING_FACTOR,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.focus
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.focus, Vec3::Y)
    }

    /// Drag in screen pixels. Dragging right swings the camera left.
    pub fn rotate(&mut self, drag: Vec2) {
        self.pending_yaw -= drag.x * ORBIT_ROTATE_SENSITIVITY;
        self.pending_pitch += drag.y * ORBIT_ROTATE_SENSITIVITY;
    }

    /// Moves the focus in the view plane, proportional to the orbit distance.
    pub fn pan(&mut self, drag: Vec2) {
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let scale = self.distance * ORBIT_PAN_SENSITIVITY;
        self.pending_pan += (-right * drag.x + up * drag.y) * scale;
    }

    /// Positive `amount` moves closer.
    pub fn zoom(&mut self, amount: f32) {
        let factor = (1.0 - amount * ORBIT_ZOOM_SENSITIVITY).max(0.1);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Applies one frame of damped motion.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.focus += self.pending_pan * self.damping;

        let keep = 1.0 - self.damping;
        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_pan *= keep;
    }
}

/// Left drag orbits, right drag pans, the wheel zooms.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(mouse_delta);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    orbit.update();

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::scene::{CAMERA_FOCUS, CAMERA_START};

    #[test]
    fn starting_position_round_trips() {
        let orbit = OrbitCamera::from_position(CAMERA_START, CAMERA_FOCUS);
        assert!((orbit.position() - CAMERA_START).length() < 1e-4);
        assert!((orbit.distance - CAMERA_START.length()).abs() < 1e-4);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO);
        let start_yaw = orbit.yaw;
        orbit.rotate(Vec2::new(-100.0, 0.0));
        let target = start_yaw + 100.0 * ORBIT_ROTATE_SENSITIVITY;

        orbit.update();
        let first_step = orbit.yaw - start_yaw;
        assert!((first_step - 100.0 * ORBIT_ROTATE_SENSITIVITY * ORBIT_DAMPING_FACTOR).abs() < 1e-6);

        for _ in 0..500 {
            orbit.update();
        }
        assert!((orbit.yaw - target).abs() < 1e-4);
    }

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut orbit = OrbitCamera::from_position(CAMERA_START, CAMERA_FOCUS);
        orbit.rotate(Vec2::new(0.0, 1.0e6));
        for _ in 0..100 {
            orbit.update();
        }
        assert!(orbit.pitch <= ORBIT_PITCH_LIMIT);

        for _ in 0..200 {
            orbit.zoom(5.0);
        }
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
    }
}
