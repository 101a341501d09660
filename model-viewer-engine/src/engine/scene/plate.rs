use bevy::prelude::*;
use constants::catalog::is_standalone;

/// The serving plate. Shown under every model except the standalone ones.
#[derive(Component, Debug, Clone, Copy)]
pub struct Plate {
    pub default_pose: Transform,
}

pub fn plate_visible_for(current_model: Option<&str>) -> bool {
    current_model.is_none_or(|id| !is_standalone(id))
}

/// Shows or hides the plate for `current_model`. A shown plate always
/// returns to its default pose.
pub fn apply_plate_rule(
    plate: &Plate,
    current_model: Option<&str>,
    transform: &mut Transform,
    visibility: &mut Visibility,
) {
    if plate_visible_for(current_model) {
        *transform = plate.default_pose;
        *visibility = Visibility::Visible;
    } else {
        *visibility = Visibility::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_models_hide_the_plate() {
        assert!(!plate_visible_for(Some("snowman")));
        assert!(!plate_visible_for(Some("cake")));
        assert!(plate_visible_for(Some("cookie2")));
        assert!(plate_visible_for(None));
    }

    #[test]
    fn shown_plate_returns_to_default_pose() {
        let plate = Plate {
            default_pose: Transform::from_xyz(0.0, 1.5, 0.0),
        };
        let mut transform = Transform::from_xyz(4.0, 4.0, 4.0);
        let mut visibility = Visibility::Hidden;

        apply_plate_rule(&plate, Some("snowman"), &mut transform, &mut visibility);
        assert_eq!(visibility, Visibility::Hidden);
        assert_eq!(transform.translation, Vec3::splat(4.0));

        apply_plate_rule(&plate, Some("cookie"), &mut transform, &mut visibility);
        assert_eq!(visibility, Visibility::Visible);
        assert_eq!(transform, plate.default_pose);
    }
}
