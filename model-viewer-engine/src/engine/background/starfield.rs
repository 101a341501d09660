use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::animation::STAR_DRIFT_PER_FRAME;
use constants::background::{STAR_COUNT, STAR_FIELD_EXTENT};
use rand::Rng;

#[derive(Component)]
pub struct Starfield;

/// Uniformly scattered points in a cube of edge `extent` centred on the origin.
pub fn generate_star_positions<R: Rng>(rng: &mut R, count: usize, extent: f32) -> Vec<[f32; 3]> {
    let half = extent * 0.5;
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ]
        })
        .collect()
}

pub fn star_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

pub fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let positions = generate_star_positions(&mut rand::thread_rng(), STAR_COUNT, STAR_FIELD_EXTENT);
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    info!("Star field created with {} points", positions.len());

    commands
        .spawn((
            Mesh3d(meshes.add(star_mesh(positions))),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::Visible,
            Starfield,
        ))
        .id()
}

/// Fixed per-frame drift about the vertical axis, independent of frame time.
pub fn drift_starfield(mut stars: Query<(&mut Transform, &Visibility), With<Starfield>>) {
    for (mut transform, visibility) in &mut stars {
        if *visibility != Visibility::Hidden {
            transform.rotate_y(STAR_DRIFT_PER_FRAME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn stars_fill_the_cube() {
        let mut rng = StdRng::seed_from_u64(42);
        let positions = generate_star_positions(&mut rng, STAR_COUNT, STAR_FIELD_EXTENT);
        assert_eq!(positions.len(), 5000);
        assert!(
            positions
                .iter()
                .flatten()
                .all(|c| (-1000.0..=1000.0).contains(c))
        );
    }

    #[test]
    fn drift_is_per_frame_and_skips_hidden_stars() {
        let mut app = App::new();
        app.add_systems(Update, drift_starfield);
        let shown = app
            .world_mut()
            .spawn((Transform::default(), Visibility::Visible, Starfield))
            .id();
        let hidden = app
            .world_mut()
            .spawn((Transform::default(), Visibility::Hidden, Starfield))
            .id();

        for _ in 0..10 {
            app.update();
        }

        let rotation = app.world().get::<Transform>(shown).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(10.0 * STAR_DRIFT_PER_FRAME), 1e-6));
        assert_eq!(
            app.world().get::<Transform>(hidden).unwrap().rotation,
            Quat::IDENTITY
        );
    }
}
