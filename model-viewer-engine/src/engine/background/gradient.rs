use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};
use bevy::render::view::RenderLayers;
use bevy::sprite::Material2d;
use bevy::window::PrimaryWindow;
use constants::background::{GRADIENT_CAMERA_ORDER, GRADIENT_RENDER_LAYER};

const GRADIENT_SHADER_PATH: &str = "shaders/gradient.wgsl";

/// Full-screen vertical blend between two colours.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GradientMaterial {
    #[uniform(0)]
    pub bottom: LinearRgba,
    #[uniform(1)]
    pub top: LinearRgba,
}

impl GradientMaterial {
    pub fn new(bottom: Color, top: Color) -> Self {
        Self {
            bottom: bottom.to_linear(),
            top: top.to_linear(),
        }
    }
}

impl Material2d for GradientMaterial {
    fn fragment_shader() -> ShaderRef {
        GRADIENT_SHADER_PATH.into()
    }
}

/// 2D camera drawing the backdrop before the main camera.
#[derive(Component)]
pub struct GradientBackdropCamera;

/// Quad covering the window, rendered only by the backdrop camera.
#[derive(Component)]
pub struct GradientBackdrop;

/// Entities and material created the first time the gradient is shown.
#[derive(Debug, Clone)]
pub struct GradientBackdropHandles {
    pub camera: Entity,
    pub material: Handle<GradientMaterial>,
}

pub fn spawn_gradient_backdrop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<GradientMaterial>,
    bottom: Color,
    top: Color,
    size: Vec2,
) -> GradientBackdropHandles {
    let material = materials.add(GradientMaterial::new(bottom, top));
    let layer = RenderLayers::layer(GRADIENT_RENDER_LAYER);

    let camera = commands
        .spawn((
            Camera2d,
            Camera {
                order: GRADIENT_CAMERA_ORDER,
                ..default()
            },
            layer.clone(),
            GradientBackdropCamera,
        ))
        .id();

    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(1.0, 1.0))),
        MeshMaterial2d(material.clone()),
        Transform::from_scale(size.extend(1.0)),
        layer,
        GradientBackdrop,
    ));

    info!("Gradient backdrop created ({}x{})", size.x, size.y);

    GradientBackdropHandles { camera, material }
}

/// Writes new stop colours into the existing material.
pub fn update_gradient_stops(
    materials: &mut Assets<GradientMaterial>,
    handles: &GradientBackdropHandles,
    bottom: Color,
    top: Color,
) {
    if let Some(material) = materials.get_mut(&handles.material) {
        *material = GradientMaterial::new(bottom, top);
    }
}

/// Keeps the backdrop quad matched to the window size.
pub fn fit_gradient_backdrop(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut quads: Query<&mut Transform, With<GradientBackdrop>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.size().extend(1.0);
    for mut transform in &mut quads {
        if transform.scale != size {
            transform.scale = size;
        }
    }
}
