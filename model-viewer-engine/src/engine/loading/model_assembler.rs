use crate::controls::viewer_events::{CommandSource, SwitchModelEvent};
use crate::engine::animation::driver::resting_height;
use crate::engine::assets::bounds::ModelBounds;
use crate::engine::assets::catalog::{ModelCatalog, ModelEntry};
use crate::engine::error::{ViewerError, ViewerResult};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::plate::{Plate, apply_plate_rule};
use crate::engine::scene::registry::{LoadedModel, ModelPlacement, ModelRegistry};
use crate::engine::view::view_state::ViewState;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Catalog,
    Plate,
}

/// A model file requested from the asset server and not yet settled.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub entry: ModelEntry,
    pub role: ModelRole,
    pub handle: Handle<Mesh>,
}

#[derive(Resource, Default)]
pub struct PendingModels(pub Vec<PendingLoad>);

/// Fired once per requested file when it has loaded or failed.
#[derive(Event, Debug, Clone)]
pub struct ModelLoadSettled {
    pub load: PendingLoad,
    pub outcome: Result<(), String>,
}

pub fn request_model_loads(catalog: &ModelCatalog, asset_server: &AssetServer) -> Vec<PendingLoad> {
    let models = catalog
        .models
        .iter()
        .map(|entry| (entry, ModelRole::Catalog));
    let plate = catalog.plate.iter().map(|entry| (entry, ModelRole::Plate));

    models
        .chain(plate)
        .map(|(entry, role)| {
            info!("Requesting {} from {}", entry.id, entry.path);
            PendingLoad {
                entry: entry.clone(),
                role,
                handle: asset_server.load(entry.path.clone()),
            }
        })
        .collect()
}

/// Polls load states. Loads complete on the IO task pool in any order; this
/// system serialises their completions into `ModelLoadSettled` events.
pub fn poll_model_loads(
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingModels>,
    mut settled_events: EventWriter<ModelLoadSettled>,
) {
    let mut still_pending = Vec::with_capacity(pending.0.len());

    for load in std::mem::take(&mut pending.0) {
        let outcome = match asset_server.get_load_state(&load.handle) {
            Some(LoadState::Loaded) => Ok(()),
            Some(LoadState::Failed(err)) => Err(err.to_string()),
            _ => {
                still_pending.push(load);
                continue;
            }
        };
        settled_events.write(ModelLoadSettled { load, outcome });
    }

    pending.0 = still_pending;
}

/// Moves the bounding box centre of `mesh` to its local origin.
pub fn center_mesh(mesh: &mut Mesh) -> Option<ModelBounds> {
    let bounds = ModelBounds::from_mesh(mesh)?;
    mesh.translate_by(-bounds.center());
    Some(bounds)
}

fn prepare_model(
    load: &PendingLoad,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> ViewerResult<Handle<StandardMaterial>> {
    let id = &load.entry.id;
    let mesh = meshes
        .get_mut(&load.handle)
        .ok_or_else(|| ViewerError::MissingPositions(id.clone()))?;
    let bounds = center_mesh(mesh).ok_or_else(|| ViewerError::MissingPositions(id.clone()))?;
    debug!("{id}: bounds {:?}, centred on {:?}", bounds.size(), bounds.center());

    let material = load.entry.material.to_standard_material(id)?;
    Ok(materials.add(material))
}

/// Centres, places and registers every settled model, hidden. The first
/// catalog model to arrive is switched to.
#[allow(clippy::too_many_arguments)]
pub fn spawn_settled_models(
    mut commands: Commands,
    mut settled_events: EventReader<ModelLoadSettled>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<ModelRegistry>,
    view_state: Res<ViewState>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut switch_events: EventWriter<SwitchModelEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for settled in settled_events.read() {
        let load = &settled.load;
        let id = load.entry.id.as_str();

        let prepared = settled
            .outcome
            .clone()
            .map_err(|reason| ViewerError::LoadFailure {
                id: id.to_string(),
                path: load.entry.path.clone(),
                reason,
            })
            .and_then(|()| prepare_model(load, &mut meshes, &mut materials));

        let material = match prepared {
            Ok(material) => material,
            Err(err) => {
                error!("{err}");
                loading_progress.mark_failed(id);
                rpc_interface.send_notification(
                    "model_load_failed",
                    serde_json::json!({
                        "model": id,
                        "reason": err.to_string(),
                    }),
                );
                continue;
            }
        };

        let placement = load.entry.placement.transform();

        match load.role {
            ModelRole::Catalog => {
                let mut transform = placement;
                transform.translation.y = resting_height(&placement);

                let entity = commands
                    .spawn((
                        Mesh3d(load.handle.clone()),
                        MeshMaterial3d(material),
                        transform,
                        Visibility::Hidden,
                        LoadedModel { id: id.to_string() },
                        ModelPlacement(placement),
                    ))
                    .id();
                registry.register(id, entity);

                if registry.claim_initial() {
                    switch_events.write(SwitchModelEvent {
                        model_id: id.to_string(),
                        source: CommandSource::Loader,
                    });
                }
            }
            ModelRole::Plate => {
                let plate = Plate {
                    default_pose: placement,
                };
                let mut transform = placement;
                let mut visibility = Visibility::Hidden;
                apply_plate_rule(
                    &plate,
                    view_state.current_model.as_deref(),
                    &mut transform,
                    &mut visibility,
                );

                let entity = commands
                    .spawn((
                        Mesh3d(load.handle.clone()),
                        MeshMaterial3d(material),
                        transform,
                        visibility,
                        plate,
                    ))
                    .id();
                registry.set_plate(entity);
            }
        }

        loading_progress.mark_loaded(id);
        info!(
            "✓ Loaded {id} ({}/{})",
            loading_progress.settled(),
            loading_progress.total
        );

        if load.role == ModelRole::Catalog {
            rpc_interface.send_notification(
                "model_loaded",
                serde_json::json!({
                    "model": id,
                    "settled": loading_progress.settled(),
                    "total": loading_progress.total,
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};

    fn triangle(offset: Vec3) -> Mesh {
        let positions: Vec<[f32; 3]> = [Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 4.0]
            .iter()
            .map(|p| (*p + offset).to_array())
            .collect();
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<ModelLoadSettled>()
            .add_event::<SwitchModelEvent>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ModelRegistry>()
            .init_resource::<ViewState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, spawn_settled_models);
        app.world_mut().resource_mut::<LoadingProgress>().begin(3);
        app
    }

    fn settle(app: &mut App, id: &str, role: ModelRole, outcome: Result<(), String>) -> Handle<Mesh> {
        let catalog = ModelCatalog::builtin();
        let entry = match role {
            ModelRole::Catalog => catalog.entry(id).cloned(),
            ModelRole::Plate => catalog.plate.clone(),
        }
        .unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(triangle(Vec3::new(5.0, 5.0, 5.0)));
        app.world_mut().send_event(ModelLoadSettled {
            load: PendingLoad {
                entry,
                role,
                handle: handle.clone(),
            },
            outcome,
        });
        handle
    }

    #[test]
    fn centring_moves_bounds_to_origin() {
        let mut mesh = triangle(Vec3::new(10.0, -3.0, 7.0));
        let before = center_mesh(&mut mesh).unwrap();
        assert_eq!(before.center(), Vec3::new(11.0, -1.0, 7.0));

        let after = ModelBounds::from_mesh(&mesh).unwrap();
        assert!(after.center().length() < 1e-5);
        assert_eq!(after.size(), before.size());
    }

    #[test]
    fn first_loaded_model_is_claimed_once() {
        let mut app = test_app();
        settle(&mut app, "cookie2", ModelRole::Catalog, Ok(()));
        settle(&mut app, "cookie", ModelRole::Catalog, Ok(()));
        app.update();

        let switches = app.world().resource::<Events<SwitchModelEvent>>();
        let requested: Vec<_> = switches
            .iter_current_update_events()
            .map(|e| e.model_id.clone())
            .collect();
        assert_eq!(requested, vec!["cookie2".to_string()]);

        let registry = app.world().resource::<ModelRegistry>();
        assert!(registry.contains("cookie") && registry.contains("cookie2"));
    }

    #[test]
    fn loaded_models_start_hidden_and_centred() {
        let mut app = test_app();
        let handle = settle(&mut app, "cookie1", ModelRole::Catalog, Ok(()));
        app.update();

        let entity = app.world().resource::<ModelRegistry>().get("cookie1").unwrap();
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Hidden)
        );
        let placement = app.world().get::<ModelPlacement>(entity).unwrap().0;
        assert_eq!(placement.scale, Vec3::splat(0.4));
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!((transform.translation.y - 3.75).abs() < 1e-6);

        let meshes = app.world().resource::<Assets<Mesh>>();
        let Some(VertexAttributeValues::Float32x3(positions)) = meshes
            .get(&handle)
            .unwrap()
            .attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("mesh lost its positions");
        };
        let bounds = ModelBounds::from_positions(positions).unwrap();
        assert!(bounds.center().length() < 1e-5);
    }

    #[test]
    fn failed_load_is_skipped() {
        let mut app = test_app();
        settle(
            &mut app,
            "cake",
            ModelRole::Catalog,
            Err("file not found".to_string()),
        );
        app.update();

        assert!(!app.world().resource::<ModelRegistry>().contains("cake"));
        let progress = app.world().resource::<LoadingProgress>();
        assert_eq!(progress.failed, vec!["cake".to_string()]);
        let notified = app
            .world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .any(|n| n.method == "model_load_failed");
        assert!(notified);
        assert!(
            app.world()
                .resource::<Events<SwitchModelEvent>>()
                .is_empty()
        );
    }

    #[test]
    fn late_plate_respects_standalone_model() {
        let mut app = test_app();
        app.world_mut().resource_mut::<ViewState>().current_model = Some("snowman".to_string());
        settle(&mut app, "plate", ModelRole::Plate, Ok(()));
        app.update();

        let plate = app.world().resource::<ModelRegistry>().plate().unwrap();
        assert_eq!(
            app.world().get::<Visibility>(plate),
            Some(&Visibility::Hidden)
        );
        let pose = app.world().get::<Plate>(plate).unwrap().default_pose;
        assert_eq!(pose.translation, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(pose.scale, Vec3::splat(0.5));
    }
}
