use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::model_assembler::{PendingModels, request_model_loads};
use crate::engine::loading::progress::LoadingProgress;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::catalog::CATALOG_PATH;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<ModelCatalog>>,
}

// Start the loading process
pub fn start_loading(mut catalog_loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("Loading model catalog from {CATALOG_PATH}");
    catalog_loader.handle = Some(asset_server.load(CATALOG_PATH));
}

/// Picks the catalog to use. Anything missing or invalid falls back to the
/// compiled-in table.
pub fn choose_catalog(candidate: Result<ModelCatalog, String>) -> ModelCatalog {
    let catalog = match candidate {
        Ok(catalog) => catalog,
        Err(reason) => {
            warn!("Catalog unavailable ({reason}), using built-in catalog");
            return ModelCatalog::builtin();
        }
    };

    match catalog.validate() {
        Ok(()) => catalog,
        Err(err) => {
            warn!("Catalog rejected ({err}), using built-in catalog");
            ModelCatalog::builtin()
        }
    }
}

/// Waits for the catalog, then requests every model file from the asset server.
pub fn resolve_catalog_system(
    mut commands: Commands,
    catalog_loader: Res<CatalogLoader>,
    catalogs: Res<Assets<ModelCatalog>>,
    asset_server: Res<AssetServer>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = catalog_loader.handle.as_ref() else {
        return;
    };

    let candidate = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => match catalogs.get(handle) {
            Some(catalog) => Ok(catalog.clone()),
            None => return,
        },
        Some(LoadState::Failed(err)) => Err(err.to_string()),
        _ => return,
    };

    let catalog = choose_catalog(candidate);
    let pending = request_model_loads(&catalog, &asset_server);
    info!(
        "✓ Catalog resolved: {} models, plate: {}",
        catalog.models.len(),
        catalog.plate.is_some()
    );

    loading_progress.begin(pending.len());
    commands.insert_resource(PendingModels(pending));
    commands.insert_resource(catalog);

    println!("→ Transitioning to Assembling state");
    next_state.set(AppState::Assembling);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_falls_back() {
        let catalog = choose_catalog(Err("not found".to_string()));
        assert_eq!(catalog.models, ModelCatalog::builtin().models);
    }

    #[test]
    fn invalid_catalog_falls_back() {
        let mut broken = ModelCatalog::builtin();
        broken.models.truncate(2);
        broken.models[0].placement.scale = 0.0;
        let catalog = choose_catalog(Ok(broken));
        assert_eq!(catalog.models.len(), 6);
    }

    #[test]
    fn valid_catalog_is_kept() {
        let mut custom = ModelCatalog::builtin();
        custom.models.truncate(2);
        custom.plate = None;
        let catalog = choose_catalog(Ok(custom));
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["cookie", "cookie1"]);
        assert!(catalog.plate.is_none());
    }
}
