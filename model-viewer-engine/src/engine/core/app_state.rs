use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::registry::ModelRegistry;
use crate::engine::view::view_state::ViewState;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the catalog.
    #[default]
    Loading,
    /// Model files are arriving; the viewer is already interactive.
    Assembling,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Final transition once every model file has loaded or failed
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    registry: Res<ModelRegistry>,
    view_state: Res<ViewState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.is_complete() {
        return;
    }

    if registry.is_empty() {
        warn!("No models could be loaded, the viewer will stay empty");
    }

    rpc_interface.send_notification(
        "viewer_ready",
        serde_json::json!({
            "loaded": loading_progress.loaded,
            "failed": loading_progress.failed,
            "current_model": view_state.current_model,
        }),
    );

    println!("→ All models settled, transitioning to Running state");
    next_state.set(AppState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<ModelRegistry>()
            .init_resource::<ViewState>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, transition_to_running);
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn waits_for_every_model_to_settle() {
        let mut app = test_app();
        app.world_mut().resource_mut::<LoadingProgress>().begin(2);
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .mark_loaded("cookie");
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);

        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .mark_failed("cake");
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Running);

        let ready = app
            .world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .any(|n| n.method == "viewer_ready");
        assert!(ready);
    }
}
