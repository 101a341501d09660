use crate::controls::viewer_events::SwitchModelEvent;
use crate::engine::error::{ViewerError, ViewerResult};
use crate::engine::scene::plate::{Plate, apply_plate_rule, plate_visible_for};
use crate::engine::scene::registry::{LoadedModel, ModelRegistry};
use crate::engine::view::view_state::ViewState;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy::window::RequestRedraw;

/// Makes `id` the current model. Returns the previous one.
/// Unregistered ids leave the state untouched.
pub fn switch_model(
    id: &str,
    registry: &ModelRegistry,
    view_state: &mut ViewState,
) -> ViewerResult<Option<String>> {
    if !registry.contains(id) {
        return Err(ViewerError::UnknownModel(id.to_string()));
    }
    Ok(view_state.current_model.replace(id.to_string()))
}

/// Shows the requested model, hides every other one and re-applies the plate rule.
pub fn handle_switch_model_events(
    mut events: EventReader<SwitchModelEvent>,
    registry: Res<ModelRegistry>,
    mut view_state: ResMut<ViewState>,
    mut models: Query<(&LoadedModel, &mut Visibility), Without<Plate>>,
    mut plates: Query<(&Plate, &mut Transform, &mut Visibility), Without<LoadedModel>>,
    mut redraw: EventWriter<RequestRedraw>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let previous = match switch_model(&event.model_id, &registry, &mut view_state) {
            Ok(previous) => previous,
            Err(err) => {
                error!("{err}");
                rpc_interface.send_notification(
                    "switch_failed",
                    serde_json::json!({
                        "model": event.model_id,
                        "reason": err.to_string(),
                    }),
                );
                continue;
            }
        };

        for (model, mut visibility) in &mut models {
            *visibility = if model.id == event.model_id {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }

        let current = view_state.current_model.as_deref();
        if let Some(Ok((plate, mut transform, mut visibility))) =
            registry.plate().map(|entity| plates.get_mut(entity))
        {
            apply_plate_rule(plate, current, &mut transform, &mut visibility);
        }

        info!(
            "Switched model {:?} -> {} via {:?}",
            previous, event.model_id, event.source
        );

        rpc_interface.send_notification(
            "model_switched",
            serde_json::json!({
                "model": event.model_id,
                "previous": previous,
                "plate_visible": plate_visible_for(current),
            }),
        );

        // Render the change even if nothing else is animating.
        redraw.write(RequestRedraw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::viewer_events::CommandSource;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<SwitchModelEvent>()
            .add_event::<RequestRedraw>()
            .init_resource::<ViewState>()
            .init_resource::<ModelRegistry>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, handle_switch_model_events);
        app
    }

    fn spawn_model(app: &mut App, id: &str) -> Entity {
        let entity = app
            .world_mut()
            .spawn((
                LoadedModel { id: id.to_string() },
                Transform::default(),
                Visibility::Hidden,
            ))
            .id();
        app.world_mut()
            .resource_mut::<ModelRegistry>()
            .register(id, entity);
        entity
    }

    fn spawn_plate(app: &mut App) -> (Entity, Plate) {
        let plate = Plate {
            default_pose: Transform::from_xyz(0.0, 1.5, 0.0)
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                .with_scale(Vec3::splat(0.5)),
        };
        let entity = app
            .world_mut()
            .spawn((plate, plate.default_pose, Visibility::Visible))
            .id();
        app.world_mut()
            .resource_mut::<ModelRegistry>()
            .set_plate(entity);
        (entity, plate)
    }

    fn switch(app: &mut App, id: &str) {
        app.world_mut().send_event(SwitchModelEvent {
            model_id: id.to_string(),
            source: CommandSource::Rpc,
        });
        app.update();
    }

    fn visible_models(app: &mut App) -> Vec<String> {
        let mut query = app.world_mut().query::<(&LoadedModel, &Visibility)>();
        query
            .iter(app.world())
            .filter(|(_, visibility)| **visibility == Visibility::Visible)
            .map(|(model, _)| model.id.clone())
            .collect()
    }

    #[test]
    fn exactly_one_model_visible_after_switches() {
        let mut app = test_app();
        for id in ["cookie", "cookie1", "snowman", "cake"] {
            spawn_model(&mut app, id);
        }

        for id in ["cookie1", "snowman", "cookie", "cookie", "cake"] {
            switch(&mut app, id);
            assert_eq!(visible_models(&mut app), vec![id.to_string()]);
            assert_eq!(
                app.world().resource::<ViewState>().current_model.as_deref(),
                Some(id)
            );
        }
    }

    #[test]
    fn unknown_model_changes_nothing() {
        let mut app = test_app();
        spawn_model(&mut app, "cookie");
        spawn_model(&mut app, "cake");
        let (plate, _) = spawn_plate(&mut app);
        switch(&mut app, "cookie");

        let state_before = app.world().resource::<ViewState>().clone();
        switch(&mut app, "teapot");

        assert_eq!(*app.world().resource::<ViewState>(), state_before);
        assert_eq!(visible_models(&mut app), vec!["cookie".to_string()]);
        assert_eq!(
            app.world().get::<Visibility>(plate),
            Some(&Visibility::Visible)
        );

        let failures = app
            .world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .filter(|n| n.method == "switch_failed")
            .count();
        assert_eq!(failures, 1);
    }

    #[test]
    fn plate_follows_standalone_rule() {
        let mut app = test_app();
        for id in ["cookie", "snowman", "cake"] {
            spawn_model(&mut app, id);
        }
        let (plate_entity, plate) = spawn_plate(&mut app);

        switch(&mut app, "snowman");
        assert_eq!(
            app.world().get::<Visibility>(plate_entity),
            Some(&Visibility::Hidden)
        );

        // Disturb the hidden plate; showing it again must restore the pose.
        app.world_mut()
            .get_mut::<Transform>(plate_entity)
            .unwrap()
            .translation = Vec3::new(3.0, -2.0, 1.0);

        switch(&mut app, "cake");
        assert_eq!(
            app.world().get::<Visibility>(plate_entity),
            Some(&Visibility::Hidden)
        );

        switch(&mut app, "cookie");
        assert_eq!(
            app.world().get::<Visibility>(plate_entity),
            Some(&Visibility::Visible)
        );
        assert_eq!(
            app.world().get::<Transform>(plate_entity),
            Some(&plate.default_pose)
        );
    }

    #[test]
    fn each_successful_switch_requests_one_redraw() {
        let mut app = test_app();
        spawn_model(&mut app, "cookie");
        spawn_model(&mut app, "cake");

        let redraws = |app: &App| {
            app.world()
                .resource::<Events<RequestRedraw>>()
                .iter_current_update_events()
                .count()
        };

        switch(&mut app, "cookie");
        assert_eq!(redraws(&app), 1);

        switch(&mut app, "cookie");
        assert_eq!(redraws(&app), 1);

        switch(&mut app, "teapot");
        assert_eq!(redraws(&app), 0);

        switch(&mut app, "cake");
        assert_eq!(redraws(&app), 1);
    }

    #[test]
    fn unregistered_plate_is_left_alone() {
        let mut app = test_app();
        spawn_model(&mut app, "snowman");
        let pose = Transform::from_xyz(0.0, 1.5, 0.0);
        let stray = app
            .world_mut()
            .spawn((Plate { default_pose: pose }, pose, Visibility::Visible))
            .id();

        switch(&mut app, "snowman");
        assert_eq!(
            app.world().get::<Visibility>(stray),
            Some(&Visibility::Visible)
        );
    }

    #[test]
    fn switch_model_reports_previous() {
        let mut registry = ModelRegistry::default();
        registry.register("cookie", Entity::from_raw(1));
        registry.register("cake", Entity::from_raw(2));
        let mut state = ViewState::default();

        assert_eq!(switch_model("cookie", &registry, &mut state), Ok(None));
        assert_eq!(
            switch_model("cake", &registry, &mut state),
            Ok(Some("cookie".to_string()))
        );
        assert_eq!(
            switch_model("pie", &registry, &mut state),
            Err(ViewerError::UnknownModel("pie".to_string()))
        );
        assert_eq!(state.current_model.as_deref(), Some("cake"));
    }
}
