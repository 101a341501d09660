use bevy::prelude::*;
use std::collections::HashMap;

/// Marks a catalog model entity. Exactly one is visible once any has loaded.
#[derive(Component, Debug, Clone)]
pub struct LoadedModel {
    pub id: String,
}

/// Placement transform computed at load time. The animation adds its
/// vertical offset on top of `translation.y`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ModelPlacement(pub Transform);

/// Name-indexed lookup of every successfully loaded model.
#[derive(Resource, Default, Debug)]
pub struct ModelRegistry {
    models: HashMap<String, Entity>,
    plate: Option<Entity>,
    initial_claimed: bool,
}

impl ModelRegistry {
    pub fn register(&mut self, id: &str, entity: Entity) {
        self.models.insert(id.to_string(), entity);
    }

    pub fn get(&self, id: &str) -> Option<Entity> {
        self.models.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn set_plate(&mut self, entity: Entity) {
        self.plate = Some(entity);
    }

    pub fn plate(&self) -> Option<Entity> {
        self.plate
    }

    /// Compare-and-set on "a model has been chosen for display".
    /// Returns `true` for the first caller only.
    pub fn claim_initial(&mut self) -> bool {
        if self.initial_claimed {
            return false;
        }
        self.initial_claimed = true;
        true
    }
}
