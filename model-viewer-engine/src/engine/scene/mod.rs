//! Scene contents: loaded models, the plate and the lights.

/// Ambient, key and back lights.
pub mod lighting;

/// Plate component and the standalone-model visibility rule.
pub mod plate;

/// Name-indexed registry of loaded models.
pub mod registry;
