//! Asset loading and scene assembly for the model viewer.
//!
//! Resolves the model catalog, requests every model file concurrently and
//! assembles each one into the scene as it arrives, in whatever order the
//! loads complete.

/// Catalog loading with fallback to the compiled-in table.
///
/// Requests every model file once the catalog is resolved.
pub mod catalog_loader;

/// Per-model scene assembly: centring, placement and registration.
pub mod model_assembler;

/// Loading progress tracking resource for state transitions.
pub mod progress;
