//! Asset types for the model catalog and STL geometry.
//!
//! Covers the declarative catalog read from JSON, the STL mesh loader
//! and bounding box helpers used to centre loaded meshes.

/// Bounding box computation for loaded meshes.
pub mod bounds;

/// Model catalog: ids, source paths, material parameters and placement.
///
/// Loaded from `catalog.json`, with a compiled-in fallback.
pub mod catalog;

/// Asset loader turning `.stl` files into flat-shaded triangle meshes.
pub mod stl_loader;
