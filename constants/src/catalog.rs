use crate::scene::{PLATE_ROTATION_X, PLATE_SCALE, PLATE_TRANSLATION};
use std::f32::consts::FRAC_PI_2;

/// Runtime catalog location, relative to the asset root.
pub const CATALOG_PATH: &str = "catalog.json";

/// Models displayed without the plate underneath them.
pub const STANDALONE_MODELS: &[&str] = &["snowman", "cake"];

pub struct CatalogEntryInfo {
    pub id: &'static str,
    pub path: &'static str,
    pub color: u32,
    pub specular_color: u32,
    pub shininess: f32,
    pub offset: [f32; 3],
    /// Euler XYZ rotation in radians.
    pub rotation: [f32; 3],
    pub scale: f32,
}

/// Compiled-in catalog, used when `catalog.json` cannot be loaded.
pub const DEFAULT_CATALOG: &[CatalogEntryInfo] = &[
    CatalogEntryInfo {
        id: "cookie",
        path: "models/cookie.stl",
        color: 0xf5deb3,
        specular_color: 0x111111,
        shininess: 100.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [FRAC_PI_2, 0.0, 0.0],
        scale: 0.3,
    },
    CatalogEntryInfo {
        id: "cookie1",
        path: "models/cookie1.stl",
        color: 0xd2b48c,
        specular_color: 0x222222,
        shininess: 120.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [FRAC_PI_2, 0.0, 0.0],
        scale: 0.4,
    },
    CatalogEntryInfo {
        id: "cookie2",
        path: "models/cookie2.stl",
        color: 0xcd853f,
        specular_color: 0x151515,
        shininess: 80.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [FRAC_PI_2, 0.0, 0.0],
        scale: 0.4,
    },
    CatalogEntryInfo {
        id: "cookie3",
        path: "models/cookie3.stl",
        color: 0x8b4513,
        specular_color: 0x333333,
        shininess: 150.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [FRAC_PI_2, 0.0, 0.0],
        scale: 0.4,
    },
    CatalogEntryInfo {
        id: "snowman",
        path: "models/snowman.stl",
        color: 0xffffff,
        specular_color: 0x111111,
        shininess: 100.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [-FRAC_PI_2, 0.0, 0.0],
        scale: 1.0,
    },
    CatalogEntryInfo {
        id: "cake",
        path: "models/cake.stl",
        color: 0x8b4513,
        specular_color: 0x222222,
        shininess: 50.0,
        offset: [0.0, 0.0, 0.0],
        rotation: [-FRAC_PI_2, 0.0, 0.0],
        scale: 0.4,
    },
];

/// The plate shares the catalog format. Its placement is the default pose.
pub const DEFAULT_PLATE: CatalogEntryInfo = CatalogEntryInfo {
    id: "plate",
    path: "models/plate.stl",
    color: 0xffffff,
    specular_color: 0x111111,
    shininess: 100.0,
    offset: [PLATE_TRANSLATION.x, PLATE_TRANSLATION.y, PLATE_TRANSLATION.z],
    rotation: [PLATE_ROTATION_X, 0.0, 0.0],
    scale: PLATE_SCALE,
};

pub fn is_standalone(id: &str) -> bool {
    STANDALONE_MODELS.contains(&id)
}
