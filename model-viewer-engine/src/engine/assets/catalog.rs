use crate::engine::error::{ViewerError, ViewerResult};
use bevy::prelude::*;
use constants::catalog::{CatalogEntryInfo, DEFAULT_CATALOG, DEFAULT_PLATE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lower bound used by the PBR shader for perceptual roughness.
const MIN_ROUGHNESS: f32 = 0.089;

/// Surface description in the classic colour/specular/shininess form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialParams {
    /// Hex string, `#rrggbb`.
    pub color: String,
    pub specular_color: String,
    pub shininess: f32,
}

/// Offset, Euler XYZ rotation (radians) and uniform scale applied after centring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
        }
    }
}

impl Placement {
    /// Transform for a mesh whose bounding box centre already sits at the origin.
    pub fn transform(&self) -> Transform {
        let [x, y, z] = self.rotation;
        Transform {
            translation: Vec3::from_array(self.offset),
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            scale: Vec3::splat(self.scale),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEntry {
    pub id: String,
    pub path: String,
    pub material: MaterialParams,
    #[serde(default)]
    pub placement: Placement,
}

/// Declarative model table, read from `catalog.json`.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub plate: Option<ModelEntry>,
}

impl ModelCatalog {
    /// Compiled-in catalog from the constants crate.
    pub fn builtin() -> Self {
        Self {
            models: DEFAULT_CATALOG.iter().map(ModelEntry::from_info).collect(),
            plate: Some(ModelEntry::from_info(&DEFAULT_PLATE)),
        }
    }

    #[cfg(test)]
    pub fn entry(&self, id: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|entry| entry.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|entry| entry.id.as_str())
    }

    pub fn validate(&self) -> ViewerResult<()> {
        let mut seen = HashSet::new();
        for entry in self.models.iter().chain(self.plate.iter()) {
            if !seen.insert(entry.id.as_str()) {
                return Err(ViewerError::DuplicateModel(entry.id.clone()));
            }
            if entry.placement.scale <= 0.0 {
                return Err(ViewerError::InvalidScale {
                    id: entry.id.clone(),
                    scale: entry.placement.scale,
                });
            }
            entry.material.to_standard_material(&entry.id)?;
        }
        Ok(())
    }
}

impl ModelEntry {
    fn from_info(info: &CatalogEntryInfo) -> Self {
        Self {
            id: info.id.to_string(),
            path: info.path.to_string(),
            material: MaterialParams {
                color: format!("#{:06x}", info.color),
                specular_color: format!("#{:06x}", info.specular_color),
                shininess: info.shininess,
            },
            placement: Placement {
                offset: info.offset,
                rotation: info.rotation,
                scale: info.scale,
            },
        }
    }
}

impl MaterialParams {
    pub fn to_standard_material(&self, id: &str) -> ViewerResult<StandardMaterial> {
        Ok(StandardMaterial {
            base_color: parse_hex(id, &self.color)?,
            specular_tint: parse_hex(id, &self.specular_color)?,
            perceptual_roughness: shininess_to_roughness(self.shininess),
            ..default()
        })
    }
}

/// Blinn-Phong exponent to perceptual roughness.
pub fn shininess_to_roughness(shininess: f32) -> f32 {
    (2.0 / (shininess.max(0.0) + 2.0))
        .sqrt()
        .clamp(MIN_ROUGHNESS, 1.0)
}

fn parse_hex(id: &str, value: &str) -> ViewerResult<Color> {
    Srgba::hex(value)
        .map(Color::Srgba)
        .map_err(|_| ViewerError::InvalidColor {
            id: id.to_string(),
            value: value.to_string(),
        })
}
