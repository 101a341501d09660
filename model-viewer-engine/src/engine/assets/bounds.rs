use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

/// Axis-aligned bounding box of a mesh in its local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        let first = Vec3::from_array(*positions.first()?);
        let (min, max) = positions
            .iter()
            .map(|p| Vec3::from_array(*p))
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Returns `None` when the mesh has no `Float32x3` position attribute.
    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
            VertexAttributeValues::Float32x3(positions) => Self::from_positions(positions),
            _ => None,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_positions() {
        let bounds =
            ModelBounds::from_positions(&[[1.0, -2.0, 0.5], [-3.0, 4.0, 0.0], [0.0, 0.0, 2.5]])
                .unwrap();
        assert_eq!(bounds.min, Vec3::new(-3.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 2.5));
        assert_eq!(bounds.center(), Vec3::new(-1.0, 1.0, 1.25));
        assert_eq!(bounds.size(), Vec3::new(4.0, 6.0, 2.5));
    }

    #[test]
    fn empty_positions_have_no_bounds() {
        assert!(ModelBounds::from_positions(&[]).is_none());
    }
}
