use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext, RenderAssetUsages};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StlLoaderError {
    #[error("Could not read STL data: {0}")]
    Io(#[from] std::io::Error),

    #[error("STL file contains no triangles")]
    EmptyMesh,

    #[error("Triangle {face} references vertex {index}, but only {count} vertices exist")]
    InvalidIndex {
        face: usize,
        index: usize,
        count: usize,
    },
}

/// Asset loader for binary and ASCII `.stl` files.
#[derive(Default)]
pub struct StlLoader;

impl AssetLoader for StlLoader {
    type Asset = Mesh;
    type Settings = ();
    type Error = StlLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Mesh, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let mesh = parse_stl(&bytes)?;
        debug!(
            "Parsed {} ({} vertices)",
            load_context.path().display(),
            mesh.count_vertices()
        );
        Ok(mesh)
    }

    fn extensions(&self) -> &[&str] {
        &["stl"]
    }
}

pub fn parse_stl(bytes: &[u8]) -> Result<Mesh, StlLoaderError> {
    let stl = stl_io::read_stl(&mut Cursor::new(bytes))?;
    mesh_from_stl(&stl)
}

/// Builds a flat-shaded triangle mesh. Vertices are unshared so every face
/// keeps its own normal.
fn mesh_from_stl(stl: &stl_io::IndexedMesh) -> Result<Mesh, StlLoaderError> {
    if stl.faces.is_empty() {
        return Err(StlLoaderError::EmptyMesh);
    }

    let count = stl.vertices.len();
    let mut positions = Vec::with_capacity(stl.faces.len() * 3);
    let mut normals = Vec::with_capacity(stl.faces.len() * 3);

    for (face, triangle) in stl.faces.iter().enumerate() {
        let corners = triangle
            .vertices
            .iter()
            .map(|&index| {
                stl.vertices
                    .get(index)
                    .map(|v| Vec3::new(v[0], v[1], v[2]))
                    .ok_or(StlLoaderError::InvalidIndex { face, index, count })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let normal = face_normal(
            Vec3::new(triangle.normal[0], triangle.normal[1], triangle.normal[2]),
            &corners,
        );

        for corner in corners {
            positions.push(corner.to_array());
            normals.push(normal.to_array());
        }
    }

    let indices = (0..positions.len() as u32).collect::<Vec<_>>();

    Ok(Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices)))
}

/// Exporters often write zero normals; fall back to the winding order.
fn face_normal(stored: Vec3, corners: &[Vec3]) -> Vec3 {
    if let Some(normal) = stored.try_normalize() {
        return normal;
    }
    match corners {
        [a, b, c] => (*b - *a).cross(*c - *a).try_normalize().unwrap_or(Vec3::Y),
        _ => Vec3::Y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    const TETRAHEDRON: &str = "solid tetra
facet normal 0 0 -1
  outer loop
    vertex 0 0 0
    vertex 1 0 0
    vertex 0 1 0
  endloop
endfacet
facet normal 0 0 0
  outer loop
    vertex 0 0 0
    vertex 0 0 1
    vertex 1 0 0
  endloop
endfacet
endsolid tetra
";

    #[test]
    fn ascii_stl_becomes_flat_mesh() {
        let mesh = parse_stl(TETRAHEDRON.as_bytes()).unwrap();
        assert_eq!(mesh.count_vertices(), 6);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));

        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("mesh has no normals");
        };
        assert_eq!(normals[0], [0.0, 0.0, -1.0]);
        // Second facet has a zero normal and is recomputed from its winding.
        assert_eq!(normals[3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn binary_stl_is_parsed() {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        for value in [
            0.0f32, 0.0, 1.0, // normal
            0.0, 0.0, 0.0, // v0
            2.0, 0.0, 0.0, // v1
            0.0, 2.0, 0.0, // v2
        ] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let mesh = parse_stl(&bytes).unwrap();
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("mesh has no positions");
        };
        assert_eq!(positions.as_slice(), &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]]);
    }

    #[test]
    fn empty_solid_is_rejected() {
        assert!(parse_stl(b"solid empty\nendsolid empty\n").is_err());
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(parse_stl(b"not an stl").is_err());
    }
}
