//! Triangle mesh module
//!
//! Polygon triangulation, multi-part merging and connectivity queries.

mod components;
mod polygon;

pub use components::connected_components;
pub use polygon::{triangulate, triangulate_polygon};

use glam::Vec3;

use crate::error::{Result, RigError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        for (f, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(RigError::FaceIndexOutOfRange {
                    face: f,
                    index: i64::from(bad),
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Builds a triangle mesh from triangles and quads.
    pub fn from_polygons<P: AsRef<[u32]>>(vertices: Vec<Vec3>, polygons: &[P]) -> Result<Self> {
        Self::new(vertices, triangulate(polygons)?)
    }

    /// Concatenates meshes, offsetting each part's face indices by the
    /// vertex count of the parts before it.
    pub fn merge(parts: &[Mesh]) -> Self {
        let mut merged = Mesh::default();
        for part in parts {
            let base = merged.vertices.len() as u32;
            merged.vertices.extend_from_slice(&part.vertices);
            merged
                .faces
                .extend(part.faces.iter().map(|f| f.map(|i| i + base)));
        }
        merged
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    /// Same connectivity, new positions (e.g. a skinned frame).
    pub fn with_vertices(&self, vertices: Vec<Vec3>) -> Result<Self> {
        if vertices.len() != self.vertices.len() {
            return Err(RigError::ShapeMismatch {
                expected: self.vertices.len(),
                found: vertices.len(),
            });
        }
        Ok(Self {
            vertices,
            faces: self.faces.clone(),
        })
    }

    pub fn face_centroid(&self, index: usize) -> Option<Vec3> {
        self.face(index).map(|f| {
            f.iter()
                .map(|&i| self.vertices[i as usize])
                .sum::<Vec3>()
                / 3.0
        })
    }
}
