/// Geometry primitives: vertices, meshes and the mesh store
use nalgebra::Point3;
use std::num::NonZeroUsize;

use crate::error::LoadError;

/// A point of the cloud in mesh-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// One frame of the animation: an ordered list of vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Reserve room for exactly `count` vertices, reporting allocation
    /// failure instead of aborting. Nothing is allocated for `count == 0`.
    pub fn try_with_capacity(count: usize) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        if count > 0 {
            vertices
                .try_reserve_exact(count)
                .map_err(|_| LoadError::OutOfMemory {
                    what: "vertices",
                    requested: count,
                })?;
        }
        Ok(Self { vertices })
    }

    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Every mesh loaded from a mesh file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshStore {
    meshes: Vec<Mesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn try_with_capacity(count: usize) -> Result<Self, LoadError> {
        let mut meshes = Vec::new();
        if count > 0 {
            meshes
                .try_reserve_exact(count)
                .map_err(|_| LoadError::OutOfMemory {
                    what: "meshes",
                    requested: count,
                })?;
        }
        Ok(Self { meshes })
    }

    pub fn push(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn get(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mesh> {
        self.meshes.iter()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Mesh count as the pacer needs it; `None` for an empty store
    pub fn mesh_count(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.meshes.len())
    }

    /// Total number of vertices across all meshes
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::len).sum()
    }

    /// Free all vertex storage, then the mesh list itself.
    ///
    /// Leaves the store empty, so calling it again (or dropping the store
    /// afterwards) is a no-op.
    pub fn release(&mut self) {
        for mesh in &mut self.meshes {
            mesh.vertices = Vec::new();
        }
        self.meshes = Vec::new();
    }
}

impl<'a> IntoIterator for &'a MeshStore {
    type Item = &'a Mesh;
    type IntoIter = std::slice::Iter<'a, Mesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.iter()
    }
}
