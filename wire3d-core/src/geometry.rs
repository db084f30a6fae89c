/// Mesh storage: vertices, edges and the per-mesh transform state
use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::transform::TransformState;

/// Index of a vertex inside a [`Mesh`]
pub type VertexIndex = u32;

/// Largest number of vertices a mesh can hold
pub const MAX_VERTICES: usize = VertexIndex::MAX as usize;

/// A wireframe vertex with its authoring-space, rotated and projected positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position as authored
    pub original: Point3<f32>,
    /// Position after the last transform pass (rotation + z offset)
    pub rotated: Point3<f32>,
    /// Screen position after the last transform pass
    pub projected: Point2<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            original: Point3::new(x, y, z),
            rotated: Point3::origin(),
            projected: Point2::origin(),
        }
    }
}

/// A visible line segment between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: VertexIndex,
    pub b: VertexIndex,
}

impl Edge {
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        Self { a, b }
    }

    /// True if this edge joins `v1` and `v2`, in either order
    pub fn connects(&self, v1: VertexIndex, v2: VertexIndex) -> bool {
        (self.a == v1 && self.b == v2) || (self.a == v2 && self.b == v1)
    }
}

/// A wireframe object: ordered vertices, deduplicated edges and transform state.
///
/// Storage is only changed through the store and builder operations, so
/// indices handed out by [`Mesh::append_vertex`] stay valid until
/// [`Mesh::release`].
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    transform: TransformState,
}

impl Mesh {
    /// Create an empty mesh with no storage allocated
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for exactly `vertex_count` vertices
    /// and `edge_count` edges, so that building it never reallocates.
    ///
    /// If any reservation fails, whatever was already reserved is released
    /// before the error is returned.
    pub fn create(vertex_count: usize, edge_count: usize) -> MeshResult<Self> {
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::CapacityExceeded {
                limit: MAX_VERTICES,
            });
        }

        let mut vertices = Vec::new();
        vertices.try_reserve_exact(vertex_count)?;
        let mut edges = Vec::new();
        edges.try_reserve_exact(edge_count)?;

        debug!(vertex_count, edge_count, "pre-allocated mesh");

        Ok(Self {
            vertices,
            edges,
            transform: TransformState::default(),
        })
    }

    /// Free all vertex and edge storage. Safe to call any number of times.
    pub fn release(&mut self) {
        self.vertices = Vec::new();
        self.edges = Vec::new();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    /// Number of vertices that fit without reallocating
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Number of edges that fit without reallocating
    pub fn edge_capacity(&self) -> usize {
        self.edges.capacity()
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Rotation, offset and scale used by the next transform pass
    pub fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }

    /// Create a wireframe cube centred on the origin
    pub fn cube(size: f32) -> MeshResult<Self> {
        let half = size / 2.0;
        let mut mesh = Self::create(8, 12)?;

        for &(x, y, z) in &CUBE_CORNERS {
            mesh.append_vertex(x * half, y * half, z * half)?;
        }
        for &(a, b) in &CUBE_EDGES {
            mesh.append_edge_if_absent(a, b)?;
        }

        Ok(mesh)
    }

    /// Create a cube of side 2 with a pyramid roof whose apex sits at y = 3
    pub fn roofed_cube() -> MeshResult<Self> {
        let mut mesh = Self::create(9, 16)?;

        for &(x, y, z) in &CUBE_CORNERS {
            mesh.append_vertex(x, y, z)?;
        }
        let apex = mesh.append_vertex(0.0, 3.0, 0.0)?;

        for &(a, b) in &CUBE_EDGES {
            mesh.append_edge_if_absent(a, b)?;
        }
        for corner in [2, 3, 6, 7] {
            mesh.append_edge_if_absent(corner, apex)?;
        }

        Ok(mesh)
    }
}

/// Unit cube corners: front face (z = 1) first, then the back face
const CUBE_CORNERS: [(f32, f32, f32); 8] = [
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, 1.0),
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
];

const CUBE_EDGES: [(VertexIndex, VertexIndex); 12] = [
    // Front face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // Back face
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // Connecting edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_capacity(), 0);
        assert_eq!(mesh.edge_capacity(), 0);
    }

    #[test]
    fn test_create_preallocates() {
        let mesh = Mesh::create(9, 16).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.edge_count(), 0);
        assert!(mesh.vertex_capacity() >= 9);
        assert!(mesh.edge_capacity() >= 16);
    }

    #[test]
    fn test_create_reports_failed_reservation() {
        let result = Mesh::create(4, usize::MAX);
        assert!(matches!(result, Err(MeshError::Allocation(_))));
    }

    #[test]
    fn test_create_rejects_unaddressable_vertex_count() {
        let result = Mesh::create(MAX_VERTICES + 1, 0);
        assert!(matches!(result, Err(MeshError::CapacityExceeded { .. })));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut mesh = Mesh::cube(2.0).unwrap();
        mesh.release();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_capacity(), 0);

        mesh.release();
        assert!(mesh.is_empty());

        let mut empty = Mesh::new();
        empty.release();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube(2.0).unwrap();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.edge_count(), 12);
        assert_eq!(cube.vertex(6).unwrap().original, Point3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn test_roofed_cube() {
        let mesh = Mesh::roofed_cube().unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.edge_count(), 16);
        assert!(mesh.edge_exists(7, 8));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_edge_connects_either_order() {
        let edge = Edge::new(3, 5);
        assert!(edge.connects(3, 5));
        assert!(edge.connects(5, 3));
        assert!(!edge.connects(3, 4));
    }
}
