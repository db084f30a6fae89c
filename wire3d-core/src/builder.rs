/// Incremental mesh building with edge deduplication
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Edge, Mesh, Vertex, VertexIndex, MAX_VERTICES};

impl Mesh {
    /// Append a vertex and return its index.
    ///
    /// On failure the mesh is left exactly as it was.
    pub fn append_vertex(&mut self, x: f32, y: f32, z: f32) -> MeshResult<VertexIndex> {
        let index = self.vertices.len();
        if index >= MAX_VERTICES {
            return Err(MeshError::CapacityExceeded {
                limit: MAX_VERTICES,
            });
        }

        self.vertices.try_reserve(1)?;
        self.vertices.push(Vertex::new(x, y, z));

        // Bounded by MAX_VERTICES above
        Ok(index as VertexIndex)
    }

    /// True if an edge joining `v1` and `v2` is stored, in either order
    pub fn edge_exists(&self, v1: VertexIndex, v2: VertexIndex) -> bool {
        self.edges.iter().any(|edge| edge.connects(v1, v2))
    }

    /// Store the edge `{v1, v2}` unless it is already present.
    ///
    /// The presence check scans every stored edge, so building a mesh of
    /// `E` edges this way costs O(E²) comparisons. Vertex bounds are not
    /// checked here; see [`Mesh::validate`].
    pub fn append_edge_if_absent(&mut self, v1: VertexIndex, v2: VertexIndex) -> MeshResult<()> {
        if self.edge_exists(v1, v2) {
            return Ok(());
        }

        self.edges.try_reserve(1)?;
        self.edges.push(Edge::new(v1, v2));
        Ok(())
    }

    /// Check that every edge references an existing vertex
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        let in_bounds = |index: VertexIndex| (index as usize) < vertex_count;

        match self
            .edges
            .iter()
            .position(|edge| !in_bounds(edge.a) || !in_bounds(edge.b))
        {
            Some(edge) => Err(MeshError::EdgeOutOfBounds { edge, vertex_count }),
            None => Ok(()),
        }
    }
}
