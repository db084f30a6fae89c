/// Wire3D Core Library - Wireframe mesh storage, transform and rendering
///
/// This library provides the platform-independent part of the pipeline:
/// a growable vertex/edge store with edge deduplication, a face file
/// importer, the per-frame rotation and perspective projection pass, and
/// an edge renderer that drives a caller-supplied line primitive.

pub mod builder;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod renderer;
pub mod transform;

// Re-export commonly used types
pub use error::{MeshError, MeshResult};
pub use geometry::{Edge, Mesh, Vertex, VertexIndex};
pub use obj::{parse_mesh_file, parse_mesh_file_with, parse_mesh_str, ImportOptions};
pub use projection::{precalculate, Z_CLAMP};
pub use renderer::{render, LineDrawer};
pub use transform::{RotationState, Transform, TransformState};
