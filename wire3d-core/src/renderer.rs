/// Edge-by-edge wireframe rendering through a caller-supplied line primitive
use crate::geometry::Mesh;

/// A backend that can draw a straight line between two screen points.
///
/// Any `FnMut(f32, f32, f32, f32)` closure is a `LineDrawer`.
pub trait LineDrawer {
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
}

impl<F> LineDrawer for F
where
    F: FnMut(f32, f32, f32, f32),
{
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self(x1, y1, x2, y2)
    }
}

/// Draw every edge of `mesh` once, in insertion order, using the projected
/// positions from the most recent transform pass.
///
/// # Panics
///
/// Panics if an edge references a vertex the mesh does not have. Meshes
/// produced by the importer never do; hand-built meshes can be checked
/// with [`Mesh::validate`].
pub fn render<D: LineDrawer + ?Sized>(mesh: &Mesh, drawer: &mut D) {
    let projected = |index| match mesh.vertex(index) {
        Some(vertex) => vertex.projected,
        None => panic!(
            "edge references vertex {index} but the mesh has {} vertices",
            mesh.vertex_count()
        ),
    };

    for edge in mesh.edges() {
        let start = projected(edge.a);
        let end = projected(edge.b);
        drawer.draw_line(start.x, start.y, end.x, end.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::precalculate;
    use crate::transform::RotationState;
    use nalgebra::Vector3;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(f32, f32, f32, f32)>,
    }

    impl LineDrawer for Recorder {
        fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
            self.lines.push((x1, y1, x2, y2));
        }
    }

    #[test]
    fn test_one_call_per_edge_in_order() {
        let mut mesh = Mesh::roofed_cube().unwrap();
        let state = mesh.transform_mut();
        state.rotation = RotationState::new(20.0, 0.0, 0.0);
        state.offset = Vector3::new(160.0, 120.0, -10.0);
        state.scale = 120.0;
        precalculate(&mut mesh);

        let mut recorder = Recorder::default();
        render(&mesh, &mut recorder);

        assert_eq!(recorder.lines.len(), mesh.edge_count());
        for (edge, line) in mesh.edges().iter().zip(&recorder.lines) {
            let a = mesh.vertex(edge.a).unwrap().projected;
            let b = mesh.vertex(edge.b).unwrap().projected;
            assert_eq!(*line, (a.x, a.y, b.x, b.y));
        }
    }

    #[test]
    fn test_closure_drawer() {
        let mesh = Mesh::cube(1.0).unwrap();
        let mut calls = 0;
        render(&mesh, &mut |_: f32, _: f32, _: f32, _: f32| calls += 1);
        assert_eq!(calls, 12);
    }

    #[test]
    fn test_empty_mesh_draws_nothing() {
        let mut calls = 0;
        render(&Mesh::new(), &mut |_: f32, _: f32, _: f32, _: f32| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    #[should_panic(expected = "references vertex 5")]
    fn test_out_of_bounds_edge_panics() {
        let mut mesh = Mesh::new();
        mesh.append_vertex(0.0, 0.0, 0.0).unwrap();
        mesh.append_edge_if_absent(0, 5).unwrap();
        render(&mesh, &mut |_: f32, _: f32, _: f32, _: f32| {});
    }
}
