/// Rotation and perspective projection of a mesh's vertices
use nalgebra::{Point2, Point3};

use crate::geometry::Mesh;
use crate::transform::{Transform, TransformState};

/// Nearest depth used in the perspective divide. Points closer to the
/// viewer than this, or behind it, are projected as if they sat here.
pub const Z_CLAMP: f32 = -3.0;

/// Project a rotated point to screen space.
///
/// Scaled coordinates are rounded half away from zero before the screen
/// offset is added.
pub fn project_point(rotated: &Point3<f32>, state: &TransformState) -> Point2<f32> {
    let z = rotated.z.min(Z_CLAMP);

    Point2::new(
        (rotated.x / z * state.scale).round() + state.offset.x,
        (rotated.y / z * state.scale).round() + state.offset.y,
    )
}

/// Run a transform pass: refresh every vertex's rotated and projected
/// position from its original position and the mesh's transform state.
///
/// The pass keeps no memory of earlier frames; call it again whenever the
/// rotation, offset or scale changed before rendering.
pub fn precalculate(mesh: &mut Mesh) {
    let state = *mesh.transform();
    let rotation = Transform::rotation(&state.rotation);

    for vertex in &mut mesh.vertices {
        let mut rotated = rotation * vertex.original;
        rotated.z += state.offset.z;

        vertex.rotated = rotated;
        vertex.projected = project_point(&rotated, &state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::RotationState;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn state(offset: Vector3<f32>, scale: f32) -> TransformState {
        TransformState::new(RotationState::zero(), offset, scale)
    }

    #[test]
    fn test_point_on_axis_projects_to_offset() {
        let mut mesh = Mesh::new();
        mesh.append_vertex(0.0, 0.0, -5.0).unwrap();
        *mesh.transform_mut() = state(Vector3::new(160.0, 120.0, 0.0), 100.0);

        precalculate(&mut mesh);
        assert_eq!(mesh.vertices()[0].projected, Point2::new(160.0, 120.0));
    }

    #[test]
    fn test_zero_rotation_adds_only_z_offset() {
        let mut mesh = Mesh::cube(2.0).unwrap();
        *mesh.transform_mut() = state(Vector3::new(10.0, 20.0, -6.0), 50.0);

        precalculate(&mut mesh);
        for vertex in mesh.vertices() {
            let expected = vertex.original + Vector3::new(0.0, 0.0, -6.0);
            assert_relative_eq!(vertex.rotated, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_full_turn_matches_zero_rotation() {
        let mut reference = Mesh::roofed_cube().unwrap();
        *reference.transform_mut() = state(Vector3::new(160.0, 120.0, -8.0), 120.0);
        let mut turned = reference.clone();
        turned.transform_mut().rotation = RotationState {
            x: 360.0,
            y: 360.0,
            z: 360.0,
        };

        precalculate(&mut reference);
        precalculate(&mut turned);
        for (a, b) in reference.vertices().iter().zip(turned.vertices()) {
            assert_relative_eq!(a.rotated, b.rotated, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_depth_is_clamped() {
        let state = state(Vector3::zeros(), 30.0);

        // z = -1 is nearer than the clamp, so it divides by -3
        let near = project_point(&Point3::new(3.0, 6.0, -1.0), &state);
        assert_eq!(near, Point2::new(-30.0, -60.0));

        // Points behind the viewer do not flip sign
        let behind = project_point(&Point3::new(3.0, 6.0, 4.0), &state);
        assert_eq!(behind, near);

        let far = project_point(&Point3::new(3.0, 6.0, -6.0), &state);
        assert_eq!(far, Point2::new(-15.0, -30.0));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        let state = state(Vector3::new(0.5, 0.0, 0.0), 1.0);
        // 7.5 / -3 = -2.5, rounds to -3
        let p = project_point(&Point3::new(7.5, -7.5, -3.0), &state);
        assert_eq!(p, Point2::new(-2.5, 3.0));
    }

    #[test]
    fn test_precalculate_on_empty_mesh() {
        let mut mesh = Mesh::new();
        precalculate(&mut mesh);
        assert!(mesh.is_empty());
    }
}
