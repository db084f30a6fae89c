/// Rotation state and per-mesh transform configuration
use nalgebra::{Rotation3, Vector3};

/// Rotation around the three axes, in degrees within `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: wrap_degrees(x),
            y: wrap_degrees(y),
            z: wrap_degrees(z),
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in degrees), wrapping each angle at 360
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x = wrap_degrees(self.x + dx);
        self.y = wrap_degrees(self.y + dy);
        self.z = wrap_degrees(self.z + dz);
    }

    /// Angles converted to radians, as `(x, y, z)`
    pub fn radians(&self) -> (f32, f32, f32) {
        (self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Everything a transform pass reads besides the vertices themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub rotation: RotationState,
    /// Screen offset in x and y; depth offset added to rotated z
    pub offset: Vector3<f32>,
    /// Uniform projection scale
    pub scale: f32,
}

impl TransformState {
    pub fn new(rotation: RotationState, offset: Vector3<f32>, scale: f32) -> Self {
        Self {
            rotation,
            offset,
            scale,
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            offset: Vector3::zeros(),
            scale: 1.0,
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation applied about X, then Y, then Z, each step acting on the
    /// already rotated point
    pub fn rotation(rotation: &RotationState) -> Rotation3<f32> {
        let (rx, ry, rz) = rotation.radians();
        let x = Rotation3::from_axis_angle(&Vector3::x_axis(), rx);
        let y = Rotation3::from_axis_angle(&Vector3::y_axis(), ry);
        let z = Rotation3::from_axis_angle(&Vector3::z_axis(), rz);

        z * y * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(10.0, 20.0, 30.0);
        assert_relative_eq!(state.x, 10.0);
        assert_relative_eq!(state.y, 20.0);
        assert_relative_eq!(state.z, 30.0);
    }

    #[test]
    fn test_rotation_wraps_at_360() {
        let mut state = RotationState::new(359.0, 0.0, 180.0);
        state.rotate(2.0, -1.0, 180.0);
        assert_relative_eq!(state.x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(state.y, 359.0, epsilon = 1e-4);
        assert_relative_eq!(state.z, 0.0, epsilon = 1e-4);

        assert_eq!(RotationState::new(720.0, -360.0, 360.0), RotationState::zero());
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = Transform::rotation(&RotationState::zero());
        assert_relative_eq!(rotation, Rotation3::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_rotations_compose_x_then_y_then_z() {
        // X by 90 sends +y to +z, then Y by 90 sends +z to +x
        let rotation = Transform::rotation(&RotationState::new(90.0, 90.0, 0.0));
        let p = rotation * Point3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

        // Z by 90 sends +x to +y
        let rotation = Transform::rotation(&RotationState::new(0.0, 0.0, 90.0));
        let p = rotation * Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_default_transform_state() {
        let state = TransformState::default();
        assert_eq!(state.rotation, RotationState::zero());
        assert_eq!(state.offset, Vector3::zeros());
        assert_eq!(state.scale, 1.0);
    }
}
