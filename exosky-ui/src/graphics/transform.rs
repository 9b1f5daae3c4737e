use nalgebra::{
    Isometry3,
    Point3,
    Translation3,
    UnitQuaternion,
    Vector3,
};

/// Placement of an object in world space. For cameras this maps camera
/// space (looking down `-Z`) to world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub isometry: Isometry3<f32>,
}

impl Transform {
    pub fn from_position(position: Point3<f32>) -> Self {
        Self {
            isometry: Isometry3::from_parts(
                Translation3::from(position.coords),
                UnitQuaternion::identity(),
            ),
        }
    }

    pub fn from_parts(position: Point3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(position.coords), rotation),
        }
    }

    pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        // `look_at_rh` is the view matrix, i.e. world to camera.
        let view = Isometry3::look_at_rh(&eye, &target, &up);
        Self {
            isometry: view.inverse(),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.isometry.translation.vector)
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.isometry.rotation
    }

    /// Direction the camera looks at, in world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.isometry.rotation * -Vector3::z()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.isometry.rotation * Vector3::x()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.isometry.rotation * Vector3::y()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn look_at_faces_the_target() {
        let transform = Transform::look_at(
            Point3::new(1.0, 1.0, 1.0),
            Point3::origin(),
            Vector3::y(),
        );

        assert_abs_diff_eq!(transform.position(), Point3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(
            transform.forward(),
            -Vector3::new(1.0, 1.0, 1.0).normalize(),
            epsilon = 1e-6
        );
        assert!(transform.up().y > 0.0);
    }

    #[test]
    fn default_transform_looks_down_negative_z() {
        let transform = Transform::from_position(Point3::origin());
        assert_abs_diff_eq!(transform.forward(), -Vector3::z(), epsilon = 1e-6);
    }
}
