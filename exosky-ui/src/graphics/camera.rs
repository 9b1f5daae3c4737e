use nalgebra::{
    Perspective3,
    Point2,
    Point3,
    Unit,
    Vector3,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::graphics::transform::Transform;

pub const MIN_FOV: f32 = 20.0;
pub const MAX_FOV: f32 = 100.0;

/// Degrees of field of view per unit of wheel delta.
pub const ZOOM_SPEED: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct CameraProjection {
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub z_near: f32,
    pub z_far: f32,

    pub projection_matrix: Perspective3<f32>,
}

impl CameraProjection {
    pub fn new(aspect: f32, fovy: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            aspect,
            fovy,
            z_near,
            z_far,
            projection_matrix: camera_matrix(aspect, fovy, z_near, z_far),
        }
    }

    /// Aspects that aren't finite and positive are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            return;
        }
        self.aspect = aspect;
        self.recalculate_matrix();
    }

    /// Wheel zoom. Positive deltas (scrolling down) widen the view.
    pub fn zoom(&mut self, delta_y: f32) {
        self.fovy = (self.fovy + delta_y * ZOOM_SPEED).clamp(MIN_FOV, MAX_FOV);
        self.recalculate_matrix();
    }

    pub fn recalculate_matrix(&mut self) {
        self.projection_matrix = camera_matrix(self.aspect, self.fovy, self.z_near, self.z_far);
    }
}

fn camera_matrix(aspect: f32, fovy: f32, z_near: f32, z_far: f32) -> Perspective3<f32> {
    Perspective3::new(aspect, fovy.to_radians(), z_near, z_far)
}

/// Size of the canvas in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A collapsed or hidden canvas reports zero (or garbage) sizes.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        }
        else {
            self.width / self.height
        }
    }

    /// Pointer position (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up).
    pub fn to_ndc(&self, position: Point2<f32>) -> Point2<f32> {
        Point2::new(
            position.x / self.width * 2.0 - 1.0,
            -(position.y / self.height) * 2.0 + 1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub transform: Transform,
    pub projection: CameraProjection,
}

impl Camera {
    pub fn new(transform: Transform, projection: CameraProjection) -> Self {
        Self {
            transform,
            projection,
        }
    }

    /// Ray from the camera through the point `ndc` on the screen, bounded by
    /// the near and far planes.
    pub fn ray(&self, ndc: Point2<f32>) -> Ray {
        let matrix = &self.projection.projection_matrix;
        let near = matrix.unproject_point(&Point3::new(ndc.x, ndc.y, -1.0));
        let far = matrix.unproject_point(&Point3::new(ndc.x, ndc.y, 1.0));

        let near = self.transform.isometry * near;
        let far = self.transform.isometry * far;
        let origin = self.transform.position();

        Ray {
            origin,
            direction: Unit::new_normalize(far - near),
            near: (near - origin).norm(),
            far: (far - origin).norm(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
    /// Distance along the ray where it starts counting.
    pub near: f32,
    pub far: f32,
}

impl Ray {
    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * distance
    }

    /// Distance along the ray of the point closest to `point`, and the
    /// distance between the two. `None` if that closest point lies outside
    /// `near..=far`.
    pub fn closest_approach(&self, point: &Point3<f32>) -> Option<(f32, f32)> {
        let along = (point - self.origin).dot(&self.direction);
        if along < self.near || along > self.far {
            return None;
        }
        let distance_to_ray = (point - self.at(along)).norm();
        Some((along, distance_to_ray))
    }
}
