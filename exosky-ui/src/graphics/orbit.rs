//! Orbit camera for the explorer.
//!
//! The camera circles a target point with `+Y` up. Pointer input is
//! accumulated into pending deltas that are bled into the camera a fraction
//! per frame, which gives the damped feel. A fly-to animates the target and
//! the orbit distance.

use std::{
    f32::consts::PI,
    time::Duration,
};

use nalgebra::{
    Point3,
    Vector2,
    Vector3,
};

use crate::graphics::transform::Transform;

pub const DAMPING_FACTOR: f32 = 0.05;
pub const FLY_TO_DURATION: Duration = Duration::from_secs(1);

/// Keeps the camera off the poles, where `look_at` degenerates.
const MIN_POLAR: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around `+Y`, measured from `+Z`.
    theta: f32,
    /// Polar angle from `+Y`.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(&self) -> Vector3<f32> {
        let sin_phi = self.phi.sin();
        Vector3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    from_target: Point3<f32>,
    to_target: Point3<f32>,
    from_radius: f32,
    to_radius: f32,
    elapsed: Duration,
    duration: Duration,
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    }
    else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    target: Point3<f32>,
    spherical: Spherical,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vector3<f32>,
    flight: Option<Flight>,

    pub damping_factor: f32,
    pub rotate_speed: f32,
    /// Orbit distance a fly-to ends at.
    pub focus_distance: f32,
}

impl OrbitController {
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            target,
            spherical: Spherical::from_offset(eye - target),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vector3::zeros(),
            flight: None,
            damping_factor: DAMPING_FACTOR,
            rotate_speed: 1.0,
            focus_distance: 0.5,
        }
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn eye(&self) -> Point3<f32> {
        self.target + self.spherical.to_offset()
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn transform(&self) -> Transform {
        Transform::look_at(self.eye(), self.target, Vector3::y())
    }

    /// Drag rotation. A drag across the full viewport height turns the
    /// camera once around.
    pub fn rotate(&mut self, delta: Vector2<f32>, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_theta -= 2.0 * PI * delta.x / height * self.rotate_speed;
        self.pending_phi -= 2.0 * PI * delta.y / height * self.rotate_speed;
    }

    /// Drag panning in screen space. The target moves so that the point
    /// under the pointer stays under it, at the target's depth.
    pub fn pan(&mut self, delta: Vector2<f32>, viewport_height: f32, fovy_degrees: f32) {
        let height = viewport_height.max(1.0);
        let target_distance = self.spherical.radius * (fovy_degrees.to_radians() / 2.0).tan();
        let transform = self.transform();

        let left = transform.right() * (-2.0 * delta.x * target_distance / height);
        let up = transform.up() * (2.0 * delta.y * target_distance / height);
        self.pending_pan += left + up;
    }

    /// Starts flying the camera to `point`, keeping the current viewing
    /// direction. Replaces a running flight.
    pub fn fly_to(&mut self, point: Point3<f32>) {
        tracing::debug!(?point, "flying to");
        self.pending_pan = Vector3::zeros();
        self.flight = Some(Flight {
            from_target: self.target,
            to_target: point,
            from_radius: self.spherical.radius,
            to_radius: self.focus_distance,
            elapsed: Duration::ZERO,
            duration: FLY_TO_DURATION,
        });
    }

    pub fn update(&mut self, dt: Duration) -> Transform {
        if let Some(flight) = &mut self.flight {
            flight.elapsed = (flight.elapsed + dt).min(flight.duration);
            let t = ease_in_out_cubic(flight.elapsed.as_secs_f32() / flight.duration.as_secs_f32());

            self.target = flight.from_target + (flight.to_target - flight.from_target) * t;
            self.spherical.radius = flight.from_radius + (flight.to_radius - flight.from_radius) * t;

            if flight.elapsed >= flight.duration {
                self.flight = None;
            }
        }

        let factor = self.damping_factor;
        self.spherical.theta += self.pending_theta * factor;
        self.spherical.phi = (self.spherical.phi + self.pending_phi * factor)
            .clamp(MIN_POLAR, PI - MIN_POLAR);
        self.target += self.pending_pan * factor;

        self.pending_theta *= 1.0 - factor;
        self.pending_phi *= 1.0 - factor;
        self.pending_pan *= 1.0 - factor;

        self.transform()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn it_starts_where_it_was_placed() {
        let orbit = OrbitController::new(Point3::new(1.0, 1.0, 1.0), Point3::origin());
        assert_abs_diff_eq!(orbit.eye(), Point3::new(1.0, 1.0, 1.0), epsilon = 1e-5);
        assert_abs_diff_eq!(orbit.distance(), 3f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_damped() {
        let mut orbit = OrbitController::new(Point3::new(0.0, 0.0, 2.0), Point3::origin());
        orbit.rotate(Vector2::new(100.0, 0.0), 720.0);

        let before = orbit.eye();
        orbit.update(FRAME);
        let first_step = (orbit.eye() - before).norm();
        assert!(first_step > 0.0);

        let before = orbit.eye();
        orbit.update(FRAME);
        let second_step = (orbit.eye() - before).norm();
        assert!(second_step < first_step);

        // rotation keeps the distance to the target
        assert_abs_diff_eq!(orbit.distance(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn rotation_doesnt_flip_over_the_poles() {
        let mut orbit = OrbitController::new(Point3::new(0.0, 0.0, 2.0), Point3::origin());
        orbit.rotate(Vector2::new(0.0, 100_000.0), 720.0);
        for _ in 0..200 {
            orbit.update(FRAME);
        }
        assert!(orbit.eye().y > 1.99);
        assert!(orbit.transform().position().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn pan_moves_the_target() {
        let mut orbit = OrbitController::new(Point3::new(0.0, 0.0, 2.0), Point3::origin());
        orbit.pan(Vector2::new(50.0, 0.0), 720.0, 75.0);
        for _ in 0..300 {
            orbit.update(FRAME);
        }
        // dragging right moves the scene right, so the target moves left
        assert!(orbit.target().x < 0.0);
        assert_abs_diff_eq!(orbit.target().y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn fly_to_arrives_after_one_second() {
        let mut orbit = OrbitController::new(Point3::new(1.0, 1.0, 1.0), Point3::origin());
        let destination = Point3::new(3.0, -2.0, 5.0);
        orbit.fly_to(destination);
        assert!(orbit.is_flying());

        orbit.update(Duration::from_millis(500));
        let halfway = orbit.target();
        assert_abs_diff_eq!(halfway, Point3::new(1.5, -1.0, 2.5), epsilon = 1e-4);

        orbit.update(Duration::from_millis(600));
        assert!(!orbit.is_flying());
        assert_abs_diff_eq!(orbit.target(), destination, epsilon = 1e-5);
        assert_abs_diff_eq!(orbit.distance(), orbit.focus_distance, epsilon = 1e-5);
    }

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_abs_diff_eq!(ease_in_out_cubic(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(
            ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75),
            1.0,
            epsilon = 1e-6
        );
    }
}
