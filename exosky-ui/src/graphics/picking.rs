use nalgebra::Point3;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    graphics::camera::Ray,
    sky::point_cloud::{
        CloudKind,
        PointCloud,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickOptions {
    /// A point is hit if the ray passes within this distance, in world
    /// units.
    pub threshold: f32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { threshold: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Position of the cloud in the slice passed to [`pick`].
    pub cloud: usize,
    pub kind: CloudKind,
    /// Index of the point in its cloud.
    pub index: usize,
    /// Distance from the ray origin, along the ray.
    pub distance: f32,
    pub distance_to_ray: f32,
    pub point: Point3<f32>,
}

/// Every point of a visible, pickable cloud close enough to `ray`, nearest
/// first.
pub fn pick(ray: &Ray, clouds: &[PointCloud], options: &PickOptions) -> Vec<Hit> {
    let mut hits = vec![];

    for (cloud_index, cloud) in clouds.iter().enumerate() {
        if !cloud.visible || !cloud.pickable {
            continue;
        }

        for (index, point) in cloud.positions().enumerate() {
            let Some((distance, distance_to_ray)) = ray.closest_approach(&point)
            else {
                continue;
            };

            if distance_to_ray < options.threshold {
                hits.push(Hit {
                    cloud: cloud_index,
                    kind: cloud.kind,
                    index,
                    distance,
                    distance_to_ray,
                    point,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    tracing::trace!(num_hits = hits.len(), "picked");

    hits
}
