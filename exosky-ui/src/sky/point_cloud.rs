//! GPU-ready point clouds built from catalog records.
//!
//! A cloud keeps its vertex buffer and a parallel label table, so a hit
//! on vertex `i` can be turned back into something to show the user.

use bytemuck::{
    Pod,
    Zeroable,
};
use exosky_protocol::model::{
    body::BodyRecord,
    star::StarRecord,
};
use nalgebra::Point3;
use palette::{
    LinSrgb,
    Mix,
    Srgb,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::sky::coords::Equatorial;

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub size: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    pub magnitude: f32,
}

/// How sky stars are placed, sized and colored by magnitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarStyle {
    pub radius: f64,
    pub base_size: f32,
    pub reference_magnitude: f32,
    pub scale_factor: f32,
    pub bright_color: Srgb<u8>,
    pub faint_color: Srgb<u8>,
}

impl Default for StarStyle {
    fn default() -> Self {
        Self {
            radius: 1000.0,
            base_size: 0.8,
            reference_magnitude: 6.0,
            scale_factor: 0.05,
            bright_color: Srgb::new(0xff, 0x60, 0x30),
            faint_color: Srgb::new(0x1b, 0x39, 0x84),
        }
    }
}

/// Fixed size and color for every point of a cloud.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub size: f32,
    pub color: Srgb<u8>,
}

impl MarkerStyle {
    pub const NEARBY_STAR: Self = Self {
        size: 0.1,
        color: Srgb::new(0xff, 0xff, 0xff),
    };

    pub const EXOPLANET: Self = Self {
        size: 0.1,
        color: Srgb::new(0xb6, 0xd7, 0xa8),
    };

    pub const SUN: Self = Self {
        size: 0.15,
        color: Srgb::new(0xff, 0xdb, 0x4d),
    };
}

/// Point size for a star of magnitude `vmag`. Lower magnitudes (brighter
/// stars) give larger points.
pub fn magnitude_to_size(vmag: f32, style: &StarStyle) -> f32 {
    style.base_size + (style.reference_magnitude - vmag) / style.scale_factor
}

pub fn magnitude_to_color(vmag: f32, style: &StarStyle) -> LinSrgb<f32> {
    let factor = (vmag / style.reference_magnitude).clamp(0.0, 1.0);
    let bright = style.bright_color.into_format::<f32>().into_linear();
    let faint = style.faint_color.into_format::<f32>().into_linear();
    bright.mix(faint, factor)
}

fn linear_components(color: Srgb<u8>) -> [f32; 3] {
    let (red, green, blue) = color.into_format::<f32>().into_linear().into_components();
    [red, green, blue]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudKind {
    /// Sky stars placed on the celestial sphere.
    Stars,
    NearbyStars,
    Exoplanets,
    Sun,
}

/// What is known about a single point after it was hit.
#[derive(Clone, Debug, PartialEq)]
pub struct PointInfo {
    pub cloud: CloudKind,
    /// Position in the cloud's vertex buffer.
    pub index: usize,
    /// Row key of the catalog the point came from.
    pub row: u32,
    pub label: String,
    pub magnitude: Option<f32>,
    pub position: Point3<f32>,
}

#[derive(Clone, Debug)]
pub struct PointCloud {
    pub kind: CloudKind,
    pub pickable: bool,
    pub visible: bool,
    vertices: Vec<PointVertex>,
    rows: Vec<u32>,
    labels: Vec<String>,
}

impl PointCloud {
    pub fn from_stars(stars: &[StarRecord], style: &StarStyle) -> Self {
        let mut vertices = Vec::with_capacity(stars.len());
        let mut rows = Vec::with_capacity(stars.len());
        let mut labels = Vec::with_capacity(stars.len());

        for star in stars {
            let position = Equatorial::new(star.ra, star.dec)
                .to_cartesian(style.radius)
                .cast::<f32>();
            let vmag = star.vmag as f32;
            let (red, green, blue) = magnitude_to_color(vmag, style).into_components();

            vertices.push(PointVertex {
                position: position.coords.into(),
                size: magnitude_to_size(vmag, style),
                color: [red, green, blue],
                magnitude: vmag,
            });
            rows.push(star.index);
            labels.push(star.name.clone());
        }

        tracing::debug!(num_stars = vertices.len(), "built star cloud");

        Self {
            kind: CloudKind::Stars,
            pickable: true,
            visible: true,
            vertices,
            rows,
            labels,
        }
    }

    pub fn from_bodies(kind: CloudKind, bodies: &[BodyRecord], style: &MarkerStyle) -> Self {
        let color = linear_components(style.color);

        let vertices = bodies
            .iter()
            .map(|body| {
                PointVertex {
                    position: body.position.coords.into(),
                    size: style.size,
                    color,
                    magnitude: 0.0,
                }
            })
            .collect::<Vec<_>>();
        let rows = bodies.iter().map(|body| body.index).collect();
        let labels = bodies.iter().map(|body| body.name.clone()).collect();

        tracing::debug!(?kind, num_bodies = vertices.len(), "built body cloud");

        Self {
            kind,
            pickable: true,
            visible: true,
            vertices,
            rows,
            labels,
        }
    }

    /// The single sun marker at the origin.
    pub fn sun() -> Self {
        Self {
            kind: CloudKind::Sun,
            pickable: true,
            visible: true,
            vertices: vec![PointVertex {
                position: [0.0; 3],
                size: MarkerStyle::SUN.size,
                color: linear_components(MarkerStyle::SUN.color),
                magnitude: 0.0,
            }],
            rows: vec![0],
            labels: vec!["Sun".to_owned()],
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices
            .iter()
            .map(|vertex| Point3::from(vertex.position))
    }

    pub fn position(&self, index: usize) -> Option<Point3<f32>> {
        self.vertices
            .get(index)
            .map(|vertex| Point3::from(vertex.position))
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn point(&self, index: usize) -> Option<PointInfo> {
        let vertex = self.vertices.get(index)?;
        Some(PointInfo {
            cloud: self.kind,
            index,
            row: self.rows[index],
            label: self.labels[index].clone(),
            magnitude: (self.kind == CloudKind::Stars).then_some(vertex.magnitude),
            position: Point3::from(vertex.position),
        })
    }

    /// Index of the first point labelled `label`.
    pub fn find(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|other| other == label)
    }
}
