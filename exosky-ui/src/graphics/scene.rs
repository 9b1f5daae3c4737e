use bytemuck::{
    Pod,
    Zeroable,
};
use nalgebra::Point3;
use palette::Srgb;

use crate::{
    graphics::camera::Camera,
    sky::{
        grid::Grid,
        point_cloud::PointCloud,
    },
};

/// Straight line between two picked points.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct LineSegment {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

impl LineSegment {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self {
            start: start.coords.into(),
            end: end.coords.into(),
        }
    }

    pub fn start(&self) -> Point3<f32> {
        Point3::from(self.start)
    }

    pub fn end(&self) -> Point3<f32> {
        Point3::from(self.end)
    }
}

/// Everything a page wants drawn this frame.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
    pub camera: &'a Camera,
    pub clear_color: Srgb<u8>,
    pub clouds: &'a [PointCloud],
    pub grids: Vec<&'a Grid>,
    pub lines: &'a [LineSegment],
    pub line_color: Srgb<u8>,
}

impl<'a> Scene<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self {
            camera,
            clear_color: Srgb::new(0, 0, 0),
            clouds: &[],
            grids: vec![],
            lines: &[],
            line_color: Srgb::new(0xff, 0xff, 0xff),
        }
    }

    pub fn with_clouds(mut self, clouds: &'a [PointCloud]) -> Self {
        self.clouds = clouds;
        self
    }

    pub fn with_grid(mut self, grid: Option<&'a Grid>) -> Self {
        self.grids.extend(grid);
        self
    }

    pub fn with_lines(mut self, lines: &'a [LineSegment]) -> Self {
        self.lines = lines;
        self
    }

    /// Visible clouds only.
    pub fn visible_clouds(&self) -> impl Iterator<Item = &'a PointCloud> {
        self.clouds.iter().filter(|cloud| cloud.visible)
    }

    pub fn line_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{
        camera::CameraProjection,
        transform::Transform,
    };

    #[test]
    fn hidden_clouds_are_skipped() {
        let camera = Camera::new(
            Transform::from_position(Point3::origin()),
            CameraProjection::new(1.0, 75.0, 0.1, 100.0),
        );
        let mut hidden = PointCloud::sun();
        hidden.visible = false;
        let clouds = [PointCloud::sun(), hidden];

        let scene = Scene::new(&camera).with_clouds(&clouds).with_grid(None);
        assert_eq!(scene.visible_clouds().count(), 1);
        assert!(scene.grids.is_empty());
    }

    #[test]
    fn lines_are_packed_as_six_floats() {
        let camera = Camera::new(
            Transform::from_position(Point3::origin()),
            CameraProjection::new(1.0, 75.0, 0.1, 100.0),
        );
        let lines = [LineSegment::new(
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(4.0, 5.0, 6.0),
        )];

        let scene = Scene::new(&camera).with_lines(&lines);
        let floats: &[f32] = bytemuck::cast_slice(scene.line_bytes());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(lines[0].end(), Point3::new(4.0, 5.0, 6.0));
    }
}
