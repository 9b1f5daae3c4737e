use nalgebra::Point3;
use palette::Srgb;
use serde::{
    Deserialize,
    Serialize,
};

use crate::sky::coords::{
    Equatorial,
    Galactic,
};

/// Radius of the sphere the grids are drawn on.
pub const GRID_RADIUS: f64 = 1000.0;

/// Spacing between neighbouring rings and arcs, degrees.
pub const GRID_STEP: i32 = 15;

/// Samples per ring or arc, endpoints included.
pub const SAMPLES_PER_LOOP: usize = 129;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKind {
    Equatorial,
    Galactic,
}

impl GridKind {
    /// Outermost latitude ring, degrees.
    fn max_latitude(&self) -> i32 {
        match self {
            Self::Equatorial => 90,
            Self::Galactic => 75,
        }
    }

    pub fn color(&self) -> Srgb<u8> {
        match self {
            Self::Equatorial => Srgb::new(0x00, 0xff, 0x00),
            Self::Galactic => Srgb::new(0xff, 0x00, 0x00),
        }
    }

    /// Projects a sample given in this grid's frame into viewer space.
    fn project(&self, longitude: f64, latitude: f64) -> [f32; 3] {
        let equatorial = match self {
            Self::Equatorial => Equatorial::new(longitude, latitude),
            Self::Galactic => Galactic::new(longitude, latitude).to_equatorial(),
        };
        let point = equatorial.to_cartesian(GRID_RADIUS);
        [point.x as f32, point.y as f32, point.z as f32]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopKind {
    /// Constant latitude, sweeping longitude over 0..360.
    Latitude,
    /// Constant longitude, sweeping latitude over -90..90.
    Longitude,
}

/// Closed polyline. The renderer connects the last point back to the first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineLoop {
    pub kind: LoopKind,
    /// The fixed angle of this loop, degrees.
    pub angle: f64,
    pub points: Vec<[f32; 3]>,
}

impl LineLoop {
    fn sample(kind: LoopKind, angle: f64, project: impl Fn(f64, f64) -> [f32; 3]) -> Self {
        let n = (SAMPLES_PER_LOOP - 1) as f64;
        let points = (0..SAMPLES_PER_LOOP)
            .map(|i| {
                let t = i as f64 / n;
                match kind {
                    LoopKind::Latitude => project(t * 360.0, angle),
                    LoopKind::Longitude => project(angle, t * 180.0 - 90.0),
                }
            })
            .collect();
        Self {
            kind,
            angle,
            points,
        }
    }

    pub fn point(&self, index: usize) -> Option<Point3<f32>> {
        self.points.get(index).map(|p| Point3::from(*p))
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub kind: GridKind,
    pub color: Srgb<u8>,
    pub opacity: f32,
    pub loops: Vec<LineLoop>,
}

impl Grid {
    pub fn rings(&self) -> impl Iterator<Item = &LineLoop> {
        self.loops
            .iter()
            .filter(|line| line.kind == LoopKind::Latitude)
    }

    pub fn arcs(&self) -> impl Iterator<Item = &LineLoop> {
        self.loops
            .iter()
            .filter(|line| line.kind == LoopKind::Longitude)
    }

    /// All loops back to back. Use [`LineLoop::points`] lengths to split
    /// them into draw ranges.
    pub fn vertices(&self) -> Vec<[f32; 3]> {
        self.loops
            .iter()
            .flat_map(|line| line.points.iter().copied())
            .collect()
    }
}

pub fn build_grid(kind: GridKind) -> Grid {
    let project = |longitude: f64, latitude: f64| kind.project(longitude, latitude);
    let max_latitude = kind.max_latitude();

    let rings = (-max_latitude..=max_latitude)
        .step_by(GRID_STEP as usize)
        .map(|latitude| LineLoop::sample(LoopKind::Latitude, latitude as f64, project));
    let arcs = (0..360)
        .step_by(GRID_STEP as usize)
        .map(|longitude| LineLoop::sample(LoopKind::Longitude, longitude as f64, project));

    let loops = rings.chain(arcs).collect::<Vec<_>>();
    tracing::debug!(?kind, loops = loops.len(), "built grid");

    Grid {
        kind,
        color: kind.color(),
        opacity: 0.4,
        loops,
    }
}

/// A grid that is built the first time it is shown and only toggled
/// afterwards.
#[derive(Clone, Debug)]
pub struct GridOverlay {
    kind: GridKind,
    grid: Option<Grid>,
    visible: bool,
}

impl GridOverlay {
    pub fn new(kind: GridKind) -> Self {
        Self {
            kind,
            grid: None,
            visible: false,
        }
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_built(&self) -> bool {
        self.grid.is_some()
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible && self.grid.is_none() {
            self.grid = Some(build_grid(self.kind));
        }
        self.visible = visible;
    }

    pub fn toggle(&mut self) -> bool {
        self.set_visible(!self.visible);
        self.visible
    }

    /// The grid, if it should be drawn.
    pub fn visible_grid(&self) -> Option<&Grid> {
        self.grid.as_ref().filter(|_| self.visible)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn equatorial_grid_has_13_rings_and_24_arcs() {
        let grid = build_grid(GridKind::Equatorial);

        let rings = grid.rings().collect::<Vec<_>>();
        let arcs = grid.arcs().collect::<Vec<_>>();
        assert_eq!(rings.len(), 13);
        assert_eq!(arcs.len(), 24);
        assert_eq!(rings.first().unwrap().angle, -90.0);
        assert_eq!(rings.last().unwrap().angle, 90.0);
        assert_eq!(arcs.last().unwrap().angle, 345.0);

        for line in &grid.loops {
            assert_eq!(line.points.len(), SAMPLES_PER_LOOP);
        }
    }

    #[test]
    fn galactic_grid_stops_at_75_degrees() {
        let grid = build_grid(GridKind::Galactic);

        let rings = grid.rings().collect::<Vec<_>>();
        assert_eq!(rings.len(), 11);
        assert_eq!(rings.first().unwrap().angle, -75.0);
        assert_eq!(rings.last().unwrap().angle, 75.0);
        assert_eq!(grid.arcs().count(), 24);
        assert_eq!(grid.color, Srgb::new(0xff, 0x00, 0x00));
    }

    #[test]
    fn grid_points_lie_on_the_grid_sphere() {
        for kind in [GridKind::Equatorial, GridKind::Galactic] {
            let grid = build_grid(kind);
            for line in &grid.loops {
                for point in &line.points {
                    let norm = Point3::from(*point).coords.norm();
                    assert_abs_diff_eq!(norm, GRID_RADIUS as f32, epsilon = 0.01);
                }
            }
        }
    }

    #[test]
    fn equatorial_rings_have_constant_height() {
        let grid = build_grid(GridKind::Equatorial);
        let ring = grid.rings().find(|ring| ring.angle == 30.0).unwrap();
        let expected = (GRID_RADIUS * 30f64.to_radians().sin()) as f32;
        for point in &ring.points {
            assert_abs_diff_eq!(point[2], expected, epsilon = 1e-3);
        }

        let first = ring.point(0).unwrap();
        let last = ring.point(SAMPLES_PER_LOOP - 1).unwrap();
        assert_abs_diff_eq!(first, last, epsilon = 1e-3);
    }

    #[test]
    fn galactic_equator_passes_through_the_galactic_center() {
        let grid = build_grid(GridKind::Galactic);
        let equator = grid.rings().find(|ring| ring.angle == 0.0).unwrap();
        let center = Equatorial::new(266.405, -28.936).to_cartesian(GRID_RADIUS);

        // sample 0 is l = 0
        let start = equator.point(0).unwrap();
        let distance = (start.cast::<f64>() - center).norm();
        assert!(distance < 2.0, "distance was {distance}");
    }

    #[test]
    fn it_exposes_vertex_bytes() {
        let grid = build_grid(GridKind::Equatorial);
        let bytes = grid.loops[0].vertex_bytes();
        assert_eq!(bytes.len(), SAMPLES_PER_LOOP * 3 * std::mem::size_of::<f32>());
        assert_eq!(grid.vertices().len(), 37 * SAMPLES_PER_LOOP);
    }

    #[test]
    fn overlay_builds_once_and_toggles() {
        let mut overlay = GridOverlay::new(GridKind::Galactic);
        assert!(!overlay.is_built());
        assert!(overlay.visible_grid().is_none());

        // hiding a grid that was never shown doesn't build it
        overlay.set_visible(false);
        assert!(!overlay.is_built());

        assert!(overlay.toggle());
        assert!(overlay.is_built());
        let first = overlay.visible_grid().unwrap() as *const Grid;

        assert!(!overlay.toggle());
        assert!(overlay.visible_grid().is_none());
        assert!(overlay.is_built());

        assert!(overlay.toggle());
        assert_eq!(overlay.visible_grid().unwrap() as *const Grid, first);
    }
}
