//! Conversions between the equatorial (RA/DEC), galactic (l/b) and
//! cartesian frames.
//!
//! Angles are degrees at the API boundary and radians internally.

use nalgebra::Point3;
use serde::{
    Deserialize,
    Serialize,
};

/// Equatorial coordinate, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension.
    pub ra: f64,
    /// Declination.
    pub dec: f64,
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn to_cartesian(&self, radius: f64) -> Point3<f64> {
        let ra = self.ra.to_radians();
        let dec = self.dec.to_radians();
        Point3::new(
            radius * dec.cos() * ra.cos(),
            radius * dec.cos() * ra.sin(),
            radius * dec.sin(),
        )
    }

    pub fn to_galactic(&self) -> Galactic {
        equatorial_to_galactic(*self)
    }
}

/// Galactic coordinate, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Galactic {
    /// Galactic longitude.
    pub l: f64,
    /// Galactic latitude.
    pub b: f64,
}

impl Galactic {
    pub fn new(l: f64, b: f64) -> Self {
        Self { l, b }
    }

    pub fn to_equatorial(&self) -> Equatorial {
        galactic_to_equatorial(*self)
    }
}

/// Orientation of the galactic frame relative to the equatorial frame,
/// degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoleConstants {
    /// Right ascension of the north galactic pole.
    pub alpha_gp: f64,
    /// Declination of the north galactic pole.
    pub delta_gp: f64,
    /// Galactic longitude of the north celestial pole.
    pub l_ncp: f64,
}

impl PoleConstants {
    pub const J2000: Self = Self {
        alpha_gp: 192.85,
        delta_gp: 27.13,
        l_ncp: 122.93,
    };

    /// Rounded constants the equatorial-to-galactic direction was first
    /// written with. Mixing them with [`Self::J2000`] in one round trip
    /// drifts by a few tenths of a degree.
    pub const LEGACY: Self = Self {
        alpha_gp: 192.25,
        delta_gp: 27.4,
        l_ncp: 123.0,
    };
}

impl Default for PoleConstants {
    fn default() -> Self {
        Self::J2000
    }
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative values up to exactly 360
    if wrapped >= 360.0 {
        0.0
    }
    else {
        wrapped
    }
}

/// Projects parallel arrays of RA/DEC onto spheres of the given radii.
///
/// Without radii (or with an empty slice) every point lies on the unit
/// sphere. The slices are expected to have equal lengths; surplus elements
/// of a longer slice are ignored.
pub fn equatorial_to_cartesian(
    ra: &[f64],
    dec: &[f64],
    radius: Option<&[f64]>,
) -> Vec<Point3<f64>> {
    let coords = ra
        .iter()
        .zip(dec)
        .map(|(ra, dec)| Equatorial::new(*ra, *dec));

    match radius.filter(|radius| !radius.is_empty()) {
        Some(radius) => coords
            .zip(radius)
            .map(|(coord, radius)| coord.to_cartesian(*radius))
            .collect(),
        None => coords.map(|coord| coord.to_cartesian(1.0)).collect(),
    }
}

pub fn equatorial_to_galactic(coord: Equatorial) -> Galactic {
    equatorial_to_galactic_with(coord, &PoleConstants::J2000)
}

pub fn equatorial_to_galactic_with(coord: Equatorial, poles: &PoleConstants) -> Galactic {
    let ra = coord.ra.to_radians();
    let dec = coord.dec.to_radians();
    let alpha_gp = poles.alpha_gp.to_radians();
    let delta_gp = poles.delta_gp.to_radians();
    let l_ncp = poles.l_ncp.to_radians();

    let sin_b = dec.sin() * delta_gp.sin() + dec.cos() * delta_gp.cos() * (ra - alpha_gp).cos();
    let b = sin_b.clamp(-1.0, 1.0).asin();

    // (y, x) = cos(b) * (sin, cos) of (l_ncp - l)
    let y = dec.cos() * (ra - alpha_gp).sin();
    let x = dec.sin() * delta_gp.cos() - dec.cos() * delta_gp.sin() * (ra - alpha_gp).cos();
    let l = l_ncp - y.atan2(x);

    Galactic {
        l: normalize_degrees(l.to_degrees()),
        b: b.to_degrees(),
    }
}

pub fn galactic_to_equatorial(coord: Galactic) -> Equatorial {
    galactic_to_equatorial_with(coord, &PoleConstants::J2000)
}

pub fn galactic_to_equatorial_with(coord: Galactic, poles: &PoleConstants) -> Equatorial {
    let l = coord.l.to_radians();
    let b = coord.b.to_radians();
    let alpha_gp = poles.alpha_gp.to_radians();
    let delta_gp = poles.delta_gp.to_radians();
    let l_ncp = poles.l_ncp.to_radians();

    let sin_dec = delta_gp.sin() * b.sin() + delta_gp.cos() * b.cos() * (l_ncp - l).cos();
    let dec = sin_dec.clamp(-1.0, 1.0).asin();

    // both scaled by cos(dec), which atan2 doesn't care about
    let sin_delta_ra = b.cos() * (l_ncp - l).sin();
    let cos_delta_ra = delta_gp.cos() * b.sin() - delta_gp.sin() * b.cos() * (l_ncp - l).cos();
    let delta_ra = sin_delta_ra.atan2(cos_delta_ra);

    Equatorial {
        ra: normalize_degrees((alpha_gp + delta_ra).to_degrees()),
        dec: dec.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn angle_between(a: f64, b: f64) -> f64 {
        ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
    }

    #[test]
    fn it_projects_the_vernal_equinox_onto_x() {
        let points = equatorial_to_cartesian(&[0.0], &[0.0], Some(&[1.0]));
        assert_eq!(points.len(), 1);
        assert_abs_diff_eq!(points[0], Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn it_defaults_to_unit_radius() {
        let points = equatorial_to_cartesian(&[90.0, 0.0], &[0.0, 90.0], None);
        assert_abs_diff_eq!(points[0], Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(points[1], Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);

        let points = equatorial_to_cartesian(&[42.0], &[-13.0], Some(&[]));
        assert_abs_diff_eq!(points[0].coords.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn it_keeps_points_on_the_sphere() {
        let mut ra = vec![];
        let mut dec = vec![];
        let mut radius = vec![];
        for i in 0..36 {
            for j in 0..=18 {
                ra.push(i as f64 * 10.0 + 0.5);
                dec.push(j as f64 * 10.0 - 90.0);
                radius.push(1000.0 + i as f64);
            }
        }

        let points = equatorial_to_cartesian(&ra, &dec, Some(&radius));
        assert_eq!(points.len(), ra.len());
        for (point, radius) in points.iter().zip(&radius) {
            assert_abs_diff_eq!(point.coords.norm(), *radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn it_round_trips_through_the_galactic_frame() {
        for (ra, dec) in [
            (0.0, 0.0),
            (10.0, 20.0),
            (123.4, 5.6),
            (266.405, -28.936),
            (300.0, -60.0),
            (359.9, -89.0),
            (45.0, 89.5),
        ] {
            let galactic = equatorial_to_galactic(Equatorial::new(ra, dec));
            let back = galactic_to_equatorial(galactic);
            assert_abs_diff_eq!(angle_between(back.ra, ra), 0.0, epsilon = 1e-8);
            assert_abs_diff_eq!(back.dec, dec, epsilon = 1e-8);
        }
    }

    #[test]
    fn it_finds_the_galactic_center_and_pole() {
        let center = Equatorial::new(266.405, -28.936).to_galactic();
        let l = if center.l > 180.0 {
            center.l - 360.0
        }
        else {
            center.l
        };
        assert_abs_diff_eq!(l, 0.0, epsilon = 0.05);
        assert_abs_diff_eq!(center.b, 0.0, epsilon = 0.05);

        let pole = Equatorial::new(192.85, 27.13).to_galactic();
        assert_abs_diff_eq!(pole.b, 90.0, epsilon = 1e-9);

        let pole = Galactic::new(0.0, 90.0).to_equatorial();
        assert_abs_diff_eq!(pole.ra, 192.85, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.dec, 27.13, epsilon = 1e-9);
    }

    #[test]
    fn it_normalizes_longitudes() {
        for ra in (0..72).map(|i| i as f64 * 5.0) {
            for dec in [-80.0, -30.0, 0.0, 30.0, 80.0] {
                let galactic = Equatorial::new(ra, dec).to_galactic();
                assert!((0.0..360.0).contains(&galactic.l));
                let equatorial = galactic.to_equatorial();
                assert!((0.0..360.0).contains(&equatorial.ra));
            }
        }

        assert_eq!(normalize_degrees(-1e-15), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
    }

    #[test]
    fn legacy_poles_drift_from_j2000() {
        let coord = Equatorial::new(83.8, -5.4);
        let legacy = equatorial_to_galactic_with(coord, &PoleConstants::LEGACY);
        let back = galactic_to_equatorial_with(legacy, &PoleConstants::J2000);

        let drift = (back.ra - coord.ra).abs() + (back.dec - coord.dec).abs();
        assert!(drift > 1e-3, "drift was {drift}");
        assert!(drift < 2.0, "drift was {drift}");

        let back = galactic_to_equatorial_with(legacy, &PoleConstants::LEGACY);
        assert_abs_diff_eq!(back.ra, coord.ra, epsilon = 1e-8);
        assert_abs_diff_eq!(back.dec, coord.dec, epsilon = 1e-8);
    }
}
