//! Celestial geometry: coordinate frames, reference grids and the point
//! clouds built from catalogs.

pub mod coords;
pub mod grid;
pub mod point_cloud;
