use serde::{
    Deserialize,
    Serialize,
};

/// A star as observed on the sky, one row of a [`StarCatalog`].
///
/// [`StarCatalog`]: crate::catalog::StarCatalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Row key in the catalog file.
    pub index: u32,

    /// Right ascension in degrees.
    pub ra: f64,

    /// Declination in degrees.
    pub dec: f64,

    /// Apparent visual magnitude. Lower is brighter.
    pub vmag: f64,

    pub name: String,
}

impl StarRecord {
    pub fn placeholder_name(index: u32) -> String {
        format!("Star {index}")
    }
}
