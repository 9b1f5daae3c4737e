use nalgebra::Point3;
use serde::{
    Deserialize,
    Serialize,
};

/// What a row of a cartesian catalog describes. Only used to pick the
/// placeholder label for rows without a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Exoplanet,
}

impl BodyKind {
    pub fn placeholder_name(&self, index: u32) -> String {
        match self {
            Self::Star => format!("Star {index}"),
            Self::Exoplanet => format!("Exoplanet {index}"),
        }
    }
}

/// A body with a precomputed position, one row of a [`CartesianCatalog`].
///
/// [`CartesianCatalog`]: crate::catalog::CartesianCatalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub index: u32,
    pub kind: BodyKind,
    pub position: Point3<f32>,
    pub name: String,
}
