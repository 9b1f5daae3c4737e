pub mod catalog;
pub mod model;

use derive_more::{
    Deref,
    Display,
    From,
    Into,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::catalog::StarCatalog;

/// Path segments of the versioned API, relative to the server root.
pub const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Static catalog files bundled with the front end, relative to the asset
/// root.
pub mod assets {
    pub const EARTH_STARS: &str = "data/earth_stars.json";
    pub const NEARBY_STARS: &str = "data/cart_nearby_stars.json";
    pub const NEARBY_PLANETS: &str = "data/cart_nearby_planets.json";
}

/// Display name of an exoplanet, as used in API paths.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Deref,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct ExoplanetName(pub String);

impl From<&str> for ExoplanetName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// `GET /api/v1/exoplanets/{name}/stars` returns the sky as seen from the
/// planet, in the same columnar shape as the bundled earth sky.
pub type GetPlanetStarsResponse = StarCatalog;
