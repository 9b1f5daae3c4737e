//! Camera, picking and scene description.
//!
//! Nothing here talks to a GPU. Pages describe what should be drawn through
//! [`scene::Scene`] and the host renderer turns it into draw calls.

pub mod camera;
pub mod orbit;
pub mod picking;
pub mod scene;
pub mod transform;
