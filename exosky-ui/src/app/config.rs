use exosky_protocol::API_PREFIX;
use serde::{
    Deserialize,
    Serialize,
};
use url::Url;

use crate::{
    app::interaction::{
        DrawVariant,
        InteractionConfig,
    },
    error::Error,
    graphics::{
        camera::CameraProjection,
        picking::PickOptions,
    },
    sky::point_cloud::StarStyle,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Urls {
    pub api_url: Url,
    pub asset_url: Url,
}

impl Urls {
    /// API and assets served next to the page at `base`.
    pub fn from_base(base: &Url) -> Result<Self, url::ParseError> {
        let api_url = base.join(&format!("{}/", API_PREFIX.join("/")))?;
        let asset_url = base.join("./")?;
        tracing::debug!(%api_url, %asset_url);
        Ok(Self { api_url, asset_url })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl CameraConfig {
    pub fn projection(&self, aspect: f32) -> CameraProjection {
        CameraProjection::new(aspect, self.fovy, self.z_near, self.z_far)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub camera: CameraConfig,
    pub eye: [f32; 3],
    pub pick: PickOptions,
    pub interaction: InteractionConfig,
    pub damping_factor: f32,
    /// Orbit distance after flying to a selected object.
    pub focus_distance: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                fovy: 75.0,
                z_near: 0.1,
                z_far: 100.0,
            },
            eye: [1.0, 1.0, 1.0],
            pick: PickOptions { threshold: 0.1 },
            interaction: InteractionConfig {
                allow_pan: true,
                draw_variant: DrawVariant::Chain,
            },
            damping_factor: 0.05,
            focus_distance: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub camera: CameraConfig,
    pub pick: PickOptions,
    pub interaction: InteractionConfig,
    /// Radians of camera rotation per pixel dragged.
    pub rotation_speed: f32,
    pub stars: StarStyle,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                fovy: 75.0,
                z_near: 0.1,
                z_far: 2000.0,
            },
            pick: PickOptions { threshold: 5.0 },
            interaction: InteractionConfig {
                allow_pan: false,
                draw_variant: DrawVariant::Pairs,
            },
            rotation_speed: 0.005,
            stars: StarStyle::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Urls>,
    pub explorer: ExplorerConfig,
    pub planet: PlanetConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn urls(&self, base: &Url) -> Result<Urls, Error> {
        match &self.urls {
            Some(urls) => Ok(urls.clone()),
            None => Ok(Urls::from_base(base)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_derives_urls_from_the_page_base() {
        let base: Url = "http://localhost:3333/exosky/".parse().unwrap();
        let urls = Urls::from_base(&base).unwrap();
        assert_eq!(urls.api_url.as_str(), "http://localhost:3333/exosky/api/v1/");
        assert_eq!(urls.asset_url.as_str(), "http://localhost:3333/exosky/");
    }

    #[test]
    fn it_fills_in_defaults() {
        let config = Config::from_json_str(r#"{"planet": {"rotation_speed": 0.01}}"#).unwrap();
        assert_eq!(config.planet.rotation_speed, 0.01);
        assert_eq!(config.planet.camera.z_far, 2000.0);
        assert_eq!(config.explorer, ExplorerConfig::default());
        assert!(config.urls.is_none());

        let base: Url = "http://localhost/".parse().unwrap();
        assert_eq!(
            config.urls(&base).unwrap().api_url.as_str(),
            "http://localhost/api/v1/"
        );
    }

    #[test]
    fn explicit_urls_win() {
        let config = Config::from_json_str(
            r#"{"urls": {"api_url": "http://api.example.com/v1/", "asset_url": "http://cdn.example.com/"}}"#,
        )
        .unwrap();
        let base: Url = "http://localhost/".parse().unwrap();
        assert_eq!(
            config.urls(&base).unwrap().asset_url.as_str(),
            "http://cdn.example.com/"
        );
    }

    #[test]
    fn it_rejects_malformed_config() {
        assert!(matches!(
            Config::from_json_str(r#"{"planet": 3}"#),
            Err(Error::Config(_))
        ));
    }
}
