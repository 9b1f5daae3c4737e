use std::sync::Arc;

use bytes::Bytes;
use exosky_protocol::{
    ExoplanetName,
    GetPlanetStarsResponse,
};
use url::Url;

use crate::{
    Error,
    UrlExt,
};

/// Client for the exoplanet API, rooted at `.../api/v1`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: Arc<Url>,
}

impl ApiClient {
    pub fn new(api_url: Url) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            api_url: Arc::new(api_url),
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn exoplanet_url(&self, name: &ExoplanetName, action: &str) -> Result<Url, Error> {
        Url::clone(&self.api_url)
            .joined("exoplanets")?
            .joined(name)?
            .joined(action)
    }

    /// The sky as seen from the exoplanet.
    pub async fn get_planet_stars(
        &self,
        name: &ExoplanetName,
    ) -> Result<GetPlanetStarsResponse, Error> {
        let url = self.exoplanet_url(name, "stars")?;
        tracing::debug!(%url, "fetching planet stars");

        let response: GetPlanetStarsResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    /// Downloads the PDF report for the exoplanet.
    pub async fn print_report(&self, name: &ExoplanetName) -> Result<Bytes, Error> {
        let url = self.exoplanet_url(name, "print")?;
        tracing::debug!(%url, "downloading report");

        let pdf = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_exoplanet_urls() {
        let api = ApiClient::new("http://localhost:3333/api/v1".parse().unwrap());
        let name = ExoplanetName::from("TOI-700 d");

        assert_eq!(
            api.exoplanet_url(&name, "stars").unwrap().as_str(),
            "http://localhost:3333/api/v1/exoplanets/TOI-700%20d/stars"
        );
        assert_eq!(
            api.exoplanet_url(&name, "print").unwrap().as_str(),
            "http://localhost:3333/api/v1/exoplanets/TOI-700%20d/print"
        );
    }
}
