use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use crate::Error;

/// Fetches the static files bundled with the front end.
#[derive(Clone, Debug)]
pub struct AssetClient {
    client: reqwest::Client,
    asset_url: Arc<Url>,
}

impl AssetClient {
    pub fn new(asset_url: Url) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            asset_url: Arc::new(asset_url),
        }
    }

    pub fn asset_url(&self) -> &Url {
        &self.asset_url
    }

    /// Resolves `path` relative to the asset root. The root should end with
    /// a `/`, otherwise its last segment is replaced.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.asset_url.join(path)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        tracing::debug!(%url, "fetching asset");

        let value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(value)
    }
}
