mod api;
mod assets;

use std::fmt::Display;

use url::Url;

pub use crate::{
    api::ApiClient,
    assets::AssetClient,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid url")]
    Url(#[from] url::ParseError),

    #[error("url can't be used as a base: {0}")]
    NotABase(Url),
}

pub(crate) trait UrlExt: Sized {
    fn joined(self, segment: impl Display) -> Result<Self, Error>;
}

impl UrlExt for Url {
    fn joined(mut self, segment: impl Display) -> Result<Self, Error> {
        if self.cannot_be_a_base() {
            return Err(Error::NotABase(self));
        }
        if let Ok(mut segments) = self.path_segments_mut() {
            segments.pop_if_empty().push(&segment.to_string());
        }
        Ok(self)
    }
}
