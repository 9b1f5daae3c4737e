#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("client error")]
    Client(#[from] exosky_client::Error),

    #[error("invalid url")]
    Url(#[from] url::ParseError),

    #[error("invalid config")]
    Config(#[from] serde_json::Error),

    #[error("unknown route: {0}")]
    UnknownRoute(String),
}
