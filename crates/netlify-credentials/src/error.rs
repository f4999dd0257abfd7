//! Error types for netlify-credentials

use netlify_api::ApiError;
use netlify_config::{ConfigError, ENV_ACCESS_TOKEN};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Missing host to check credentials: {0}")]
    MissingHost(String),

    #[error("Unknown Netlify site: `{0}`")]
    UnknownSite(String),

    #[error("Access token is not authorized for `{0}`")]
    Unauthorized(String),

    #[error("Netlify Large Media is not enabled for this site")]
    LargeMediaDisabled,

    #[error(
        "No Netlify access token found and no terminal available for the browser login; \
         log in with the Netlify CLI or set {}",
        ENV_ACCESS_TOKEN
    )]
    NonInteractive,

    #[error("Failed to open {url} in a browser: {source}")]
    BrowserLaunch {
        url: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode Netlify config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CredentialError>;
