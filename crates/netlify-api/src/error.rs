//! Error types for Netlify API calls

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid Netlify API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("Netlify API returned {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Failed to decode Netlify API response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("Timed out waiting for login ticket {0} to be authorized")]
    AuthorizationTimeout(String),
}

impl ApiError {
    /// HTTP status of an unsuccessful response, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
