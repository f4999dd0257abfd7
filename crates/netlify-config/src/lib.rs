//! Configuration handling for the Netlify credential helper
//!
//! This crate handles:
//! - Locating the Netlify CLI config file across its historical locations
//! - Decoding the stored token schemas (flat token, per-user tokens)
//! - Persisting a freshly obtained access token
//! - Helper settings read from the environment

mod error;
mod paths;
mod settings;
mod stored;

pub use error::*;
pub use paths::*;
pub use settings::*;
pub use stored::*;
