//! Helper settings read from the environment

/// Access token that bypasses the config file lookup
pub const ENV_ACCESS_TOKEN: &str = "NETLIFY_ACCESS_TOKEN";
/// OAuth client used for the browser login
pub const ENV_CLIENT_ID: &str = "NETLIFY_CLIENT_ID";
/// API base URL override
pub const ENV_API_URL: &str = "NETLIFY_API_URL";
/// Either of these enables debug logging
pub const ENV_DEBUG_TOGGLES: [&str; 2] = ["GIT_TRACE", "DEBUG"];

pub const DEFAULT_CLIENT_ID: &str =
    "5edad8f69d47ae8923d0cf0b4ab95ba1415e67492b5af26ad97f4709160bb31b";
pub const DEFAULT_API_URL: &str = "https://api.netlify.com/api/v1";

/// Settings for one helper invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperSettings {
    /// Token from `NETLIFY_ACCESS_TOKEN`, if set and non-empty
    pub access_token: Option<String>,
    pub client_id: String,
    pub api_url: String,
    pub debug: bool,
}

impl Default for HelperSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            debug: false,
        }
    }
}

impl HelperSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            access_token: get(ENV_ACCESS_TOKEN),
            client_id: get(ENV_CLIENT_ID).unwrap_or(defaults.client_id),
            api_url: get(ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            debug: ENV_DEBUG_TOGGLES.iter().any(|var| get(var).is_some()),
        }
    }
}
