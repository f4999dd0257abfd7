//! Wire types for the Netlify API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Capability flag a site needs for Large Media transfers
pub const LARGE_MEDIA_CAPABILITY: &str = "large_media_enabled";

/// The parts of a Netlify site the helper cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub capabilities: Option<Map<String, Value>>,
}

impl Site {
    pub fn has_capabilities(&self) -> bool {
        self.capabilities.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// True only when the capability is present and set to boolean `true`
    pub fn capability_enabled(&self, name: &str) -> bool {
        self.capabilities
            .as_ref()
            .and_then(|c| c.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// A pending browser authorization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
    pub id: String,
    pub client_id: Option<String>,
    pub authorized: bool,
    pub created_at: Option<String>,
}

/// Result of exchanging an authorized ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    pub id: Option<String>,
    pub access_token: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub created_at: Option<String>,
}

/// How long and how often to poll a ticket while waiting for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(5 * 60),
        }
    }
}
