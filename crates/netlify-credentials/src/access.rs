//! Access token validation
//!
//! A token is valid for a host when the Netlify API returns the site served
//! at that host and the site has Large Media enabled.

use crate::{CredentialError, Result};
use async_trait::async_trait;
use netlify_api::{NetlifyApi, LARGE_MEDIA_CAPABILITY};
use std::sync::Arc;

/// Decides whether `token` grants access to `host`
#[async_trait]
pub trait HostAccessCheck: Send + Sync {
    async fn check(&self, host: &str, token: &str) -> Result<()>;
}

/// Validates tokens with a site lookup against the Netlify API
pub struct ApiAccessCheck {
    api: Arc<dyn NetlifyApi>,
}

impl ApiAccessCheck {
    pub fn new(api: Arc<dyn NetlifyApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HostAccessCheck for ApiAccessCheck {
    async fn check(&self, host: &str, token: &str) -> Result<()> {
        let site = match self.api.get_site(host, token).await {
            Ok(site) => site,
            Err(e) if e.is_not_found() => {
                return Err(CredentialError::UnknownSite(host.to_string()))
            }
            Err(e) if e.is_unauthorized() => {
                return Err(CredentialError::Unauthorized(host.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        if !site.has_capabilities() {
            return Err(CredentialError::UnknownSite(host.to_string()));
        }

        if !site.capability_enabled(LARGE_MEDIA_CAPABILITY) {
            return Err(CredentialError::LargeMediaDisabled);
        }

        Ok(())
    }
}
