//! Access token resolution for CredentialHelper

use crate::{read_token_from_paths, Result};
use netlify_config::ENV_ACCESS_TOKEN;

use super::CredentialHelper;

impl CredentialHelper {
    /// Find an access token valid for `host`.
    ///
    /// Order: the environment override, then the stored Netlify config, then
    /// a browser login. Login only happens when no token was found at all;
    /// a token that exists but fails validation is an error.
    pub async fn access_token(&self, host: &str) -> Result<String> {
        if let Some(token) = &self.settings.access_token {
            tracing::debug!("Using access token from {}", ENV_ACCESS_TOKEN);
            self.check.check(host, token).await?;
            return Ok(token.clone());
        }

        if let Some(token) = read_token_from_paths(&self.paths, host, self.check.as_ref()).await? {
            return Ok(token);
        }

        tracing::debug!("No stored Netlify access token, starting browser login");
        self.login(host).await
    }
}
