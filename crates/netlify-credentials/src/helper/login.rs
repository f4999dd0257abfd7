//! Browser login for CredentialHelper
//!
//! Netlify's ticket flow: create a ticket, let the user approve it in the
//! browser, poll until it is authorized, then exchange it for a token.

use crate::{CredentialError, Result};
use netlify_config::save_access_token;

use super::CredentialHelper;

/// Approval page for a login ticket; the ticket id is appended
pub const TICKET_URL: &str = "https://app.netlify.com/authorize?response_type=ticket&ticket=";

impl CredentialHelper {
    /// Obtain a new access token through the browser and store it.
    ///
    /// The token is saved before it is checked against `host`, so it stays
    /// on disk even when that check fails.
    pub async fn login(&self, host: &str) -> Result<String> {
        if !self.interactive {
            return Err(CredentialError::NonInteractive);
        }

        let ticket = self.api.create_ticket(&self.settings.client_id).await?;
        tracing::debug!("Created login ticket {}", ticket.id);

        let url = format!("{}{}", TICKET_URL, ticket.id);
        eprintln!("Opening {} to authorize access to Netlify...", url);
        self.browser
            .open(&url)
            .map_err(|e| CredentialError::BrowserLaunch {
                url: url.clone(),
                source: e,
            })?;

        let ticket = self.api.wait_until_ticket_authorized(ticket, self.poll).await?;
        tracing::debug!("Login ticket {} authorized", ticket.id);

        let token = self.api.exchange_ticket(&ticket.id).await?.access_token;
        save_access_token(self.paths.primary(), &token)?;

        self.check.check(host, &token).await?;
        Ok(token)
    }
}
