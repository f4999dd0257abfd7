//! Netlify API access for the credential helper
//!
//! Only the handful of operations the helper needs: looking up a site by
//! host with a bearer token, and the ticket-based OAuth exchange used by the
//! browser login.

mod client;
mod error;
mod types;

pub use client::NetlifyClient;
pub use error::*;
pub use types::*;

use async_trait::async_trait;

/// Operations the helper performs against the Netlify API
#[async_trait]
pub trait NetlifyApi: Send + Sync {
    /// Look up the site served at `host`, authenticating with `token`
    async fn get_site(&self, host: &str, token: &str) -> Result<Site>;

    /// Create a login ticket for the OAuth client `client_id`
    async fn create_ticket(&self, client_id: &str) -> Result<Ticket>;

    /// Fetch the current state of a ticket
    async fn show_ticket(&self, ticket_id: &str) -> Result<Ticket>;

    /// Exchange an authorized ticket for an access token
    async fn exchange_ticket(&self, ticket_id: &str) -> Result<AccessToken>;

    /// Poll `ticket` until the user has authorized it in the browser.
    ///
    /// Returns immediately if the ticket is already authorized.
    async fn wait_until_ticket_authorized(
        &self,
        ticket: Ticket,
        policy: PollPolicy,
    ) -> Result<Ticket> {
        if ticket.authorized {
            return Ok(ticket);
        }

        let ticket_id = ticket.id;
        let poll = async {
            loop {
                tokio::time::sleep(policy.interval).await;
                let current = self.show_ticket(&ticket_id).await?;
                if current.authorized {
                    return Ok::<_, ApiError>(current);
                }
                tracing::debug!("Ticket {} not authorized yet", ticket_id);
            }
        };

        match tokio::time::timeout(policy.timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::AuthorizationTimeout(ticket_id.clone())),
        }
    }
}
