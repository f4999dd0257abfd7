//! Credential helper - answers git's credential requests for Netlify hosts

mod login;
mod resolve;

pub use login::TICKET_URL;

use crate::protocol::{
    is_netlify_host, CredentialRequest, ACCESS_TOKEN_USER, HOST_KEY, PASSWORD_KEY, USERNAME_KEY,
};
use crate::{
    ApiAccessCheck, BrowserLauncher, CredentialError, HostAccessCheck, Result, SystemBrowser,
};
use netlify_api::{NetlifyApi, NetlifyClient, PollPolicy};
use netlify_config::{AuthPaths, HelperSettings};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves Netlify access tokens and speaks the git credential protocol
pub struct CredentialHelper {
    settings: HelperSettings,
    paths: AuthPaths,
    api: Arc<dyn NetlifyApi>,
    /// Token validation, normally a site lookup through `api`
    check: Arc<dyn HostAccessCheck>,
    browser: Arc<dyn BrowserLauncher>,
    poll: PollPolicy,
    /// Whether a user is around to complete a browser login
    interactive: bool,
}

impl CredentialHelper {
    /// Create a helper talking to the Netlify API configured in `settings`
    pub fn new(settings: HelperSettings, paths: AuthPaths) -> Self {
        let api: Arc<dyn NetlifyApi> = Arc::new(NetlifyClient::new(settings.api_url.clone()));
        Self::with_api(settings, paths, api)
    }

    /// Create a helper on top of an arbitrary API implementation
    pub fn with_api(settings: HelperSettings, paths: AuthPaths, api: Arc<dyn NetlifyApi>) -> Self {
        let check: Arc<dyn HostAccessCheck> = Arc::new(ApiAccessCheck::new(api.clone()));
        Self {
            settings,
            paths,
            api,
            check,
            browser: Arc::new(SystemBrowser),
            poll: PollPolicy::default(),
            // stdin carries the protocol, so the prompt goes to stderr
            interactive: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_access_check(mut self, check: Arc<dyn HostAccessCheck>) -> Self {
        self.check = check;
        self
    }

    pub fn with_browser(mut self, browser: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn settings(&self) -> &HelperSettings {
        &self.settings
    }

    /// Answer a `get` request: read attributes from `input`, and for Netlify
    /// hosts write them back to `output` with the access token filled in.
    ///
    /// Other hosts produce no output at all.
    pub async fn get<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<()> {
        let mut request = CredentialRequest::read_from(input)?;
        tracing::debug!("Git input received: {}", request.redacted());

        let host = request
            .get(HOST_KEY)
            .ok_or_else(|| CredentialError::MissingHost(request.redacted().to_string()))?
            .to_string();

        if !is_netlify_host(&host) {
            tracing::debug!("Ignoring non-Netlify host {}", host);
            return Ok(());
        }

        let token = self.access_token(&host).await?;
        request.set(USERNAME_KEY, ACCESS_TOKEN_USER);
        request.set(PASSWORD_KEY, &token);

        tracing::debug!("Writing output data: {}", request.redacted());
        request.write_to(output)?;
        Ok(())
    }

    /// Delete every config file the helper knows about.
    ///
    /// Best effort: failures are logged and skipped. Returns the paths that
    /// were removed.
    pub fn erase(&self) -> Vec<PathBuf> {
        let mut removed = Vec::new();
        for path in self.paths.iter() {
            // Some legacy locations are directories in newer layouts
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!("Removed Netlify config {:?}", path);
                    removed.push(path.to_path_buf());
                }
                Err(e) => {
                    tracing::debug!("Failed to remove Netlify config {:?}: {}", path, e);
                }
            }
        }
        removed
    }
}
