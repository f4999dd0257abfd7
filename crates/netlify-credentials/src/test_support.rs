//! Test support utilities for netlify-credentials
//!
//! Provides a scripted `MockApi`, a fixed-answer `FakeAccessCheck` and a
//! `RecordingBrowser` so the credential chain can be exercised without
//! network access or a real browser.

use crate::{CredentialError, HostAccessCheck};
use async_trait::async_trait;
use netlify_api::{
    AccessToken, ApiError, NetlifyApi, PollPolicy, Result, Site, Ticket, LARGE_MEDIA_CAPABILITY,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    GetSite { host: String, token: String },
    CreateTicket { client_id: String },
    ShowTicket { id: String },
    ExchangeTicket { id: String },
}

#[derive(Debug, Clone)]
struct ScriptedLogin {
    ticket_id: String,
    authorized_at_creation: bool,
    /// `show_ticket` answers "not authorized" this many times first
    pending_polls: usize,
    access_token: String,
}

/// Configurable mock Netlify API
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<MockCall>>,
    /// Sites keyed by (host, token)
    sites: Mutex<HashMap<(String, String), Site>>,
    /// Status errors returned for a host regardless of token
    site_errors: Mutex<HashMap<String, (u16, String)>>,
    login: Mutex<Option<ScriptedLogin>>,
    polls: Mutex<usize>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A site with Large Media enabled
    pub fn large_media_site() -> Site {
        let mut capabilities = serde_json::Map::new();
        capabilities.insert(
            LARGE_MEDIA_CAPABILITY.to_string(),
            serde_json::Value::Bool(true),
        );
        Site {
            id: Some("site-id".to_string()),
            name: Some("site".to_string()),
            url: None,
            capabilities: Some(capabilities),
        }
    }

    /// Serve `site` for `host` when called with `token`. Other tokens for a
    /// known host get a 401, unknown hosts a 404.
    pub fn with_site(self, host: &str, token: &str, site: Site) -> Self {
        self.sites
            .lock()
            .unwrap()
            .insert((host.to_string(), token.to_string()), site);
        self
    }

    pub fn with_large_media_site(self, host: &str, token: &str) -> Self {
        self.with_site(host, token, Self::large_media_site())
    }

    pub fn with_site_error(self, host: &str, status: u16, message: &str) -> Self {
        self.site_errors
            .lock()
            .unwrap()
            .insert(host.to_string(), (status, message.to_string()));
        self
    }

    /// Script a login whose ticket becomes authorized after `pending_polls`
    /// unauthorized answers and exchanges for `access_token`
    pub fn with_login(self, ticket_id: &str, pending_polls: usize, access_token: &str) -> Self {
        *self.login.lock().unwrap() = Some(ScriptedLogin {
            ticket_id: ticket_id.to_string(),
            authorized_at_creation: false,
            pending_polls,
            access_token: access_token.to_string(),
        });
        self
    }

    /// Script a login whose ticket is already authorized when created
    pub fn with_authorized_login(self, ticket_id: &str, access_token: &str) -> Self {
        *self.login.lock().unwrap() = Some(ScriptedLogin {
            ticket_id: ticket_id.to_string(),
            authorized_at_creation: true,
            pending_polls: 0,
            access_token: access_token.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_login(&self, path: &str) -> Result<ScriptedLogin> {
        self.login
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| status_error(path, 422, "no login scripted"))
    }
}

fn status_error(path: &str, status: u16, message: &str) -> ApiError {
    ApiError::Status {
        url: format!("mock://{}", path),
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl NetlifyApi for MockApi {
    async fn get_site(&self, host: &str, token: &str) -> Result<Site> {
        self.record(MockCall::GetSite {
            host: host.to_string(),
            token: token.to_string(),
        });
        let path = format!("sites/{}", host);

        if let Some((status, message)) = self.site_errors.lock().unwrap().get(host) {
            return Err(status_error(&path, *status, message));
        }

        let sites = self.sites.lock().unwrap();
        if let Some(site) = sites.get(&(host.to_string(), token.to_string())) {
            return Ok(site.clone());
        }
        if sites.keys().any(|(h, _)| h == host) {
            Err(status_error(&path, 401, "Access Denied"))
        } else {
            Err(status_error(&path, 404, "Not Found"))
        }
    }

    async fn create_ticket(&self, client_id: &str) -> Result<Ticket> {
        self.record(MockCall::CreateTicket {
            client_id: client_id.to_string(),
        });
        let login = self.scripted_login("oauth/tickets")?;
        Ok(Ticket {
            id: login.ticket_id,
            client_id: Some(client_id.to_string()),
            authorized: login.authorized_at_creation,
            created_at: None,
        })
    }

    async fn show_ticket(&self, ticket_id: &str) -> Result<Ticket> {
        self.record(MockCall::ShowTicket {
            id: ticket_id.to_string(),
        });
        let login = self.scripted_login(&format!("oauth/tickets/{}", ticket_id))?;
        let mut polls = self.polls.lock().unwrap();
        *polls += 1;
        Ok(Ticket {
            id: login.ticket_id,
            authorized: *polls > login.pending_polls,
            ..Default::default()
        })
    }

    async fn exchange_ticket(&self, ticket_id: &str) -> Result<AccessToken> {
        self.record(MockCall::ExchangeTicket {
            id: ticket_id.to_string(),
        });
        let login = self.scripted_login(&format!("oauth/tickets/{}/exchange", ticket_id))?;
        Ok(AccessToken {
            access_token: login.access_token,
            ..Default::default()
        })
    }
}

/// Accepts exactly one host/token pair and rejects everything else
pub struct FakeAccessCheck {
    host: String,
    token: String,
    checked: Mutex<Vec<String>>,
}

impl FakeAccessCheck {
    pub fn new(host: &str, token: &str) -> Self {
        Self {
            host: host.to_string(),
            token: token.to_string(),
            checked: Mutex::new(Vec::new()),
        }
    }

    /// Tokens checked so far, in order
    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostAccessCheck for FakeAccessCheck {
    async fn check(&self, host: &str, token: &str) -> crate::Result<()> {
        self.checked.lock().unwrap().push(token.to_string());
        if host == self.host && token == self.token {
            Ok(())
        } else {
            Err(CredentialError::Unauthorized(host.to_string()))
        }
    }
}

/// Records URLs instead of opening them
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    /// A browser that cannot be launched
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl crate::BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no browser available",
            ));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Poll policy short enough for tests
pub fn fast_poll() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(1),
        timeout: Duration::from_secs(5),
    }
}
