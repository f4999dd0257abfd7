//! reqwest-backed Netlify API client

use crate::{AccessToken, ApiError, NetlifyApi, Result, Site, Ticket};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const HELPER_USER_AGENT: &str = "git-credential-netlify";

/// Error body returned by the Netlify API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<u16>,
    message: Option<String>,
}

/// Netlify API client over HTTPS
#[derive(Debug, Clone)]
pub struct NetlifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetlifyClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `https://api.netlify.com/api/v1`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = |reason: &str| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, url: &Url, request: RequestBuilder) -> Result<T> {
        tracing::debug!("Netlify API request: {}", url);

        let response = request
            .header(USER_AGENT, HELPER_USER_AGENT)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Best human-readable message for a failed response
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
        ..
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        if !message.is_empty() {
            return message;
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[async_trait]
impl NetlifyApi for NetlifyClient {
    async fn get_site(&self, host: &str, token: &str) -> Result<Site> {
        let url = self.endpoint(&["sites", host])?;
        let request = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token));
        self.send(&url, request).await
    }

    async fn create_ticket(&self, client_id: &str) -> Result<Ticket> {
        let url = self.endpoint(&["oauth", "tickets"])?;
        let request = self
            .http
            .post(url.clone())
            .query(&[("client_id", client_id)]);
        self.send(&url, request).await
    }

    async fn show_ticket(&self, ticket_id: &str) -> Result<Ticket> {
        let url = self.endpoint(&["oauth", "tickets", ticket_id])?;
        let request = self.http.get(url.clone());
        self.send(&url, request).await
    }

    async fn exchange_ticket(&self, ticket_id: &str) -> Result<AccessToken> {
        let url = self.endpoint(&["oauth", "tickets", ticket_id, "exchange"])?;
        let request = self.http.post(url.clone());
        self.send(&url, request).await
    }
}
