//! HTTP transport for the Zendesk client.
//!
//! The client describes each call as an [`HttpRequest`] and hands it to a
//! [`Transport`]. [`ReqwestTransport`] is the production implementation; it
//! owns authentication, TLS, pooling and the request timeout. Transport
//! failures come back as `ZendeskError::Transport` untouched: nothing here
//! retries.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::config::Config;
use crate::error::ZendeskError;

/// User-Agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!("zendesk-api-rust/", env!("CARGO_PKG_VERSION"));

/// An outgoing request, fully resolved.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Extra headers for this request only. They replace transport
    /// defaults of the same name.
    pub headers: HeaderMap,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

/// A completed response with its body read into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Builds a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends one HTTP request and returns the complete response.
///
/// Implementations must return `Ok` for every status code the server sends;
/// only failures to complete the exchange are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ZendeskError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// `{email}/token` Basic-auth user name.
    username: String,

    /// SECURITY: Never log this value!
    api_token: String,
}

impl ReqwestTransport {
    /// Creates a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, ZendeskError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(ZendeskError::HttpClient)?;

        Ok(Self {
            http,
            username: format!("{}/token", config.username),
            api_token: config.api_token().to_string(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ZendeskError> {
        let mut req = self
            .http
            .request(request.method, request.url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header(ACCEPT, "application/json")
            .headers(request.headers);

        if let Some(body) = request.body {
            req = req.json(&body);
        }

        // The response is consumed by `text()`; on any early return it is
        // dropped and its connection goes back to the pool.
        let response = req.send().await.map_err(ZendeskError::Transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(ZendeskError::Transport)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transport_uses_token_username() {
        let config =
            Config::new("https://acme.zendesk.com", "agent@acme.com", "wJ3kq0ZlT8v2").unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.username, "agent@acme.com/token");
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("zendesk-api-rust/"));
    }

    #[test]
    fn test_http_response_new_has_no_headers() {
        let response = HttpResponse::new(StatusCode::OK, "{}");
        assert!(response.headers.is_empty());
        assert_eq!(response.body, "{}");
    }
}
