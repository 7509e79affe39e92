//! HTTP client for the Zendesk v2 API.
//!
//! `ZendeskClient` owns the base URL and a [`Transport`]. Resource clients
//! borrow it and describe each call with an [`Operation`]: which resource,
//! which endpoint, which status counts as success and where the endpoint is
//! documented. The same value feeds the structured log fields, so there is
//! no ambient logging scope.
//!
//! # Security
//!
//! The API token lives in the transport and is never logged.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::ZendeskError;
use crate::pagination::{decode_page, Page, PageRequest};
use crate::query::Query;
use crate::resources::{
    DeletedTicketsResource, JobStatusesResource, SearchResource, TicketsResource,
};
use crate::response::{translate, translate_lookup, Expected};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Describes one endpoint call for logging and status translation.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Resource family, e.g. `deleted_tickets`.
    pub resource: &'static str,
    /// Operation name, e.g. `restore_many`.
    pub name: &'static str,
    /// Documentation section below the API docs root.
    pub help_docs: &'static str,
    /// Statuses that count as success.
    pub expected: Expected,
    /// Key arguments, rendered into the log line.
    pub detail: Option<String>,
}

impl Operation {
    /// Creates an operation that accepts any 2xx status.
    pub fn new(resource: &'static str, name: &'static str, help_docs: &'static str) -> Self {
        Self {
            resource,
            name,
            help_docs,
            expected: Expected::Success,
            detail: None,
        }
    }

    /// Requires exactly this status.
    #[must_use]
    pub fn expecting(mut self, status: StatusCode) -> Self {
        self.expected = Expected::Exactly(status);
        self
    }

    /// Attaches key arguments for the log line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Client for the Zendesk v2 API.
///
/// Cloning is cheap; clones share the transport and its connection pool.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = ZendeskClient::new(&config)?;
///
/// if let Some(job) = client.job_statuses().get("8b726e606741012ffc2d782bcb7848fe").await? {
///     println!("{:?}", job.status);
/// }
/// ```
#[derive(Clone)]
pub struct ZendeskClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl ZendeskClient {
    /// Creates a client that talks to Zendesk over reqwest.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::HttpClient` if the HTTP client fails to
    /// initialize, or `ZendeskError::InvalidUrl` for a malformed base URL.
    pub fn new(config: &Config) -> Result<Self, ZendeskError> {
        let transport = ReqwestTransport::new(config)?;
        Self::with_transport(&config.base_url, Arc::new(transport))
    }

    /// Creates a client on top of any transport.
    ///
    /// The base URL may carry a path prefix (`https://proxy.example.com/zendesk`);
    /// API paths are resolved below it.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::InvalidUrl` for a malformed base URL.
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ZendeskError> {
        let mut base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if !base_url.path().ends_with('/') {
            let prefix = format!("{}/", base_url.path());
            base_url.set_path(&prefix);
        }
        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Returns the base URL of the Zendesk instance, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ticket endpoints.
    pub fn tickets(&self) -> TicketsResource<'_> {
        TicketsResource::new(self)
    }

    /// Deleted-ticket endpoints.
    pub fn deleted_tickets(&self) -> DeletedTicketsResource<'_> {
        DeletedTicketsResource::new(self)
    }

    /// Job status endpoints.
    pub fn job_statuses(&self) -> JobStatusesResource<'_> {
        JobStatusesResource::new(self)
    }

    /// Search endpoint.
    pub fn search(&self) -> SearchResource<'_> {
        SearchResource::new(self)
    }

    /// Checks that Zendesk is reachable and accepts the credentials.
    ///
    /// Lists a single job status, which any agent may do.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying call.
    pub async fn test_connection(&self) -> Result<(), ZendeskError> {
        tracing::debug!("Testing connection to Zendesk");

        self.job_statuses()
            .list(PageRequest::new().with_per_page(1))
            .await?;

        tracing::info!("Connection test successful");
        Ok(())
    }

    /// Fetches the page after `page`.
    ///
    /// Returns `Ok(None)` without touching the network when `page` is the
    /// last one.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` if the continuation URL points at a
    /// different host than the configured instance, plus any error of the
    /// call itself.
    pub async fn next_page<T>(
        &self,
        page: &Page<T>,
        op: Operation,
    ) -> Result<Option<Page<T>>, ZendeskError>
    where
        T: DeserializeOwned,
    {
        let Some(next) = page.next_url() else {
            return Ok(None);
        };

        let url = self.continuation_url(next)?;
        let response = self.execute(&op, Method::GET, url, None).await?;
        let response = translate(response, op.expected, op.help_docs)?;

        decode_page(&response.body, page.key()).map(Some)
    }

    /// Validates that a server-supplied URL stays on the configured host.
    ///
    /// An `http` base URL may be upgraded to `https` on the default port;
    /// downgrades are rejected.
    fn continuation_url(&self, raw: &str) -> Result<Url, ZendeskError> {
        let url = Url::parse(raw)?;
        let same_origin = url.scheme() == self.base_url.scheme()
            && url.port_or_known_default() == self.base_url.port_or_known_default();
        let upgraded = self.base_url.scheme() == "http"
            && url.scheme() == "https"
            && url.port_or_known_default() == Some(443);

        if url.host() != self.base_url.host() || !(same_origin || upgraded) {
            tracing::warn!(next_page = %raw, "Rejected pagination link for a foreign host");
            return Err(ZendeskError::validation(format!(
                "pagination link host mismatch: expected {:?}, got {:?}",
                self.base_url.host_str(),
                url.host_str()
            )));
        }
        Ok(url)
    }

    /// Resolves an API path and query against the base URL.
    pub(crate) fn url(&self, path: &str, query: &Query) -> Result<Url, ZendeskError> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.set_query(Some(&query.build()));
        }
        Ok(url)
    }

    /// Sends one request. Status codes are not interpreted here.
    pub(crate) async fn execute(
        &self,
        op: &Operation,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ZendeskError> {
        tracing::debug!(
            resource = op.resource,
            operation = op.name,
            detail = op.detail.as_deref().unwrap_or(""),
            method = %method,
            path = %url.path(),
            "Making Zendesk API request"
        );

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers: HeaderMap::new(),
                body,
            })
            .await
            .inspect_err(|e| {
                tracing::debug!(
                    resource = op.resource,
                    operation = op.name,
                    error = %e,
                    "Zendesk API request failed"
                );
            })?;

        tracing::trace!(status = %response.status, body = %response.body, "Zendesk API response");

        Ok(response)
    }

    /// Sends a request and checks its status.
    pub(crate) async fn send(
        &self,
        op: &Operation,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ZendeskError> {
        let url = self.url(path, query)?;
        let response = self.execute(op, method, url, body).await?;
        translate(response, op.expected, op.help_docs)
    }

    /// GETs a single entity wrapped in an envelope, mapping 404 to `None`.
    pub(crate) async fn lookup<W>(
        &self,
        op: &Operation,
        path: &str,
    ) -> Result<Option<W>, ZendeskError>
    where
        W: DeserializeOwned,
    {
        let url = self.url(path, &Query::new())?;
        let response = self.execute(op, Method::GET, url, None).await?;

        match translate_lookup(response, op.expected, op.help_docs)? {
            Some(response) => Ok(Some(serde_json::from_str(&response.body)?)),
            None => {
                tracing::info!(
                    resource = op.resource,
                    detail = op.detail.as_deref().unwrap_or(""),
                    "Zendesk entity not found"
                );
                Ok(None)
            }
        }
    }

    /// GETs one page of a listing whose items live under `key`.
    pub(crate) async fn list<T>(
        &self,
        op: &Operation,
        path: &str,
        query: &Query,
        key: &'static str,
    ) -> Result<Page<T>, ZendeskError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(op, Method::GET, path, query, None).await?;
        decode_page(&response.body, key)
    }

    /// Sends a request and decodes the body as `W`.
    pub(crate) async fn call<W>(
        &self,
        op: &Operation,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
    ) -> Result<W, ZendeskError>
    where
        W: DeserializeOwned,
    {
        let response = self.send(op, method, path, query, body).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Validates that an ID is safe to interpolate into a URL path.
    ///
    /// Job status IDs are hex strings; anything outside `[A-Za-z0-9_-]` is
    /// rejected so a crafted ID cannot reach another endpoint.
    pub(crate) fn validate_id(id: &str, field_name: &str) -> Result<(), ZendeskError> {
        if id.is_empty()
            || !id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ZendeskError::validation(format!(
                "{} must be a non-empty alphanumeric string, got: {:?}",
                field_name,
                id.chars().take(50).collect::<String>()
            )));
        }
        Ok(())
    }
}
