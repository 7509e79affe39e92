//! Error types for the Zendesk client.
//!
//! This module defines `ZendeskError`, the unified error type returned by
//! every client operation.
//!
//! A single-entity lookup that hits a 404 is not an error: those operations
//! return `Ok(None)` so callers can tell "missing" apart from "failed".

use reqwest::StatusCode;
use thiserror::Error;

/// Base URL of the Zendesk REST API reference.
pub const HELP_DOCS_BASE: &str = "https://developer.zendesk.com/rest_api/docs/";

/// Unified error type for all client operations.
#[derive(Error, Debug)]
pub enum ZendeskError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// A client-side precondition was violated. No request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// The network call itself failed (DNS, connect, timeout, reset).
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Zendesk answered with a status the operation does not accept.
    #[error("{}", request_error_message(.status, .expected, .help_docs, .body))]
    Request {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The exact status the operation required, if it declared one.
        expected: Option<StatusCode>,
        /// The response body, kept for diagnostics.
        body: String,
        /// Link to the API documentation of the failing endpoint.
        help_docs: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request or pagination URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn request_error_message(
    status: &StatusCode,
    expected: &Option<StatusCode>,
    help_docs: &str,
    body: &str,
) -> String {
    let wanted = match expected {
        Some(code) => format!("{}", code.as_u16()),
        None => "a 2xx".to_string(),
    };
    let mut message = format!(
        "status code retrieved was {} and not {} as expected. See: {}",
        status.as_u16(),
        wanted,
        help_docs
    );
    if !body.is_empty() {
        message.push_str(&format!(" (response body: {})", body));
    }
    message
}

impl ZendeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        ZendeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ZendeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ZendeskError::Validation(message.into())
    }

    /// Creates a request error pointing at the given documentation section.
    ///
    /// `help_docs` is the section path below [`HELP_DOCS_BASE`], for example
    /// `core/tickets#show-ticket`.
    pub fn request(
        status: StatusCode,
        expected: Option<StatusCode>,
        body: impl Into<String>,
        help_docs: &str,
    ) -> Self {
        ZendeskError::Request {
            status,
            expected,
            body: body.into(),
            help_docs: format!("{}{}", HELP_DOCS_BASE, help_docs),
        }
    }

    /// Returns the HTTP status for `Request` errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZendeskError::Request { status, .. } => Some(*status),
            ZendeskError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the documentation link for `Request` errors.
    #[must_use]
    pub fn help_docs(&self) -> Option<&str> {
        match self {
            ZendeskError::Request { help_docs, .. } => Some(help_docs),
            _ => None,
        }
    }

    /// Returns true if the error was raised before anything hit the network.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, ZendeskError::Validation(_))
    }

    /// Strips the API token out of a message before it is logged or shown.
    #[must_use]
    pub fn sanitize_message(message: &str, api_token: &str) -> String {
        if api_token.is_empty() {
            return message.to_string();
        }
        message.replace(api_token, "[REDACTED]")
    }
}
