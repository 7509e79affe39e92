//! Configuration management for the Zendesk client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ZendeskError;

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to a Zendesk instance.
///
/// The API token is stored but never logged: the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the Zendesk instance (e.g., `https://acme.zendesk.com`).
    pub base_url: String,

    /// Email address of the agent the token belongs to.
    pub username: String,

    /// API token for authentication.
    /// This value must never be logged or included in error messages.
    api_token: String,

    /// Transport timeout applied to every HTTP call.
    pub timeout: Duration,
}

impl Config {
    /// Builds a configuration in code, applying the same validation as
    /// [`Config::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Config` if the URL or token is invalid.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ZendeskError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        let api_token = api_token.into();
        Self::validate_api_token(&api_token)?;

        Ok(Config {
            base_url,
            username: username.into(),
            api_token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `ZENDESK_URL`: The base URL of the Zendesk instance
    /// - `ZENDESK_USERNAME`: The agent email the token belongs to
    /// - `ZENDESK_API_TOKEN`: The API token
    ///
    /// # Optional Environment Variables
    ///
    /// - `ZENDESK_TIMEOUT_SECS`: Transport timeout (default: 30)
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, ZendeskError> {
        let base_url = Self::get_required_env("ZENDESK_URL")?;
        let username = Self::get_required_env("ZENDESK_USERNAME")?;
        let api_token = Self::get_required_env("ZENDESK_API_TOKEN")?;

        let config = Self::new(base_url, username, api_token)?;

        match env::var("ZENDESK_TIMEOUT_SECS") {
            Ok(raw) => config.with_timeout(Self::parse_timeout(&raw)?),
            Err(_) => Ok(config),
        }
    }

    /// Overrides the transport timeout.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Config` for a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ZendeskError> {
        if timeout.is_zero() {
            return Err(ZendeskError::invalid_config("timeout must be greater than zero"));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Returns the API token. Only the transport should call this.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, ZendeskError> {
        env::var(name)
            .map_err(|_| ZendeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(ZendeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, ZendeskError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ZendeskError::invalid_config(
                "ZENDESK_URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&url)
            .map_err(|e| ZendeskError::invalid_config(format!("ZENDESK_URL is invalid: {}", e)))?;

        Ok(url)
    }

    /// Validates the API token is not empty or a placeholder value.
    fn validate_api_token(token: &str) -> Result<(), ZendeskError> {
        if token.trim().is_empty() {
            return Err(ZendeskError::missing_env("ZENDESK_API_TOKEN"));
        }

        let token_lower = token.to_lowercase();
        let placeholder_patterns = ["your_api_token", "your_token", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if token_lower.contains(pattern) {
                return Err(ZendeskError::invalid_config(
                    "ZENDESK_API_TOKEN appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }

    fn parse_timeout(raw: &str) -> Result<Duration, ZendeskError> {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ZendeskError::invalid_config(format!(
                    "ZENDESK_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Note: these tests go through `Config::new` and never modify process env.

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = Config::validate_base_url("https://acme.zendesk.com/".to_string()).unwrap();
        assert_eq!(result, "https://acme.zendesk.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        assert!(Config::validate_base_url("acme.zendesk.com".to_string()).is_err());
    }

    #[test]
    fn test_validate_api_token_rejects_placeholder() {
        assert!(Config::validate_api_token("your_api_token_here").is_err());
        assert!(Config::validate_api_token("   ").is_err());
    }

    #[test]
    fn test_validate_api_token_accepts_real_token() {
        assert!(Config::validate_api_token("wJ3kq0ZlT8v2").is_ok());
    }

    #[test]
    fn test_new_applies_default_timeout() {
        let config =
            Config::new("https://acme.zendesk.com", "agent@acme.com", "wJ3kq0ZlT8v2").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.api_token(), "wJ3kq0ZlT8v2");
    }

    #[test]
    fn test_with_timeout_rejects_zero() {
        let config =
            Config::new("https://acme.zendesk.com", "agent@acme.com", "wJ3kq0ZlT8v2").unwrap();
        assert!(config.with_timeout(Duration::ZERO).is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(Config::parse_timeout(" 45 ").unwrap(), Duration::from_secs(45));
        assert!(Config::parse_timeout("soon").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config =
            Config::new("https://acme.zendesk.com", "agent@acme.com", "wJ3kq0ZlT8v2").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("wJ3kq0ZlT8v2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
