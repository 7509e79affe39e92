//! Shared helpers for wiremock-backed tests.

#![allow(dead_code)]

use wiremock::MockServer;
use zendesk_api::config::Config;
use zendesk_api::ZendeskClient;

pub const USERNAME: &str = "agent@acme.com";
pub const API_TOKEN: &str = "wJ3kq0ZlT8v2";

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> ZendeskClient {
    let config = Config::new(server.uri(), USERNAME, API_TOKEN).unwrap();
    ZendeskClient::new(&config).unwrap()
}
