//! # zendesk-api
//!
//! A typed client for the Zendesk v2 REST API.
//!
//! Each resource client maps one-to-one onto Zendesk endpoints: it builds
//! the path and query string, sends the request, checks the status against
//! what the endpoint promises and decodes the JSON body into typed models.
//!
//! ## Features
//!
//! - **Tickets**: list, show, show many, create, update, delete, bulk delete
//! - **Deleted tickets**: list, restore, bulk restore, purge, bulk purge
//! - **Job statuses**: list, show, show many
//! - **Search**: Zendesk search syntax with typed, mixed results
//! - **Pagination**: one round trip per page, never eager
//! - **Errors**: every failure carries the status and a link to the API docs
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - The `ZendeskError` type
//! - [`formatter`] - CSV rendering and bulk-size checks for id lists
//! - [`query`] - Query string and search expression builders
//! - [`response`] - Status code translation
//! - [`pagination`] - List envelopes and paging parameters
//! - [`transport`] - The HTTP seam and its reqwest implementation
//! - [`client`] - `ZendeskClient`, the shared request pipeline
//! - [`resources`] - One client per Zendesk resource
//! - [`models`] - Request and response data types
//!
//! ## Example
//!
//! ```ignore
//! use zendesk_api::config::Config;
//! use zendesk_api::client::ZendeskClient;
//!
//! async fn example() -> Result<(), zendesk_api::error::ZendeskError> {
//!     let config = Config::from_env()?;
//!     let client = ZendeskClient::new(&config)?;
//!
//!     // Permanently delete two tickets, then check on the job.
//!     let job = client.deleted_tickets().purge_many(&[581, 582]).await?;
//!     match client.job_statuses().get(&job.id).await? {
//!         Some(job) => println!("{}: {:?}", job.id, job.status),
//!         None => println!("job expired"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! - `ZENDESK_URL`: Base URL of your Zendesk instance
//! - `ZENDESK_USERNAME`: Agent email the API token belongs to
//! - `ZENDESK_API_TOKEN`: API token
//!
//! Optional:
//! - `ZENDESK_TIMEOUT_SECS`: Transport timeout in seconds (default: 30)
//! - `RUST_LOG`: Log level for the `zd` binary (e.g., `zendesk_api=debug`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod response;
pub mod transport;

pub use client::ZendeskClient;
pub use error::ZendeskError;
