//! Data models for the Zendesk v2 API.
//!
//! This module contains type definitions for tickets, deleted tickets,
//! job statuses and search results, plus the single-entity response
//! wrappers Zendesk puts around them.

mod job_status;
mod search;
mod ticket;

pub use job_status::*;
pub use search::*;
pub use ticket::*;
