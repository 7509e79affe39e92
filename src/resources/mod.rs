//! Resource clients, one per Zendesk resource family.
//!
//! Each client borrows a [`ZendeskClient`](crate::client::ZendeskClient) and
//! exposes one method per documented endpoint.

mod deleted_tickets;
mod job_statuses;
mod search;
mod tickets;

pub use deleted_tickets::{DeletedTicketSort, DeletedTicketsResource};
pub use job_statuses::JobStatusesResource;
pub use search::SearchResource;
pub use tickets::TicketsResource;
