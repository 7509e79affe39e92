//! Tickets: the core Zendesk resource.

use reqwest::Method;

use crate::client::{Operation, ZendeskClient};
use crate::error::ZendeskError;
use crate::formatter::to_csv;
use crate::models::{
    JobStatus, JobStatusResponse, Ticket, TicketCreate, TicketResponse, TicketUpdate,
};
use crate::pagination::{Page, PageRequest};
use crate::query::Query;

const RESOURCE: &str = "tickets";
const BASE_PATH: &str = "/api/v2/tickets";
const LIST_KEY: &str = "tickets";

/// Client for `/api/v2/tickets`.
pub struct TicketsResource<'a> {
    client: &'a ZendeskClient,
}

impl<'a> TicketsResource<'a> {
    pub(crate) fn new(client: &'a ZendeskClient) -> Self {
        Self { client }
    }

    fn list_op() -> Operation {
        Operation::new(RESOURCE, "list", "core/tickets#list-tickets")
    }

    /// Lists tickets.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn list(&self, pager: PageRequest) -> Result<Page<Ticket>, ZendeskError> {
        let query = pager.apply(Query::new());
        let path = format!("{}.json", BASE_PATH);

        self.client
            .list(&Self::list_op(), &path, &query, LIST_KEY)
            .await
    }

    /// Fetches the page after `page`, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// See [`ZendeskClient::next_page`].
    pub async fn next(&self, page: &Page<Ticket>) -> Result<Option<Page<Ticket>>, ZendeskError> {
        self.client.next_page(page, Self::list_op()).await
    }

    /// Shows one ticket, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for any non-2xx status other than 404.
    pub async fn get(&self, ticket_id: u64) -> Result<Option<Ticket>, ZendeskError> {
        let op = Operation::new(RESOURCE, "get", "core/tickets#show-ticket")
            .with_detail(ticket_id.to_string());
        let path = format!("{}/{}.json", BASE_PATH, ticket_id);

        let response: Option<TicketResponse<Ticket>> = self.client.lookup(&op, &path).await?;
        Ok(response.map(|r| r.ticket))
    }

    /// Shows up to 100 tickets in one call.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty or oversized id list
    /// (no request is sent), and `ZendeskError::Request` for a non-2xx status.
    pub async fn get_many(&self, ticket_ids: &[u64]) -> Result<Page<Ticket>, ZendeskError> {
        let ids = to_csv(ticket_ids)?;
        let op = Operation::new(RESOURCE, "get_many", "core/tickets#show-multiple-tickets")
            .with_detail(ids.clone());
        let path = format!("{}/show_many.json", BASE_PATH);

        self.client
            .list(&op, &path, &Query::new().with_list("ids", ids), LIST_KEY)
            .await
    }

    /// Creates a ticket.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn create(&self, ticket: &TicketCreate) -> Result<Ticket, ZendeskError> {
        let op = Operation::new(RESOURCE, "create", "core/tickets#create-ticket");
        let body = serde_json::to_value(TicketResponse { ticket })?;
        let path = format!("{}.json", BASE_PATH);

        let response: TicketResponse<Ticket> = self
            .client
            .call(&op, Method::POST, &path, &Query::new(), Some(body))
            .await?;
        Ok(response.ticket)
    }

    /// Updates a ticket. Only fields set on `update` are sent.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn update(
        &self,
        ticket_id: u64,
        update: &TicketUpdate,
    ) -> Result<Ticket, ZendeskError> {
        let op = Operation::new(RESOURCE, "update", "core/tickets#update-ticket")
            .with_detail(ticket_id.to_string());
        let body = serde_json::to_value(TicketResponse { ticket: update })?;
        let path = format!("{}/{}.json", BASE_PATH, ticket_id);

        let response: TicketResponse<Ticket> = self
            .client
            .call(&op, Method::PUT, &path, &Query::new(), Some(body))
            .await?;
        Ok(response.ticket)
    }

    /// Soft-deletes a ticket. It stays restorable through the deleted
    /// tickets endpoints.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn delete(&self, ticket_id: u64) -> Result<(), ZendeskError> {
        let op = Operation::new(RESOURCE, "delete", "core/tickets#delete-ticket")
            .with_detail(ticket_id.to_string());
        let path = format!("{}/{}.json", BASE_PATH, ticket_id);

        self.client
            .send(&op, Method::DELETE, &path, &Query::new(), None)
            .await?;
        Ok(())
    }

    /// Soft-deletes up to 100 tickets as a background job.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty or oversized id list
    /// (no request is sent), and `ZendeskError::Request` for a non-2xx status.
    pub async fn delete_many(&self, ticket_ids: &[u64]) -> Result<JobStatus, ZendeskError> {
        let ids = to_csv(ticket_ids)?;
        let op = Operation::new(RESOURCE, "delete_many", "core/tickets#bulk-delete-tickets")
            .with_detail(ids.clone());
        let path = format!("{}/destroy_many.json", BASE_PATH);

        let response: JobStatusResponse = self
            .client
            .call(&op, Method::DELETE, &path, &Query::new().with_list("ids", ids), None)
            .await?;
        Ok(response.job_status)
    }
}
