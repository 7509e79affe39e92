//! Deleted tickets: listing, restoring and permanent deletion.
//!
//! Restore and purge endpoints succeed with exactly HTTP 200; any other
//! status, including other 2xx codes, is reported as a failure.

use reqwest::{Method, StatusCode};

use crate::client::{Operation, ZendeskClient};
use crate::error::ZendeskError;
use crate::formatter::to_csv;
use crate::models::{DeletedTicket, JobStatus, JobStatusResponse};
use crate::pagination::{Page, PageRequest};
use crate::query::{Query, SortOrder};

const RESOURCE: &str = "deleted_tickets";
const BASE_PATH: &str = "/api/v2/deleted_tickets";
const LIST_KEY: &str = "deleted_tickets";

/// Sort fields accepted by the deleted tickets listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedTicketSort {
    /// Ticket ID.
    Id,
    /// Subject.
    Subject,
    /// Deletion time.
    DeletedAt,
}

impl DeletedTicketSort {
    fn as_str(self) -> &'static str {
        match self {
            DeletedTicketSort::Id => "id",
            DeletedTicketSort::Subject => "subject",
            DeletedTicketSort::DeletedAt => "deleted_at",
        }
    }

    /// Renders `sort_by` / `sort_order` parameters for [`DeletedTicketsResource::list_with`].
    pub fn query(self, order: SortOrder) -> Query {
        Query::new()
            .with("sort_by", self.as_str())
            .with("sort_order", order)
    }
}

/// Client for `/api/v2/deleted_tickets`.
pub struct DeletedTicketsResource<'a> {
    client: &'a ZendeskClient,
}

impl<'a> DeletedTicketsResource<'a> {
    pub(crate) fn new(client: &'a ZendeskClient) -> Self {
        Self { client }
    }

    fn list_op() -> Operation {
        Operation::new(RESOURCE, "list", "core/tickets#show-deleted-tickets")
    }

    /// Lists soft-deleted tickets.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn list(&self, pager: PageRequest) -> Result<Page<DeletedTicket>, ZendeskError> {
        self.list_with(Query::new(), pager).await
    }

    /// Lists soft-deleted tickets with extra parameters, typically sorting.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sort = DeletedTicketSort::DeletedAt.query(SortOrder::Desc);
    /// let page = client.deleted_tickets().list_with(sort, PageRequest::new()).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn list_with(
        &self,
        query: Query,
        pager: PageRequest,
    ) -> Result<Page<DeletedTicket>, ZendeskError> {
        let query = pager.apply(query);
        let op = Self::list_op().with_detail(query.build());
        let path = format!("{}.json", BASE_PATH);

        self.client.list(&op, &path, &query, LIST_KEY).await
    }

    /// Fetches the page after `page`, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// See [`ZendeskClient::next_page`].
    pub async fn next(
        &self,
        page: &Page<DeletedTicket>,
    ) -> Result<Option<Page<DeletedTicket>>, ZendeskError> {
        self.client.next_page(page, Self::list_op()).await
    }

    /// Restores one deleted ticket.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` unless Zendesk answers exactly 200.
    pub async fn restore(&self, ticket_id: u64) -> Result<(), ZendeskError> {
        let op = Operation::new(
            RESOURCE,
            "restore",
            "core/tickets#restore-a-previously-deleted-ticket",
        )
        .expecting(StatusCode::OK)
        .with_detail(ticket_id.to_string());
        let path = format!("{}/{}/restore.json", BASE_PATH, ticket_id);

        self.client
            .send(&op, Method::PUT, &path, &Query::new(), None)
            .await?;
        Ok(())
    }

    /// Restores up to 100 deleted tickets in one call.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty or oversized id list
    /// (no request is sent), and `ZendeskError::Request` unless Zendesk
    /// answers exactly 200.
    pub async fn restore_many(&self, ticket_ids: &[u64]) -> Result<(), ZendeskError> {
        let ids = to_csv(ticket_ids)?;
        let op = Operation::new(
            RESOURCE,
            "restore_many",
            "core/tickets#restore-previously-deleted-tickets-in-bulk",
        )
        .expecting(StatusCode::OK)
        .with_detail(ids.clone());
        let path = format!("{}/restore_many", BASE_PATH);

        self.client
            .send(&op, Method::PUT, &path, &Query::new().with_list("ids", ids), None)
            .await?;
        Ok(())
    }

    /// Permanently deletes one soft-deleted ticket.
    ///
    /// Deletion runs in the background; poll the returned job with
    /// [`JobStatusesResource::get`](crate::resources::JobStatusesResource::get).
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` unless Zendesk answers exactly 200.
    pub async fn purge(&self, ticket_id: u64) -> Result<JobStatus, ZendeskError> {
        let op = Operation::new(RESOURCE, "purge", "core/tickets#delete-ticket-permanently")
            .expecting(StatusCode::OK)
            .with_detail(ticket_id.to_string());
        let path = format!("{}/{}.json", BASE_PATH, ticket_id);

        let response: JobStatusResponse = self
            .client
            .call(&op, Method::DELETE, &path, &Query::new(), None)
            .await?;
        Ok(response.job_status)
    }

    /// Permanently deletes up to 100 soft-deleted tickets.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty or oversized id list
    /// (no request is sent), and `ZendeskError::Request` unless Zendesk
    /// answers exactly 200.
    pub async fn purge_many(&self, ticket_ids: &[u64]) -> Result<JobStatus, ZendeskError> {
        let ids = to_csv(ticket_ids)?;
        let op = Operation::new(
            RESOURCE,
            "purge_many",
            "core/tickets#delete-multiple-tickets-permanently",
        )
        .expecting(StatusCode::OK)
        .with_detail(ids.clone());
        let path = format!("{}/destroy_many", BASE_PATH);

        let response: JobStatusResponse = self
            .client
            .call(&op, Method::DELETE, &path, &Query::new().with_list("ids", ids), None)
            .await?;
        Ok(response.job_status)
    }
}
