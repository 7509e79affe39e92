//! Job statuses: read-only views of Zendesk background jobs.
//!
//! Zendesk only logs the last 100 jobs and each expires within an hour, so
//! `get` returning `None` is a normal outcome for an old job. Nothing here
//! polls; callers decide how often to ask.

use crate::client::{Operation, ZendeskClient};
use crate::error::ZendeskError;
use crate::formatter::to_csv;
use crate::models::{JobStatus, JobStatusResponse};
use crate::pagination::{Page, PageRequest};
use crate::query::Query;

const RESOURCE: &str = "job_statuses";
const BASE_PATH: &str = "/api/v2/job_statuses";
const LIST_KEY: &str = "job_statuses";

/// Client for `/api/v2/job_statuses`.
pub struct JobStatusesResource<'a> {
    client: &'a ZendeskClient,
}

impl<'a> JobStatusesResource<'a> {
    pub(crate) fn new(client: &'a ZendeskClient) -> Self {
        Self { client }
    }

    fn list_op() -> Operation {
        Operation::new(RESOURCE, "list", "support/job_statuses#list-job-statuses")
    }

    /// Lists the statuses of recent background jobs.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Request` for a non-2xx status.
    pub async fn list(&self, pager: PageRequest) -> Result<Page<JobStatus>, ZendeskError> {
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
    pub async fn next(
        &self,
        page: &Page<JobStatus>,
    ) -> Result<Option<Page<JobStatus>>, ZendeskError> {
        self.client.next_page(page, Self::list_op()).await
    }

    /// Shows one background job.
    ///
    /// Returns `Ok(None)` if Zendesk no longer knows the job.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for a malformed id and
    /// `ZendeskError::Request` for any non-2xx status other than 404.
    pub async fn get(&self, status_id: &str) -> Result<Option<JobStatus>, ZendeskError> {
        ZendeskClient::validate_id(status_id, "job_status_id")?;
        let op = Operation::new(RESOURCE, "get", "support/job_statuses#show-job-status")
            .with_detail(status_id);
        let path = format!("{}/{}.json", BASE_PATH, status_id);

        let response: Option<JobStatusResponse> = self.client.lookup(&op, &path).await?;
        Ok(response.map(|r| r.job_status))
    }

    /// Shows up to 100 background jobs in one call.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty, oversized or
    /// malformed id list (no request is sent), and `ZendeskError::Request`
    /// for a non-2xx status.
    pub async fn get_many(
        &self,
        status_ids: &[&str],
        pager: PageRequest,
    ) -> Result<Page<JobStatus>, ZendeskError> {
        let ids = to_csv(status_ids)?;
        for id in status_ids {
            ZendeskClient::validate_id(id, "job_status_id")?;
        }

        let op = Operation::new(
            RESOURCE,
            "get_many",
            "support/job_statuses#show-many-job-statuses",
        )
        .with_detail(ids.clone());
        let query = pager.apply(Query::new().with_list("ids", ids));
        let path = format!("{}/show_many.json", BASE_PATH);

        self.client.list(&op, &path, &query, LIST_KEY).await
    }
}
