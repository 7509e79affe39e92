//! Unified search across tickets, users, organizations and groups.

use crate::client::{Operation, ZendeskClient};
use crate::error::ZendeskError;
use crate::models::SearchResult;
use crate::pagination::{Page, PageRequest};
use crate::query::SearchQuery;

const RESOURCE: &str = "search";
const SEARCH_PATH: &str = "/api/v2/search.json";
const LIST_KEY: &str = "results";

/// Client for `/api/v2/search.json`.
pub struct SearchResource<'a> {
    client: &'a ZendeskClient,
}

impl<'a> SearchResource<'a> {
    pub(crate) fn new(client: &'a ZendeskClient) -> Self {
        Self { client }
    }

    fn find_op() -> Operation {
        Operation::new(RESOURCE, "find", "core/search#list-search-results")
    }

    /// Runs a search and returns the first page of results.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let search = SearchQuery::new().of_type("ticket").matching("status", "open");
    /// let page = client.search().find(&search, PageRequest::new()).await?;
    /// for ticket in page.items.iter().filter_map(SearchResult::as_ticket) {
    ///     println!("#{} {}", ticket.id, ticket.display_subject());
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an empty search (no request is
    /// sent) and `ZendeskError::Request` for a non-2xx status.
    pub async fn find(
        &self,
        search: &SearchQuery,
        pager: PageRequest,
    ) -> Result<Page<SearchResult>, ZendeskError> {
        if search.is_empty() {
            return Err(ZendeskError::validation("search query must not be empty"));
        }

        let query = pager.apply(search.to_query());
        let op = Self::find_op().with_detail(search.expression());

        self.client.list(&op, SEARCH_PATH, &query, LIST_KEY).await
    }

    /// Fetches the page after `page`, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// See [`ZendeskClient::next_page`].
    pub async fn next(
        &self,
        page: &Page<SearchResult>,
    ) -> Result<Option<Page<SearchResult>>, ZendeskError> {
        self.client.next_page(page, Self::find_op()).await
    }
}
