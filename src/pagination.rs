//! Pagination envelope for Zendesk list endpoints.
//!
//! List endpoints wrap their items in a key named after the resource and
//! add paging links next to it:
//!
//! ```json
//! {"tickets": [...], "next_page": "https://.../tickets.json?page=2", "previous_page": null, "count": 120}
//! ```
//!
//! Endpoints on cursor pagination answer with `meta.has_more` and
//! `links.next` instead. Both shapes decode into the same [`Page`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ZendeskError;
use crate::query::Query;

/// Largest page size Zendesk serves.
pub const MAX_PER_PAGE: u32 = 100;

/// Paging parameters for the first request of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    page: Option<u32>,
    per_page: Option<u32>,
}

impl PageRequest {
    /// Server defaults: first page, default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at the given 1-based page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size. Values above [`MAX_PER_PAGE`] are clamped.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.min(MAX_PER_PAGE));
        self
    }

    /// Appends `page` / `per_page` to a query.
    pub fn apply(&self, query: Query) -> Query {
        query
            .with_opt("page", self.page)
            .with_opt("per_page", self.per_page)
    }
}

/// One page of a listing, in server order.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Absolute URL of the next page, if there is one.
    pub next_page: Option<String>,

    /// Absolute URL of the previous page, if there is one.
    pub previous_page: Option<String>,

    /// Total number of items across all pages, when Zendesk reports it.
    pub count: Option<u64>,

    /// Key the items are stored under in the raw payload.
    #[serde(skip)]
    key: &'static str,
}

impl<T> Page<T> {
    /// Returns true if a further page can be fetched.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    /// Returns the continuation URL.
    pub fn next_url(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Returns the payload key the items were read from.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Default, Deserialize)]
struct CursorMeta {
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Default, Deserialize)]
struct CursorLinks {
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    prev: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    previous_page: Option<String>,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    meta: Option<CursorMeta>,
    #[serde(default)]
    links: Option<CursorLinks>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

/// Decodes a list payload whose items live under `key`.
///
/// A missing key decodes as an empty page.
///
/// # Errors
///
/// Returns `ZendeskError::Serialization` if the body is not JSON or the
/// items do not match `T`.
pub fn decode_page<T>(body: &str, key: &'static str) -> Result<Page<T>, ZendeskError>
where
    T: DeserializeOwned,
{
    let mut envelope: Envelope = serde_json::from_str(body)?;

    let items = match envelope.rest.remove(key) {
        Some(value) if !value.is_null() => serde_json::from_value(value)?,
        _ => Vec::new(),
    };

    let (next_page, previous_page) = match (envelope.meta, envelope.links) {
        (Some(meta), Some(links)) => {
            let next = if meta.has_more { links.next } else { None };
            (next, links.prev)
        }
        _ => (envelope.next_page, envelope.previous_page),
    };

    Ok(Page {
        items,
        next_page: next_page.filter(|url| !url.is_empty()),
        previous_page: previous_page.filter(|url| !url.is_empty()),
        count: envelope.count,
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_decode_offset_page_keeps_server_order() {
        let body = r#"{
            "tickets": [{"id": 3}, {"id": 1}, {"id": 2}],
            "next_page": "https://acme.zendesk.com/api/v2/tickets.json?page=2",
            "previous_page": null,
            "count": 7
        }"#;

        let page: Page<Item> = decode_page(body, "tickets").unwrap();
        let ids: Vec<u64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(page.has_next());
        assert_eq!(
            page.next_url(),
            Some("https://acme.zendesk.com/api/v2/tickets.json?page=2")
        );
        assert_eq!(page.previous_page, None);
        assert_eq!(page.count, Some(7));
        assert_eq!(page.key(), "tickets");
    }

    #[test]
    fn test_decode_last_page_has_no_continuation() {
        let body = r#"{"job_statuses": [{"id": 1}], "next_page": null}"#;
        let page: Page<Item> = decode_page(body, "job_statuses").unwrap();
        assert!(!page.has_next());
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_decode_cursor_page() {
        let body = r#"{
            "tickets": [{"id": 10}],
            "meta": {"has_more": true, "after_cursor": "xyz"},
            "links": {"next": "https://acme.zendesk.com/api/v2/tickets.json?page[after]=xyz", "prev": null}
        }"#;
        let page: Page<Item> = decode_page(body, "tickets").unwrap();
        assert_eq!(
            page.next_url(),
            Some("https://acme.zendesk.com/api/v2/tickets.json?page[after]=xyz")
        );
    }

    #[test]
    fn test_decode_cursor_page_without_more() {
        let body = r#"{
            "tickets": [],
            "meta": {"has_more": false},
            "links": {"next": "https://acme.zendesk.com/api/v2/tickets.json?page[after]=end"}
        }"#;
        let page: Page<Item> = decode_page(body, "tickets").unwrap();
        assert!(!page.has_next());
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_missing_key_is_empty_page() {
        let page: Page<Item> = decode_page(r#"{"count": 0}"#, "results").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.count, Some(0));
    }

    #[test]
    fn test_decode_rejects_mismatched_items() {
        let result = decode_page::<Item>(r#"{"tickets": [{"id": "nope"}]}"#, "tickets");
        assert!(matches!(result, Err(ZendeskError::Serialization(_))));
    }

    #[test]
    fn test_page_request_renders_params() {
        let query = PageRequest::new().with_page(2).with_per_page(250).apply(Query::new());
        assert_eq!(query.build(), "page=2&per_page=100");
        assert!(PageRequest::new().apply(Query::new()).is_empty());
    }

    #[test]
    fn test_page_into_iter() {
        let page: Page<Item> = decode_page(r#"{"x": [{"id": 1}, {"id": 2}]}"#, "x").unwrap();
        let items: Vec<Item> = page.into_iter().collect();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }
}
