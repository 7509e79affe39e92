//! Search result models.
//!
//! The search endpoint returns a mixed list; each entry names its kind in a
//! `result_type` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Ticket;

/// A user as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// `end-user`, `agent` or `admin`.
    #[serde(default)]
    pub role: Option<String>,

    /// When the user was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An organization as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    pub id: u64,

    /// Name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email domains mapped to the organization.
    #[serde(default)]
    pub domain_names: Vec<String>,
}

/// An agent group as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: u64,

    /// Name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a search result page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result_type", rename_all = "lowercase")]
pub enum SearchResult {
    /// A ticket.
    Ticket(Ticket),
    /// A user.
    User(User),
    /// An organization.
    Organization(Organization),
    /// A group.
    Group(Group),
    /// Anything else (topics, entries, ...), skipped.
    #[serde(other)]
    Other,
}

impl SearchResult {
    /// Returns the ticket if this result is one.
    pub fn as_ticket(&self) -> Option<&Ticket> {
        match self {
            SearchResult::Ticket(ticket) => Some(ticket),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_results_deserialize_by_result_type() {
        let json = r#"[
            {"result_type": "ticket", "id": 211, "subject": "Printer", "status": "open"},
            {"result_type": "user", "id": 5, "name": "Bob", "email": "bob@example.com"},
            {"result_type": "organization", "id": 7, "name": "Acme", "domain_names": ["acme.com"]},
            {"result_type": "group", "id": 9, "name": "Support"},
            {"result_type": "topic", "id": 12, "title": "How to"}
        ]"#;

        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].as_ticket().map(|t| t.id), Some(211));
        assert!(matches!(
            &results[1],
            SearchResult::User(u) if u.email.as_deref() == Some("bob@example.com")
        ));
        assert!(matches!(
            &results[2],
            SearchResult::Organization(o) if o.domain_names == ["acme.com"]
        ));
        assert!(matches!(&results[3], SearchResult::Group(g) if g.id == 9));
        assert!(matches!(results[4], SearchResult::Other));
        assert!(results[4].as_ticket().is_none());
    }
}
