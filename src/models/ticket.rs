//! Ticket models for the Zendesk API.
//!
//! Covers live tickets, soft-deleted tickets and the payloads used to
//! create or update a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Not yet touched by an agent.
    New,
    /// Assigned and being worked on.
    Open,
    /// Waiting on the requester.
    Pending,
    /// Waiting on a third party.
    Hold,
    /// Solved, may still be reopened.
    Solved,
    /// Closed for good.
    Closed,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Low.
    Low,
    /// Normal.
    Normal,
    /// High.
    High,
    /// Urgent.
    Urgent,
}

/// Ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// A question.
    Question,
    /// An incident, possibly linked to a problem.
    Incident,
    /// A problem grouping incidents.
    Problem,
    /// A task with a due date.
    Task,
}

/// A Zendesk ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// API URL of the ticket.
    #[serde(default)]
    pub url: Option<String>,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// First comment on the ticket.
    #[serde(default)]
    pub description: Option<String>,

    /// Current status.
    #[serde(default)]
    pub status: Option<TicketStatus>,

    /// Priority, if set.
    #[serde(default)]
    pub priority: Option<TicketPriority>,

    /// Type, if set.
    #[serde(default, rename = "type")]
    pub ticket_type: Option<TicketType>,

    /// User who asked for support.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Agent currently assigned.
    #[serde(default)]
    pub assignee_id: Option<u64>,

    /// Group currently assigned.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Organization of the requester.
    #[serde(default)]
    pub organization_id: Option<u64>,

    /// Tags applied to the ticket.
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the ticket was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the ticket was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(No subject)")
    }
}

/// Who deleted a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// User ID.
    pub id: u64,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A soft-deleted ticket, restorable until it is purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedTicket {
    /// Ticket ID.
    pub id: u64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// First comment on the ticket.
    #[serde(default)]
    pub description: Option<String>,

    /// Agent who deleted the ticket.
    #[serde(default)]
    pub actor: Option<Actor>,

    /// When the ticket was deleted.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Status the ticket had before deletion.
    #[serde(default)]
    pub previous_state: Option<TicketStatus>,
}

/// A comment attached to a create or update call.
#[derive(Debug, Clone, Serialize)]
pub struct TicketComment {
    /// Comment text.
    pub body: String,

    /// Whether the requester can see the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl TicketComment {
    /// Creates a comment with default visibility.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            public: None,
        }
    }

    /// Makes the comment internal (agents only).
    #[must_use]
    pub fn private(mut self) -> Self {
        self.public = Some(false);
        self
    }
}

/// Payload for creating a ticket.
#[derive(Debug, Clone, Serialize)]
pub struct TicketCreate {
    /// Opening comment. Required by Zendesk.
    pub comment: TicketComment,

    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// Type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,

    /// Requester user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,

    /// Assignee user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl TicketCreate {
    /// Creates a ticket payload with the given opening comment.
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: TicketComment::new(comment),
            subject: None,
            priority: None,
            ticket_type: None,
            requester_id: None,
            assignee_id: None,
            tags: Vec::new(),
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Payload for updating a ticket. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdate {
    /// New subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Comment to append.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<TicketComment>,

    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// New assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,

    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TicketUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Appends a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: TicketComment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: u64) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Single-ticket envelope: `{"ticket": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse<T> {
    /// The wrapped ticket.
    pub ticket: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ticket_deserializes_zendesk_payload() {
        let json = r#"{
            "id": 35436,
            "url": "https://acme.zendesk.com/api/v2/tickets/35436.json",
            "subject": "Help, my printer is on fire!",
            "status": "open",
            "priority": "high",
            "type": "incident",
            "requester_id": 20978392,
            "assignee_id": 235323,
            "tags": ["enterprise", "other_tag"],
            "created_at": "2009-07-20T22:55:29Z",
            "custom_fields": [{"id": 27642, "value": "745"}]
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 35436);
        assert_eq!(ticket.status, Some(TicketStatus::Open));
        assert_eq!(ticket.priority, Some(TicketPriority::High));
        assert_eq!(ticket.ticket_type, Some(TicketType::Incident));
        assert_eq!(ticket.tags, vec!["enterprise", "other_tag"]);
        assert!(ticket.created_at.is_some());
        assert!(ticket.updated_at.is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let ticket: Ticket = serde_json::from_str(r#"{"id": 1, "status": "archived"}"#).unwrap();
        assert_eq!(ticket.status, Some(TicketStatus::Unknown));
        assert_eq!(ticket.display_subject(), "(No subject)");
    }

    #[test]
    fn test_deleted_ticket_deserializes() {
        let json = r#"{
            "id": 581,
            "subject": "Wonderful subject",
            "actor": {"id": 3946, "name": "Taz Wombat"},
            "deleted_at": "2020-09-17T21:34:22Z",
            "previous_state": "open"
        }"#;
        let deleted: DeletedTicket = serde_json::from_str(json).unwrap();
        assert_eq!(deleted.id, 581);
        assert_eq!(deleted.actor.unwrap().name.as_deref(), Some("Taz Wombat"));
        assert_eq!(deleted.previous_state, Some(TicketStatus::Open));
    }

    #[test]
    fn test_ticket_create_skips_unset_fields() {
        let create = TicketCreate::new("The smoke is very colorful.")
            .with_subject("My printer is on fire!")
            .with_priority(TicketPriority::Urgent);
        let value = serde_json::to_value(TicketResponse { ticket: create }).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ticket": {
                    "comment": {"body": "The smoke is very colorful."},
                    "subject": "My printer is on fire!",
                    "priority": "urgent"
                }
            })
        );
    }

    #[test]
    fn test_ticket_update_only_sends_changes() {
        let update = TicketUpdate::new()
            .with_status(TicketStatus::Solved)
            .with_comment(TicketComment::new("Fixed").private());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "comment": {"body": "Fixed", "public": false},
                "status": "solved"
            })
        );
    }
}
