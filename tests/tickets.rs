//! Tickets against a mock Zendesk.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zendesk_api::models::{
    TicketComment, TicketCreate, TicketPriority, TicketStatus, TicketUpdate,
};
use zendesk_api::pagination::PageRequest;

use common::client_for;

fn ticket(id: u64, subject: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("https://acme.zendesk.com/api/v2/tickets/{}.json", id),
        "subject": subject,
        "status": status,
        "priority": "high",
        "type": "incident",
        "tags": ["printer"],
        "created_at": "2024-05-01T09:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_create_sends_ticket_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/tickets.json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "ticket": {
                "comment": {"body": "The printer is on fire"},
                "subject": "Help",
                "priority": "urgent",
                "tags": ["printer"]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ticket": ticket(35436, "Help", "new")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let create = TicketCreate::new("The printer is on fire")
        .with_subject("Help")
        .with_priority(TicketPriority::Urgent)
        .with_tag("printer");

    let client = client_for(&server);
    let created = assert_ok!(client.tickets().create(&create).await);

    assert_eq!(created.id, 35436);
    assert_eq!(created.status, Some(TicketStatus::New));
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/tickets/35436.json"))
        .and(body_json(json!({
            "ticket": {
                "comment": {"body": "Escalating", "public": false},
                "status": "pending",
                "assignee_id": 223443
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": ticket(35436, "Help", "pending")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = TicketUpdate::new()
        .with_status(TicketStatus::Pending)
        .with_comment(TicketComment::new("Escalating").private())
        .with_assignee(223443);

    let client = client_for(&server);
    let updated = assert_ok!(client.tickets().update(35436, &update).await);
    assert_eq!(updated.status, Some(TicketStatus::Pending));
}

#[tokio::test]
async fn test_get_and_missing_ticket() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": ticket(1, "Found", "open")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/2.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let found = assert_ok!(client.tickets().get(1).await).expect("ticket 1 exists");
    assert_eq!(found.display_subject(), "Found");
    assert_eq!(found.tags, vec!["printer".to_string()]);

    assert!(assert_ok!(client.tickets().get(2).await).is_none());
}

#[tokio::test]
async fn test_get_many_and_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/tickets/show_many.json"))
        .and(query_param("ids", "3,1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [ticket(3, "Three", "open"), ticket(1, "One", "solved")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/tickets.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [ticket(9, "Nine", "hold")],
            "next_page": null,
            "previous_page": format!("{}/api/v2/tickets.json?page=1", server.uri()),
            "count": 101
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let many = assert_ok!(client.tickets().get_many(&[3, 1]).await);
    let ids: Vec<u64> = many.items.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);

    let page = assert_ok!(client.tickets().list(PageRequest::new().with_page(2)).await);
    assert_eq!(page.count, Some(101));
    assert!(page.previous_page.is_some());
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_delete_and_delete_many() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/tickets/35436.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/tickets/destroy_many.json"))
        .and(query_param("ids", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_status": {"id": "deadbeef", "status": "queued"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_ok!(client.tickets().delete(35436).await);

    let job = assert_ok!(client.tickets().delete_many(&[1, 2]).await);
    assert_eq!(job.id, "deadbeef");
}

#[tokio::test]
async fn test_delete_many_empty_list_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.tickets().delete_many(&[]).await);
    assert!(err.is_validation());
}
