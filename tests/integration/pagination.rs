use futures::StreamExt;
use serde_json::json;
use twenty_api::client::RequestMethod;
use twenty_api::rest::{EntityService, FindOptions};

use crate::common::{page, person_definition, MockTransport};

fn script_two_pages(transport: &MockTransport) {
    transport
        .respond(
            RequestMethod::Get,
            "people",
            page("people", json!([{"id": "p1"}, {"id": "p2"}]), true, Some("c1")),
        )
        .respond(
            RequestMethod::Get,
            "people",
            page("people", json!([{"id": "p3"}]), false, Some("c2")),
        );
}

#[tokio::test]
async fn test_traversal_fetches_one_page_per_exhaustion() {
    let transport = MockTransport::new();
    script_two_pages(&transport);
    let service = EntityService::new(transport.clone(), person_definition());

    let mut people = service
        .find("", FindOptions::new().limit(2).order_by("createdAt"))
        .await
        .unwrap();
    assert_eq!(transport.call_count(), 1);
    assert_eq!(people.len(), 2);
    assert_eq!(people.total_count(), Some(5));
    assert!(people.has_more());

    let mut seen = Vec::new();
    for _ in 0..2 {
        let person = people.next_entity().await.unwrap();
        seen.push(person.id().unwrap().to_string());
    }
    assert_eq!(transport.call_count(), 1);

    let person = people.next_entity().await.unwrap();
    seen.push(person.id().unwrap().to_string());
    assert_eq!(transport.call_count(), 2);
    assert_eq!(seen, ["p1", "p2", "p3"]);

    assert!(people.next_entity().await.is_none());
    assert!(people.next_entity().await.is_none());
    assert_eq!(transport.call_count(), 2);

    let second = &transport.calls()[1];
    assert_eq!(second.options.query_param("starting_after"), Some("c1"));
    assert_eq!(second.options.query_param("limit"), Some("2"));
    assert_eq!(second.options.query_param("order_by"), Some("createdAt"));
    assert_eq!(second.options.query_param("filter"), None);
}

#[tokio::test]
async fn test_failed_page_fetch_ends_traversal() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Get,
        "people",
        page("people", json!([{"id": "p1"}]), true, Some("c1")),
    );
    let service = EntityService::new(transport.clone(), person_definition());

    let mut people = service.find("", FindOptions::new()).await.unwrap();
    assert!(people.next_entity().await.is_some());
    assert!(people.next_entity().await.is_none());

    assert!(!people.has_more());
    assert_eq!(people.len(), 1);
    assert_eq!(people.fetch_error().and_then(|e| e.status()), Some(500));
    assert!(people.next_entity().await.is_none());
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_find_all_follows_cursors() {
    let transport = MockTransport::new();
    script_two_pages(&transport);
    let service = EntityService::new(transport.clone(), person_definition());

    let filter = service.filter().equals("city", "Paris").unwrap().build();
    let people = service.find_all(&filter, FindOptions::new()).await.unwrap();

    assert_eq!(people.len(), 3);
    for call in transport.calls() {
        assert_eq!(call.options.query_param("filter"), Some(r#"city[eq]:"Paris""#));
    }
}

#[tokio::test]
async fn test_find_all_propagates_page_failure() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Get,
        "people",
        page("people", json!([{"id": "p1"}]), true, Some("c1")),
    );
    let service = EntityService::new(transport.clone(), person_definition());

    let err = service.find_all("", FindOptions::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_stream_traversal() {
    let transport = MockTransport::new();
    script_two_pages(&transport);
    let service = EntityService::new(transport.clone(), person_definition());

    let people = service.find("", FindOptions::new()).await.unwrap();
    let ids: Vec<String> = people
        .into_stream()
        .map(|p| p.id().unwrap_or_default().to_string())
        .collect()
        .await;

    assert_eq!(ids, ["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_repeated_cursor_ends_traversal() {
    let transport = MockTransport::new();
    for _ in 0..3 {
        transport.respond(
            RequestMethod::Get,
            "people",
            page("people", json!([{"id": "p1"}]), true, Some("c1")),
        );
    }
    let service = EntityService::new(transport.clone(), person_definition());

    let mut people = service.find("", FindOptions::new()).await.unwrap();
    let loaded = people.load_all().await.len();

    assert_eq!(loaded, 2);
    assert_eq!(transport.call_count(), 2);
    assert!(!people.has_more());
    assert!(people.fetch_error().is_none());
}

#[tokio::test]
async fn test_missing_cursor_ends_traversal() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Get,
        "people",
        page("people", json!([{"id": "p1"}]), true, None),
    );
    let service = EntityService::new(transport.clone(), person_definition());

    let mut people = service.find("", FindOptions::new()).await.unwrap();
    assert!(people.next_entity().await.is_some());
    assert!(people.next_entity().await.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_find_all_stops_on_repeated_cursor() {
    let transport = MockTransport::new();
    for _ in 0..3 {
        transport.respond(
            RequestMethod::Get,
            "people",
            page("people", json!([{"id": "p1"}]), true, Some("c1")),
        );
    }
    let service = EntityService::new(transport.clone(), person_definition());

    let people = service.find_all("", FindOptions::new()).await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_empty_page_does_not_end_traversal() {
    let transport = MockTransport::new();
    transport
        .respond(
            RequestMethod::Get,
            "people",
            page("people", json!([]), true, Some("c1")),
        )
        .respond(
            RequestMethod::Get,
            "people",
            page("people", json!([]), true, Some("c2")),
        )
        .respond(
            RequestMethod::Get,
            "people",
            page("people", json!([{"id": "p1"}]), false, Some("c3")),
        );
    let service = EntityService::new(transport.clone(), person_definition());

    let mut people = service.find("", FindOptions::new()).await.unwrap();
    assert!(people.is_empty());

    let first = people.next_entity().await.and_then(|p| p.id().map(str::to_string));
    assert_eq!(first.as_deref(), Some("p1"));
    assert_eq!(transport.call_count(), 3);
    assert!(people.next_entity().await.is_none());
}
