use serde_json::json;
use twenty_api::client::RequestMethod;
use twenty_api::codec::{Currency, FullName, Links};
use twenty_api::rest::{Entity, EntityService, ErrorKind};

use crate::common::{company_definition, person_definition, MockTransport};

fn people(transport: &MockTransport) -> EntityService<MockTransport> {
    EntityService::new(transport.clone(), person_definition())
}

#[tokio::test]
async fn test_create_sends_wire_names_and_encoded_composites() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Post,
        "people",
        json!({"data": {"createPerson": {
            "id": "p1",
            "name": {"firstName": "Ada", "lastName": "Lovelace"},
            "companyId": "c1"
        }}}),
    );

    let person = people(&transport)
        .new_entity()
        .with("name", FullName::new("Ada", "Lovelace"))
        .with("company", "c1");
    let created = people(&transport).create(&person).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].options.body,
        Some(json!({
            "companyId": "c1",
            "name": {"firstName": "Ada", "lastName": "Lovelace"}
        }))
    );

    assert_eq!(created.id(), Some("p1"));
    assert_eq!(created.get_typed::<String>("company").as_deref(), Some("c1"));
    let name: FullName = created.get_typed("name").unwrap();
    assert_eq!(name.full(), "Ada Lovelace");
}

#[tokio::test]
async fn test_currency_travels_as_micros() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Post,
        "companies",
        json!({"data": {"createCompany": {
            "id": "c1",
            "annualRecurringRevenue": {"amountMicros": "50000000000", "currencyCode": "USD"}
        }}}),
    );
    let service = EntityService::new(transport.clone(), company_definition());

    let company = service
        .new_entity()
        .with("annualRecurringRevenue", Currency::from_amount(50_000.0, "USD"));
    let created = service.create(&company).await.unwrap();

    let body = transport.calls()[0].options.body.clone().unwrap();
    assert_eq!(
        body["annualRecurringRevenue"],
        json!({"amountMicros": 50_000_000_000i64, "currencyCode": "USD"})
    );

    let arr: Currency = created.get_typed("annualRecurringRevenue").unwrap();
    assert_eq!(arr.amount(), Some(50_000.0));
    assert_eq!(arr.code(), "USD");
}

#[tokio::test]
async fn test_update_without_id_makes_no_request() {
    let transport = MockTransport::new();
    let person = people(&transport).new_entity().with("city", "Paris");

    let err = people(&transport).update(&person).await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::MissingId { .. }));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_update_sends_only_updatable_fields() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Patch,
        "people/p1",
        json!({"data": {"updatePerson": {"id": "p1", "city": "Lyon"}}}),
    );

    let mut person = people(&transport).new_entity();
    person
        .set_id("p1")
        .set("city", "Lyon")
        .set("createdAt", "2024-01-01T00:00:00Z")
        .set("position", 3);
    let updated = people(&transport).update(&person).await.unwrap();

    let call = &transport.calls()[0];
    assert_eq!(call.method, RequestMethod::Patch);
    assert_eq!(call.options.body, Some(json!({"city": "Lyon"})));
    assert_eq!(updated.get_typed::<String>("city").as_deref(), Some("Lyon"));
}

#[tokio::test]
async fn test_get_by_id_absent_statuses() {
    let transport = MockTransport::new();
    transport
        .fail(RequestMethod::Get, "people/missing", 404)
        .fail(RequestMethod::Get, "people/bad", 400)
        .fail(RequestMethod::Get, "people/boom", 500);
    let service = people(&transport);

    assert!(service.get_by_id("missing").await.unwrap().is_none());
    assert!(service.get_by_id("bad").await.unwrap().is_none());
    let err = service.get_by_id("boom").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_get_by_id_null_record_is_an_error() {
    let transport = MockTransport::new();
    transport.respond(RequestMethod::Get, "people/p1", json!({"data": {"person": null}}));

    let err = people(&transport).get_by_id("p1").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_delete_reports_absence() {
    let transport = MockTransport::new();
    transport
        .respond(RequestMethod::Delete, "people/p1", json!({"data": {"deletePerson": {"id": "p1"}}}))
        .fail(RequestMethod::Delete, "people/p2", 404);
    let service = people(&transport);

    assert!(service.delete("p1").await.unwrap());
    assert!(!service.delete("p2").await.unwrap());
}

#[tokio::test]
async fn test_batch_upsert_posts_array() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Post,
        "batch/companies",
        json!({"data": {"createCompanies": [
            {"id": "c1", "name": "Acme"},
            {"id": "c2", "name": "Globex"}
        ]}}),
    );
    let service = EntityService::new(transport.clone(), company_definition());

    let records = vec![
        service.new_entity().with("name", "Acme"),
        service
            .new_entity()
            .with("name", "Globex")
            .with("domainName", Links::new("https://globex.example")),
    ];
    let saved = service.batch_upsert(&records).await.unwrap();

    let body = transport.calls()[0].options.body.clone().unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["domainName"]["primaryLinkUrl"], "https://globex.example");
    let ids: Vec<_> = saved.iter().filter_map(Entity::id).collect();
    assert_eq!(ids, ["c1", "c2"]);
}

#[tokio::test]
async fn test_filter_rejects_invalid_select_value() {
    let transport = MockTransport::new();
    let service = EntityService::new(transport.clone(), company_definition());

    assert!(service.filter().equals("tier", "GOLD").is_ok());
    let err = service.filter().equals("tier", "PLATINUM").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSelectValue { .. }));
    let err = service.filter().equals("nickname", "x").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownField { .. }));
}
