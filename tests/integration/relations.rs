use std::sync::Arc;

use serde_json::json;
use twenty_api::client::RequestMethod;
use twenty_api::metadata::SchemaDiscovery;
use twenty_api::rest::{Entity, ErrorKind, RelationLoader, RelationValue};

use crate::common::{company_definition, objects_body, page, person_definition, MockTransport};

fn seeded_loader(transport: &MockTransport) -> RelationLoader<MockTransport> {
    let discovery = SchemaDiscovery::new(transport.clone());
    discovery.insert(person_definition());
    discovery.insert(company_definition());
    RelationLoader::new(Arc::new(discovery))
}

#[tokio::test]
async fn test_many_to_one_loads_by_foreign_id() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Get,
        "companies/c1",
        json!({"data": {"company": {"id": "c1", "name": "Acme"}}}),
    );
    let loader = seeded_loader(&transport);

    let person = Entity::from_wire(
        person_definition(),
        json!({"id": "p1", "companyId": "c1"}).as_object().unwrap(),
    );
    let company = loader.load(&person, "company").await.unwrap();

    let company = company.as_one().unwrap();
    assert_eq!(company.object_name(), "company");
    assert_eq!(company.get_typed::<String>("name").as_deref(), Some("Acme"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_many_to_one_without_foreign_id_makes_no_request() {
    let transport = MockTransport::new();
    let loader = seeded_loader(&transport);

    let person = Entity::new(person_definition()).with("company", "");
    let company = loader.load(&person, "company").await.unwrap();

    assert!(matches!(company, RelationValue::One(None)));
    assert_eq!(transport.call_count(), 0);
}

fn person_only_loader(transport: &MockTransport) -> RelationLoader<MockTransport> {
    let discovery = SchemaDiscovery::new(transport.clone());
    discovery.insert(person_definition());
    RelationLoader::new(Arc::new(discovery))
}

#[tokio::test]
async fn test_missing_foreign_id_skips_target_discovery() {
    let transport = MockTransport::new();
    let loader = person_only_loader(&transport);

    let person = Entity::new(person_definition()).with("id", "p1");
    let company = loader.load(&person, "company").await.unwrap();

    assert!(matches!(company, RelationValue::One(None)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_one_to_many_without_source_id_makes_no_request() {
    let transport = MockTransport::new();
    let discovery = SchemaDiscovery::new(transport.clone());
    discovery.insert(company_definition());
    let loader = RelationLoader::new(Arc::new(discovery));

    let company = Entity::new(company_definition()).with("name", "Acme");
    let people = loader.load(&company, "people").await.unwrap();

    assert!(matches!(people, RelationValue::Many(ref items) if items.is_empty()));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_one_to_many_queries_target_by_back_reference() {
    let transport = MockTransport::new();
    transport.respond(
        RequestMethod::Get,
        "people",
        page("people", json!([{"id": "p1"}, {"id": "p2"}]), false, None),
    );
    let loader = seeded_loader(&transport);

    let mut company = Entity::new(company_definition());
    company.set_id("c1");
    let people = loader.load_into(&mut company, "people").await.unwrap();

    assert_eq!(people.len(), 2);
    assert!(company.has_loaded_relation("people"));
    let call = &transport.calls()[0];
    assert_eq!(call.options.query_param("filter"), Some(r#"companyId[eq]:"c1""#));
}

#[tokio::test]
async fn test_unknown_relation_is_an_error_for_single_loads() {
    let transport = MockTransport::new();
    let loader = seeded_loader(&transport);

    let person = Entity::new(person_definition());
    let err = loader.load(&person, "pets").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownRelation { .. }));
}

#[tokio::test]
async fn test_eager_load_skips_unknown_relations() {
    let transport = MockTransport::new();
    transport
        .respond(
            RequestMethod::Get,
            "companies/c1",
            json!({"data": {"company": {"id": "c1", "name": "Acme"}}}),
        )
        .respond(
            RequestMethod::Get,
            "companies/c2",
            json!({"data": {"company": {"id": "c2", "name": "Globex"}}}),
        );
    let loader = seeded_loader(&transport);

    let mut people = vec![
        Entity::new(person_definition()).with("id", "p1").with("company", "c1"),
        Entity::new(person_definition()).with("id", "p2").with("company", "c2"),
    ];
    loader
        .eager_load(&mut people, &["company", "pets"])
        .await
        .unwrap();

    assert_eq!(transport.call_count(), 2);
    for person in &people {
        assert!(person.has_loaded_relation("company"));
        assert!(!person.has_loaded_relation("pets"));
    }
    let names: Vec<_> = people
        .iter()
        .filter_map(|p| p.get_relation("company")?.as_one()?.get_typed::<String>("name"))
        .collect();
    assert_eq!(names, ["Acme", "Globex"]);
}

#[tokio::test]
async fn test_target_schema_discovered_on_demand() {
    let transport = MockTransport::new();
    transport
        .respond(RequestMethod::Get, "metadata/objects", objects_body())
        .respond(
            RequestMethod::Get,
            "companies/c1",
            json!({"data": {"company": {"id": "c1", "annualRecurringRevenue": {"amountMicros": 1500000, "currencyCode": "EUR"}}}}),
        );
    let discovery = Arc::new(SchemaDiscovery::new(transport.clone()));
    let loader = RelationLoader::new(Arc::clone(&discovery));

    let person = Entity::from_wire(
        person_definition(),
        json!({"id": "p1", "companyId": "c1"}).as_object().unwrap(),
    );
    let company = loader.load(&person, "company").await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, "metadata/objects");
    let arr: twenty_api::codec::Currency = company
        .as_one()
        .unwrap()
        .get_typed("annualRecurringRevenue")
        .unwrap();
    assert_eq!(arr.amount(), Some(1.5));
    assert!(discovery.cached("companies").is_some());
}
