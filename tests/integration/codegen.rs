use serde_json::json;
use twenty_api::client::RequestMethod;
use twenty_api::codec::Currency;
use twenty_api::codegen::EntityGenerator;
use twenty_api::metadata::{
    parse_objects_response, EntityDefinition, EntitySchema, EnumOption, FieldMetadata, FieldType,
    RelationMetadata, RelationType,
};
use twenty_api::rest::{Entity, FindOptions};

use crate::common::{objects_body, page, MockTransport};

#[rustfmt::skip]
#[allow(dead_code)]
#[path = "generated/note.rs"]
mod note;

#[test]
fn test_generates_modules_from_discovered_metadata() {
    let definitions = parse_objects_response(&objects_body()).unwrap();
    let generator = EntityGenerator::new();
    let generated: Vec<_> = definitions
        .iter()
        .map(|d| generator.generate(d).unwrap())
        .collect();

    let person = generated.iter().find(|g| g.object_name == "person").unwrap();
    let source = person.to_source();
    assert!(source.contains("pub static PERSON_METADATA: StaticEntityMetadata"));
    assert!(source.contains("pub fn name(&self) -> Option<FullName>"));
    assert!(source.contains("pub fn set_city(&mut self, value: impl Into<String>)"));
    assert!(source.contains("pub fn created_at(&self) -> Option<String>"));
    assert!(!source.contains("fn set_created_at"));
    assert!(!source.contains("fn set_id"));
    assert!(source.contains(r#"field_to_api: &[("company", "companyId")]"#));
    assert!(source.contains("pub struct PersonService<T>"));

    let mod_file = generator.render_mod_file(&generated).unwrap();
    assert!(mod_file.contains("pub mod company;"));
    assert!(mod_file.contains("pub mod person;"));
}

fn note_definition() -> EntityDefinition {
    EntityDefinition::builder("note", "notes")
        .field(
            FieldMetadata::new("id", FieldType::Uuid)
                .with_label("Id")
                .nullable(false)
                .system(true),
        )
        .field(FieldMetadata::new("title", FieldType::Text).with_label("Title"))
        .field(FieldMetadata::new("budget", FieldType::Currency).with_label("Budget"))
        .field(
            FieldMetadata::new("status", FieldType::Select)
                .with_label("Status")
                .with_options([
                    EnumOption::new("DONE", "Done").with_color("green").with_position(1),
                    EnumOption::new("DRAFT", "Draft").with_color("gray"),
                ]),
        )
        .field(FieldMetadata::new("author", FieldType::Relation).with_label("Author"))
        .field(FieldMetadata::new("createdAt", FieldType::DateTime).with_label("Created at"))
        .relation(RelationMetadata::new(
            "author",
            RelationType::ManyToOne,
            "note",
            "workspaceMember",
            "authoredNotes",
        ))
        .build()
        .unwrap()
}

#[test]
fn test_generated_source_matches_checked_in_module() {
    let generated = EntityGenerator::new().generate(&note_definition()).unwrap();
    assert_eq!(generated.file_name(), "note.rs");
    assert_eq!(generated.to_source(), include_str!("generated/note.rs"));
}

#[test]
fn test_baked_tables_drive_the_runtime() {
    let schema = EntitySchema::from(&note::NOTE_METADATA);
    assert_eq!(schema.endpoint(), "notes");
    assert_eq!(schema.map_api_to_field("authorId"), "author");

    let note = Entity::new(&note::NOTE_METADATA)
        .with("title", "Kickoff")
        .with("author", "wm1")
        .with("id", "n1");
    let wire = note.to_wire();
    assert_eq!(wire["authorId"], "wm1");
    assert!(!wire.contains_key("author"));

    let payload = note.to_update_payload();
    assert!(!payload.contains_key("id"));
    assert_eq!(payload["title"], "Kickoff");
}

#[test]
fn test_generated_record_accessors() {
    let mut record = note::Note::new();
    record
        .set_title("Kickoff")
        .set_status("DRAFT")
        .set_author("wm1")
        .set_budget(Currency::from_amount(1_500.0, "EUR"));

    assert_eq!(record.title().as_deref(), Some("Kickoff"));
    assert_eq!(record.author().as_deref(), Some("wm1"));
    assert_eq!(record.budget().map(|b| b.code().to_string()).as_deref(), Some("EUR"));
    assert!(record.id().is_none());
    assert!(record.created_at().is_none());

    let wire = record.entity().to_wire();
    assert_eq!(wire["authorId"], "wm1");
    assert_eq!(wire["budget"]["amountMicros"], 1_500_000_000i64);
}

#[tokio::test]
async fn test_generated_service_round_trip() {
    let transport = MockTransport::new();
    transport
        .respond(
            RequestMethod::Post,
            "notes",
            json!({"data": {"createNote": {
                "id": "n1",
                "title": "Kickoff",
                "authorId": "wm1",
                "createdAt": "2024-05-01T09:00:00Z"
            }}}),
        )
        .respond(
            RequestMethod::Get,
            "notes",
            page("notes", json!([{"id": "n1"}, {"id": "n2"}]), false, Some("c1")),
        );
    let service = note::NoteService::new(transport.clone());

    let mut draft = note::Note::default();
    draft.set_title("Kickoff").set_author("wm1");
    let created = service.create(&draft).await.unwrap();
    assert_eq!(created.id().as_deref(), Some("n1"));
    assert_eq!(created.created_at().as_deref(), Some("2024-05-01T09:00:00Z"));
    assert_eq!(
        transport.calls()[0].options.body,
        Some(json!({"title": "Kickoff", "authorId": "wm1"}))
    );

    let mut notes = service.find("", FindOptions::new()).await.unwrap();
    assert_eq!(notes.ids(), vec!["n1", "n2"]);
    let all = notes.load_all().await;
    assert_eq!(all.len(), 2);
}
