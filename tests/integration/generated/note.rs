// @generated by twenty-codegen from the `note` object metadata. Do not edit.

#![allow(unused_imports)]

use twenty_api::client::Transport;
use twenty_api::codec::{Currency};
use twenty_api::metadata::{FieldType, RelationType, StaticEntityMetadata, StaticEnumOption, StaticField, StaticRelation};
use twenty_api::rest::{Entity, EntityCollection, EntityService, FindOptions, Result};

pub static NOTE_METADATA: StaticEntityMetadata = StaticEntityMetadata {
    object_name: "note",
    object_name_plural: "notes",
    endpoint: "notes",
    fields: &[
        StaticField {
            name: "id",
            wire_name: "id",
            field_type: FieldType::Uuid,
            label: "Id",
            is_nullable: false,
            is_custom: false,
            is_system: true,
            options: &[],
        },
        StaticField {
            name: "title",
            wire_name: "title",
            field_type: FieldType::Text,
            label: "Title",
            is_nullable: true,
            is_custom: false,
            is_system: false,
            options: &[],
        },
        StaticField {
            name: "budget",
            wire_name: "budget",
            field_type: FieldType::Currency,
            label: "Budget",
            is_nullable: true,
            is_custom: false,
            is_system: false,
            options: &[],
        },
        StaticField {
            name: "status",
            wire_name: "status",
            field_type: FieldType::Select,
            label: "Status",
            is_nullable: true,
            is_custom: false,
            is_system: false,
            options: &[
                StaticEnumOption { value: "DRAFT", label: "Draft", color: "gray", position: 0 },
                StaticEnumOption { value: "DONE", label: "Done", color: "green", position: 1 },
            ],
        },
        StaticField {
            name: "author",
            wire_name: "authorId",
            field_type: FieldType::Relation,
            label: "Author",
            is_nullable: true,
            is_custom: false,
            is_system: false,
            options: &[],
        },
        StaticField {
            name: "createdAt",
            wire_name: "createdAt",
            field_type: FieldType::DateTime,
            label: "Created at",
            is_nullable: true,
            is_custom: false,
            is_system: false,
            options: &[],
        },
    ],
    standard_fields: &["id", "title", "budget", "status", "author", "createdAt"],
    relations: &[
        StaticRelation { name: "author", relation_type: RelationType::ManyToOne, source_object: "note", target_object: "workspaceMember", target_field: "authoredNotes" },
    ],
    field_to_api: &[("author", "authorId")],
    api_to_field: &[("authorId", "author")],
};

/// `note` record.
#[derive(Debug, Clone)]
pub struct Note {
    entity: Entity,
}

impl Note {
    pub fn new() -> Self {
        Self { entity: Entity::new(&NOTE_METADATA) }
    }

    pub fn from_entity(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Id
    pub fn id(&self) -> Option<String> {
        self.entity.get_typed("id")
    }

    /// Title
    pub fn title(&self) -> Option<String> {
        self.entity.get_typed("title")
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> &mut Self {
        self.entity.set("title", Into::<String>::into(value));
        self
    }

    /// Budget
    pub fn budget(&self) -> Option<Currency> {
        self.entity.get_typed("budget")
    }

    pub fn set_budget(&mut self, value: Currency) -> &mut Self {
        self.entity.set("budget", value);
        self
    }

    /// Status
    pub fn status(&self) -> Option<String> {
        self.entity.get_typed("status")
    }

    pub fn set_status(&mut self, value: impl Into<String>) -> &mut Self {
        self.entity.set("status", Into::<String>::into(value));
        self
    }

    /// Author
    pub fn author(&self) -> Option<String> {
        self.entity.get_typed("author")
    }

    pub fn set_author(&mut self, value: impl Into<String>) -> &mut Self {
        self.entity.set("author", Into::<String>::into(value));
        self
    }

    /// Created at
    pub fn created_at(&self) -> Option<String> {
        self.entity.get_typed("createdAt")
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Entity> for Note {
    fn from(entity: Entity) -> Self {
        Self::from_entity(entity)
    }
}

impl From<Note> for Entity {
    fn from(record: Note) -> Self {
        record.entity
    }
}

/// Typed page of [`Note`] records.
#[derive(Debug)]
pub struct NoteCollection<T> {
    inner: EntityCollection<T>,
}

impl<T> NoteCollection<T> {
    pub fn from_inner(inner: EntityCollection<T>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &EntityCollection<T> {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.inner.total_count()
    }

    pub fn has_more(&self) -> bool {
        self.inner.has_more()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.inner.ids()
    }

    /// Loaded records.
    pub fn to_vec(&self) -> Vec<Note> {
        self.inner.iter().cloned().map(Note::from_entity).collect()
    }
}

impl<T: Transport> NoteCollection<T> {
    /// Next record, fetching another page when needed.
    pub async fn next_record(&mut self) -> Option<Note> {
        self.inner.next_entity().await.cloned().map(Note::from_entity)
    }

    /// Every record, loading the remaining pages.
    pub async fn load_all(&mut self) -> Vec<Note> {
        self.inner.load_all().await.iter().cloned().map(Note::from_entity).collect()
    }
}

/// Typed CRUD access to [`Note`] records.
#[derive(Debug, Clone)]
pub struct NoteService<T> {
    inner: EntityService<T>,
}

impl<T: Transport + Clone> NoteService<T> {
    pub fn new(transport: T) -> Self {
        Self { inner: EntityService::new(transport, &NOTE_METADATA) }
    }

    pub fn inner(&self) -> &EntityService<T> {
        &self.inner
    }

    pub async fn find(&self, filter: &str, options: FindOptions) -> Result<NoteCollection<T>> {
        Ok(NoteCollection::from_inner(self.inner.find(filter, options).await?))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Note>> {
        Ok(self.inner.get_by_id(id).await?.map(Note::from_entity))
    }

    pub async fn create(&self, record: &Note) -> Result<Note> {
        self.inner.create(record.entity()).await.map(Note::from_entity)
    }

    pub async fn update(&self, record: &Note) -> Result<Note> {
        self.inner.update(record.entity()).await.map(Note::from_entity)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.inner.delete(id).await
    }

    pub async fn batch_upsert(&self, records: &[Note]) -> Result<Vec<Note>> {
        let entities: Vec<Entity> = records.iter().map(|r| r.entity().clone()).collect();
        let saved = self.inner.batch_upsert(&entities).await?;
        Ok(saved.into_iter().map(Note::from_entity).collect())
    }
}
