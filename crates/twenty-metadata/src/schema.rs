//! One handle over both metadata sources.

use std::sync::Arc;

use crate::baked::StaticEntityMetadata;
use crate::definition::EntityDefinition;
use crate::field_type::FieldType;
use crate::relation::RelationMetadata;

/// The slice of field metadata the entity runtime needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub name: &'a str,
    pub wire_name: &'a str,
    pub field_type: FieldType,
    pub is_nullable: bool,
    pub is_system: bool,
}

/// Result of looking a name up in metadata.
///
/// `Unknown` is a normal outcome: names the metadata does not describe are
/// passed through untouched so newer server fields keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLookup<'a> {
    Known(FieldSpec<'a>),
    Unknown,
}

impl<'a> FieldLookup<'a> {
    pub fn known(self) -> Option<FieldSpec<'a>> {
        match self {
            FieldLookup::Known(spec) => Some(spec),
            FieldLookup::Unknown => None,
        }
    }

    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldLookup::Known(spec) => Some(spec.field_type),
            FieldLookup::Unknown => None,
        }
    }
}

/// Metadata for an entity, either discovered at runtime or baked at
/// generation time.
#[derive(Debug, Clone)]
pub enum EntitySchema {
    Discovered(Arc<EntityDefinition>),
    Baked(&'static StaticEntityMetadata),
}

impl EntitySchema {
    pub fn object_name(&self) -> &str {
        match self {
            EntitySchema::Discovered(def) => def.object_name(),
            EntitySchema::Baked(meta) => meta.object_name,
        }
    }

    pub fn object_name_plural(&self) -> &str {
        match self {
            EntitySchema::Discovered(def) => def.object_name_plural(),
            EntitySchema::Baked(meta) => meta.object_name_plural,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            EntitySchema::Discovered(def) => def.endpoint(),
            EntitySchema::Baked(meta) => meta.endpoint,
        }
    }

    pub fn lookup(&self, name: &str) -> FieldLookup<'_> {
        match self {
            EntitySchema::Discovered(def) => def.lookup(name),
            EntitySchema::Baked(meta) => meta.lookup(name),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        matches!(self.lookup(name), FieldLookup::Known(_))
    }

    pub fn field_names(&self) -> Vec<&str> {
        match self {
            EntitySchema::Discovered(def) => def.field_names().collect(),
            EntitySchema::Baked(meta) => meta.fields.iter().map(|f| f.name).collect(),
        }
    }

    pub fn map_field_to_api<'a>(&'a self, field: &'a str) -> &'a str {
        match self {
            EntitySchema::Discovered(def) => def.map_field_to_api(field),
            EntitySchema::Baked(meta) => meta.map_field_to_api(field),
        }
    }

    pub fn map_api_to_field<'a>(&'a self, field: &'a str) -> &'a str {
        match self {
            EntitySchema::Discovered(def) => def.map_api_to_field(field),
            EntitySchema::Baked(meta) => meta.map_api_to_field(field),
        }
    }

    /// Option values of a SELECT field; `None` for any other field.
    pub fn select_values(&self, name: &str) -> Option<Vec<&str>> {
        match self {
            EntitySchema::Discovered(def) => def
                .get_field(name)
                .filter(|f| f.is_select())
                .map(|f| f.option_values().collect()),
            EntitySchema::Baked(meta) => meta
                .field(name)
                .filter(|f| f.field_type == FieldType::Select)
                .map(|f| f.options.iter().map(|o| o.value).collect()),
        }
    }

    pub fn relation(&self, name: &str) -> Option<RelationMetadata> {
        match self {
            EntitySchema::Discovered(def) => def.get_relation(name).cloned(),
            EntitySchema::Baked(meta) => meta.relation(name).map(|r| r.to_metadata()),
        }
    }
}

impl From<EntityDefinition> for EntitySchema {
    fn from(def: EntityDefinition) -> Self {
        EntitySchema::Discovered(Arc::new(def))
    }
}

impl From<Arc<EntityDefinition>> for EntitySchema {
    fn from(def: Arc<EntityDefinition>) -> Self {
        EntitySchema::Discovered(def)
    }
}

impl From<&'static StaticEntityMetadata> for EntitySchema {
    fn from(meta: &'static StaticEntityMetadata) -> Self {
        EntitySchema::Baked(meta)
    }
}
