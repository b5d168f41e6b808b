//! Metadata compiled into generated code as constant tables.
//!
//! Generated entity modules declare a `static` [`StaticEntityMetadata`]
//! so the generated type never consults discovery at runtime.

use crate::definition::EntityDefinition;
use crate::error::Result;
use crate::field::{EnumOption, FieldMetadata};
use crate::field_type::FieldType;
use crate::relation::{RelationMetadata, RelationType};
use crate::schema::{FieldLookup, FieldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEnumOption {
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub position: i64,
}

/// One row of a baked field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticField {
    pub name: &'static str,
    pub wire_name: &'static str,
    pub field_type: FieldType,
    pub label: &'static str,
    pub is_nullable: bool,
    pub is_custom: bool,
    pub is_system: bool,
    pub options: &'static [StaticEnumOption],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRelation {
    pub name: &'static str,
    pub relation_type: RelationType,
    pub source_object: &'static str,
    pub target_object: &'static str,
    pub target_field: &'static str,
}

/// Baked counterpart of [`EntityDefinition`].
#[derive(Debug, PartialEq, Eq)]
pub struct StaticEntityMetadata {
    pub object_name: &'static str,
    pub object_name_plural: &'static str,
    pub endpoint: &'static str,
    /// In definition order. Object field tables stay in the tens of rows,
    /// so lookups scan.
    pub fields: &'static [StaticField],
    pub standard_fields: &'static [&'static str],
    /// Sorted by name.
    pub relations: &'static [StaticRelation],
    /// Only the pairs that differ from identity, sorted by entity name.
    pub field_to_api: &'static [(&'static str, &'static str)],
    /// The same pairs flipped, sorted by wire name.
    pub api_to_field: &'static [(&'static str, &'static str)],
}

impl StaticEntityMetadata {
    pub fn field(&self, name: &str) -> Option<&'static StaticField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> FieldLookup<'static> {
        match self.field(name) {
            Some(field) => FieldLookup::Known(FieldSpec {
                name: field.name,
                wire_name: field.wire_name,
                field_type: field.field_type,
                is_nullable: field.is_nullable,
                is_system: field.is_system,
            }),
            None => FieldLookup::Unknown,
        }
    }

    pub fn relation(&self, name: &str) -> Option<&'static StaticRelation> {
        self.relations
            .binary_search_by(|r| r.name.cmp(name))
            .ok()
            .map(|i| &self.relations[i])
    }

    pub fn map_field_to_api<'a>(&self, field: &'a str) -> &'a str {
        sorted_lookup(self.field_to_api, field).unwrap_or(field)
    }

    pub fn map_api_to_field<'a>(&self, field: &'a str) -> &'a str {
        sorted_lookup(self.api_to_field, field).unwrap_or(field)
    }

    /// Rebuild a full [`EntityDefinition`] from the baked tables.
    pub fn to_definition(&self) -> Result<EntityDefinition> {
        let mut builder = EntityDefinition::builder(self.object_name, self.object_name_plural)
            .endpoint(self.endpoint)
            .standard_fields(self.standard_fields.iter().copied());

        for field in self.fields {
            let options = field.options.iter().map(|o| {
                EnumOption::new(o.value, o.label)
                    .with_color(o.color)
                    .with_position(o.position)
            });
            builder = builder.field(
                FieldMetadata::new(field.name, field.field_type)
                    .with_label(field.label)
                    .nullable(field.is_nullable)
                    .custom(field.is_custom)
                    .system(field.is_system)
                    .with_options(options),
            );
        }
        for relation in self.relations {
            builder = builder.relation(relation.to_metadata());
        }
        builder.build()
    }
}

fn sorted_lookup(
    pairs: &'static [(&'static str, &'static str)],
    key: &str,
) -> Option<&'static str> {
    pairs
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|i| pairs[i].1)
}

impl StaticRelation {
    pub fn to_metadata(&self) -> RelationMetadata {
        RelationMetadata::new(
            self.name,
            self.relation_type,
            self.source_object,
            self.target_object,
            self.target_field,
        )
    }
}
