//! Entity definitions built from discovered metadata.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, ErrorKind, Result};
use crate::field::FieldMetadata;
use crate::field_type::FieldType;
use crate::relation::RelationMetadata;
use crate::schema::{FieldLookup, FieldSpec};

/// Everything the runtime needs to know about one object type.
///
/// Immutable once built. Field order is the order fields were supplied in.
/// Two lookup tables are derived on construction: entity-name to wire-name
/// and back. They only hold entries for RELATION fields (`company` <->
/// `companyId`); every other name maps to itself, including names this
/// definition has never heard of.
#[derive(Debug, Clone)]
pub struct EntityDefinition {
    object_name: String,
    object_name_plural: String,
    endpoint: String,
    fields: Vec<FieldMetadata>,
    field_index: HashMap<String, usize>,
    standard_fields: HashSet<String>,
    relations: HashMap<String, RelationMetadata>,
    field_to_api: HashMap<String, String>,
    api_to_field: HashMap<String, String>,
}

impl EntityDefinition {
    /// Start a definition for `object_name` / `object_name_plural`.
    ///
    /// The endpoint defaults to the plural name.
    pub fn builder(
        object_name: impl Into<String>,
        object_name_plural: impl Into<String>,
    ) -> EntityDefinitionBuilder {
        let plural = object_name_plural.into();
        EntityDefinitionBuilder {
            object_name: object_name.into(),
            endpoint: plural.clone(),
            object_name_plural: plural,
            fields: Vec::new(),
            standard_fields: None,
            relations: Vec::new(),
        }
    }

    /// Singular object name, e.g. `person`.
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Plural object name, e.g. `people`. List responses are keyed by it.
    pub fn object_name_plural(&self) -> &str {
        &self.object_name_plural
    }

    /// REST path segment, e.g. `people`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Field names in definition order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldMetadata> {
        self.field_index.get(name).map(|&i| &self.fields[i])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_index.contains_key(name)
    }

    /// Known-or-unknown view of a field, shared with baked metadata.
    pub fn lookup(&self, name: &str) -> FieldLookup<'_> {
        match self.get_field(name) {
            Some(field) => FieldLookup::Known(FieldSpec {
                name: &field.name,
                wire_name: self.map_field_to_api(&field.name),
                field_type: field.field_type,
                is_nullable: field.is_nullable,
                is_system: field.is_system,
            }),
            None => FieldLookup::Unknown,
        }
    }

    /// Fields that must be present (non-nullable).
    pub fn required_fields(&self) -> Vec<&FieldMetadata> {
        self.fields.iter().filter(|f| !f.is_nullable).collect()
    }

    /// Fields not in the standard field list.
    pub fn custom_fields(&self) -> Vec<&FieldMetadata> {
        self.fields
            .iter()
            .filter(|f| !self.standard_fields.contains(&f.name))
            .collect()
    }

    pub fn active_fields(&self) -> Vec<&FieldMetadata> {
        self.fields.iter().filter(|f| f.is_active).collect()
    }

    pub fn fields_of_type(&self, field_type: FieldType) -> Vec<&FieldMetadata> {
        self.fields
            .iter()
            .filter(|f| f.field_type == field_type)
            .collect()
    }

    /// Names of standard (non-custom) fields, in definition order.
    pub fn standard_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| self.standard_fields.contains(&f.name))
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn is_standard_field(&self, name: &str) -> bool {
        self.standard_fields.contains(name)
    }

    pub fn get_relation(&self, name: &str) -> Option<&RelationMetadata> {
        self.relations.get(name)
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationMetadata> {
        self.relations.values()
    }

    /// Relation names in field order where possible.
    pub fn relation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| self.relations.contains_key(&f.name))
            .map(|f| f.name.as_str())
            .collect();
        let mut extra: Vec<&str> = self
            .relations
            .keys()
            .map(String::as_str)
            .filter(|n| !self.field_index.contains_key(*n))
            .collect();
        extra.sort_unstable();
        names.extend(extra);
        names
    }

    /// Entity-facing name to wire name. Identity unless `field` is a relation.
    pub fn map_field_to_api<'a>(&'a self, field: &'a str) -> &'a str {
        self.field_to_api
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// Wire name to entity-facing name. Identity unless `field` is a relation's wire name.
    pub fn map_api_to_field<'a>(&'a self, field: &'a str) -> &'a str {
        self.api_to_field
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// The divergent entity-to-wire pairs, in field order.
    pub fn field_to_api_pairs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| {
                self.field_to_api
                    .get(&f.name)
                    .map(|wire| (f.name.as_str(), wire.as_str()))
            })
            .collect()
    }
}

/// Builder for [`EntityDefinition`].
#[derive(Debug)]
pub struct EntityDefinitionBuilder {
    object_name: String,
    object_name_plural: String,
    endpoint: String,
    fields: Vec<FieldMetadata>,
    standard_fields: Option<Vec<String>>,
    relations: Vec<RelationMetadata>,
}

impl EntityDefinitionBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldMetadata>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Explicit standard field list. Defaults to every field with `is_custom == false`.
    pub fn standard_fields<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.standard_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn relation(mut self, relation: RelationMetadata) -> Self {
        self.relations.push(relation);
        self
    }

    /// Build the definition, deriving the wire-name tables.
    ///
    /// Fails if two fields share a name.
    pub fn build(self) -> Result<EntityDefinition> {
        let mut field_index = HashMap::with_capacity(self.fields.len());
        let mut field_to_api = HashMap::new();
        let mut api_to_field = HashMap::new();

        for (i, field) in self.fields.iter().enumerate() {
            if field_index.insert(field.name.clone(), i).is_some() {
                return Err(Error::new(ErrorKind::DuplicateField {
                    object: self.object_name.clone(),
                    field: field.name.clone(),
                }));
            }
            if field.field_type.is_relation() {
                let wire = field.wire_name();
                api_to_field.insert(wire.clone(), field.name.clone());
                field_to_api.insert(field.name.clone(), wire);
            }
        }

        let standard_fields = match self.standard_fields {
            Some(names) => names.into_iter().collect(),
            None => self
                .fields
                .iter()
                .filter(|f| !f.is_custom)
                .map(|f| f.name.clone())
                .collect(),
        };

        let relations = self
            .relations
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();

        Ok(EntityDefinition {
            object_name: self.object_name,
            object_name_plural: self.object_name_plural,
            endpoint: self.endpoint,
            fields: self.fields,
            field_index,
            standard_fields,
            relations,
            field_to_api,
            api_to_field,
        })
    }
}
