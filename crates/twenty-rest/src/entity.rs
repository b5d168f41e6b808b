//! Entity runtime.
//!
//! An [`Entity`] is a bag of field values interpreted through an
//! [`EntitySchema`]. The same type serves discovered and baked metadata;
//! generated entity types wrap it with a baked schema.
//!
//! Field data is keyed by entity-facing names. Composite values are decoded
//! once when stored, so reads never branch on wire shape. Loaded relations
//! live in a separate cache and are never serialized.

use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;
use twenty_codec::{CodecRegistry, FieldValue, FromFieldValue};
use twenty_metadata::{is_updatable_field, EntitySchema, FieldLookup};

use crate::relation::RelationValue;

const ID_FIELD: &str = "id";

static NULL: FieldValue = FieldValue::NULL;

/// A single record of some object type.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: EntitySchema,
    data: BTreeMap<String, FieldValue>,
    relations: HashMap<String, RelationValue>,
}

impl Entity {
    /// An empty entity of the given type.
    pub fn new(schema: impl Into<EntitySchema>) -> Self {
        Self {
            schema: schema.into(),
            data: BTreeMap::new(),
            relations: HashMap::new(),
        }
    }

    /// Build from a wire object.
    ///
    /// Wire names are mapped back to entity names. When a relation arrives
    /// both as `<name>Id` and as an embedded `<name>` object, the id wins.
    pub fn from_wire(schema: impl Into<EntitySchema>, wire: &Map<String, Value>) -> Self {
        let mut entity = Self::new(schema);
        for (key, value) in wire {
            let name = entity.schema.map_api_to_field(key).to_string();
            if name == *key {
                let wire_name = entity.schema.map_field_to_api(key);
                if wire_name != key && wire.contains_key(wire_name) {
                    continue;
                }
            }
            entity.store(name, FieldValue::Json(value.clone()));
        }
        entity
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn object_name(&self) -> &str {
        self.schema.object_name()
    }

    /// Value of `field`, looked up under its entity name, then its wire name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field).or_else(|| {
            let wire_name = self.schema.map_field_to_api(field);
            (wire_name != field)
                .then(|| self.data.get(wire_name))
                .flatten()
        })
    }

    /// Typed read; `None` when missing or of another shape.
    pub fn get_typed<T: FromFieldValue>(&self, field: &str) -> Option<T> {
        self.get(field).and_then(T::from_field_value)
    }

    /// Store `value` under `field`.
    ///
    /// A wire name such as `companyId` is stored under its entity name.
    /// Setting a relation field drops any stale value held under its
    /// `<name>Id` wire name.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let mut field = field.into();
        let entity_name = self.schema.map_api_to_field(&field);
        if entity_name != field {
            field = entity_name.to_string();
        }
        let wire_name = self.schema.map_field_to_api(&field);
        if wire_name != field {
            let wire_name = wire_name.to_string();
            self.data.remove(&wire_name);
        }
        self.store(field, value.into());
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Remove `field` (and any value under its wire name).
    pub fn unset(&mut self, field: &str) -> Option<FieldValue> {
        let wire_name = self.schema.map_field_to_api(field).to_string();
        let wire_value = if wire_name != field {
            self.data.remove(&wire_name)
        } else {
            None
        };
        self.data.remove(field).or(wire_value)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD).and_then(FieldValue::as_str)
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        let id: String = id.into();
        self.set(ID_FIELD, id)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Wire representation: wire names, composite values encoded, unknown
    /// fields under their own key.
    pub fn to_wire(&self) -> Map<String, Value> {
        self.wire_entries(|_, _| true)
    }

    /// Body for an update: the wire form without `id`, system fields or
    /// audit fields.
    pub fn to_update_payload(&self) -> Map<String, Value> {
        self.wire_entries(|name, lookup| {
            name != ID_FIELD
                && match lookup {
                    FieldLookup::Known(spec) => is_updatable_field(spec.name, spec.is_system),
                    FieldLookup::Unknown => is_updatable_field(name, false),
                }
        })
    }

    pub fn set_relation(&mut self, name: impl Into<String>, value: RelationValue) -> &mut Self {
        self.relations.insert(name.into(), value);
        self
    }

    pub fn get_relation(&self, name: &str) -> Option<&RelationValue> {
        self.relations.get(name)
    }

    pub fn has_loaded_relation(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    pub fn loaded_relations(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }

    fn store(&mut self, field: String, value: FieldValue) {
        let value = self.decode(&field, value);
        self.data.insert(field, value);
    }

    /// Decode map-shaped values of coded types; everything else is kept.
    fn decode(&self, field: &str, value: FieldValue) -> FieldValue {
        let Some(field_type) = self.schema.lookup(field).field_type() else {
            return value;
        };
        let registry = CodecRegistry::global();
        match &value {
            FieldValue::Json(json @ Value::Object(_)) if registry.has_codec(field_type) => {
                match registry.from_api(field_type, json) {
                    Ok(decoded) => decoded.unwrap_or(FieldValue::NULL),
                    Err(err) => {
                        debug!(field, %field_type, error = %err, "Keeping undecodable value as JSON");
                        value
                    }
                }
            }
            _ => value,
        }
    }

    fn wire_entries(&self, keep: impl Fn(&str, FieldLookup<'_>) -> bool) -> Map<String, Value> {
        let registry = CodecRegistry::global();
        let mut wire = Map::new();
        for (name, value) in &self.data {
            let lookup = self.schema.lookup(name);
            if !keep(name.as_str(), lookup) {
                continue;
            }
            match lookup {
                FieldLookup::Known(spec) => {
                    wire.insert(
                        spec.wire_name.to_string(),
                        registry.to_api(spec.field_type, value),
                    );
                }
                FieldLookup::Unknown => {
                    wire.insert(name.clone(), value.to_json());
                }
            }
        }
        wire
    }
}

impl Index<&str> for Entity {
    type Output = FieldValue;

    /// Missing fields index as `null`.
    fn index(&self, field: &str) -> &FieldValue {
        self.get(field).unwrap_or(&NULL)
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}
