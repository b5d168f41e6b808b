//! Schema discovery against `GET metadata/objects`.
//!
//! Discovery is forgiving: a failed request or a malformed object/field
//! is logged and skipped, so callers get whatever could be parsed rather
//! than an error. Definitions are cached by singular object name until
//! [`SchemaDiscovery::clear_cache`] is called.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use twenty_client::{RequestMethod, RequestOptions, Transport};

use crate::definition::EntityDefinition;
use crate::error::{Error, ErrorKind, Result};
use crate::field::{EnumOption, FieldMetadata};
use crate::field_type::FieldType;
use crate::relation::{RelationMetadata, RelationType};

/// Path of the metadata endpoint, relative to the REST root.
pub const METADATA_OBJECTS_PATH: &str = "metadata/objects";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ObjectsResponse {
    data: ObjectsData,
}

#[derive(Debug, Deserialize)]
struct ObjectsData {
    #[serde(default)]
    objects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireObject {
    id: String,
    name_singular: String,
    name_plural: String,
    #[serde(default)]
    fields: Vec<Value>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireField {
    id: String,
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default = "default_true")]
    is_nullable: bool,
    #[serde(default)]
    is_custom: bool,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    default_value: Option<Value>,
    #[serde(default)]
    options: Option<Vec<WireOption>>,
    #[serde(default)]
    relation: Option<WireRelation>,
}

#[derive(Debug, Deserialize)]
struct WireOption {
    value: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    position: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRelation {
    #[serde(rename = "type")]
    relation_type: String,
    source_object_metadata: WireObjectRef,
    target_object_metadata: WireObjectRef,
    #[serde(default)]
    target_field_metadata: Option<WireFieldRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireObjectRef {
    name_singular: String,
}

#[derive(Debug, Deserialize)]
struct WireFieldRef {
    name: String,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a `metadata/objects` response body into definitions.
///
/// The envelope must be well formed; individual objects and fields that
/// fail to parse are skipped with a warning.
pub fn parse_objects_response(body: &Value) -> Result<Vec<EntityDefinition>> {
    let response: ObjectsResponse = serde_json::from_value(body.clone()).map_err(|e| Error {
        kind: ErrorKind::Discovery(format!("unexpected metadata response shape: {e}")),
        source: Some(Box::new(e)),
    })?;

    let mut definitions = Vec::with_capacity(response.data.objects.len());
    for raw in response.data.objects {
        match parse_object(raw) {
            Ok(def) => definitions.push(def),
            Err(err) => warn!(error = %err, "Skipping object metadata"),
        }
    }
    Ok(definitions)
}

fn parse_object(raw: Value) -> Result<EntityDefinition> {
    let object: WireObject = serde_json::from_value(raw)?;
    let mut builder = EntityDefinition::builder(&object.name_singular, &object.name_plural);

    for raw_field in object.fields {
        match parse_field(raw_field, &object.id) {
            Ok((field, relation)) => {
                builder = builder.field(field);
                if let Some(relation) = relation {
                    builder = builder.relation(relation);
                }
            }
            Err(err) => warn!(
                object = %object.name_singular,
                error = %err,
                "Skipping field metadata"
            ),
        }
    }

    builder.build()
}

fn parse_field(raw: Value, object_id: &str) -> Result<(FieldMetadata, Option<RelationMetadata>)> {
    let wire: WireField = serde_json::from_value(raw)?;
    let field_type: FieldType = wire.field_type.parse()?;

    let relation = match wire.relation {
        Some(rel) => {
            let relation_type: RelationType = rel.relation_type.parse()?;
            let mut relation = RelationMetadata::new(
                &wire.name,
                relation_type,
                rel.source_object_metadata.name_singular,
                rel.target_object_metadata.name_singular,
                rel.target_field_metadata.map(|f| f.name).unwrap_or_default(),
            );
            relation.label = wire.label.clone().unwrap_or_else(|| wire.name.clone());
            relation.is_nullable = wire.is_nullable;
            relation.is_system = wire.is_system;
            relation.is_active = wire.is_active;
            relation.is_custom = wire.is_custom;
            Some(relation)
        }
        None => None,
    };

    let options = wire.options.unwrap_or_default().into_iter().map(|o| {
        let label = o.label.unwrap_or_else(|| o.value.clone());
        EnumOption::new(o.value, label)
            .with_color(o.color.unwrap_or_default())
            .with_position(o.position.unwrap_or_default())
    });

    let mut field = FieldMetadata::new(&wire.name, field_type)
        .with_id(wire.id)
        .with_label(wire.label.unwrap_or_else(|| wire.name.clone()))
        .with_object_metadata_id(object_id)
        .nullable(wire.is_nullable)
        .custom(wire.is_custom)
        .active(wire.is_active)
        .system(wire.is_system)
        .with_options(options);
    field.description = wire.description;
    field.icon = wire.icon;
    field.default_value = wire.default_value;

    Ok((field, relation))
}

// ============================================================================
// Discovery + Cache
// ============================================================================

/// Discovers entity definitions through a transport and caches them.
///
/// The cache is filled by check-then-fill: two concurrent misses may both
/// hit the network, and the later write wins. Share one instance behind an
/// `Arc` to share its cache.
#[derive(Debug)]
pub struct SchemaDiscovery<T> {
    transport: T,
    cache: RwLock<HashMap<String, Arc<EntityDefinition>>>,
}

impl<T: Transport> SchemaDiscovery<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The transport discovery talks through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every object definition and refresh the cache.
    ///
    /// Network and envelope errors propagate.
    #[instrument(skip(self))]
    pub async fn try_discover_all(&self) -> Result<Vec<Arc<EntityDefinition>>> {
        let body = self
            .transport
            .request(RequestMethod::Get, METADATA_OBJECTS_PATH, RequestOptions::new())
            .await?;

        let definitions: Vec<Arc<EntityDefinition>> = parse_objects_response(&body)?
            .into_iter()
            .map(Arc::new)
            .collect();

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        for def in &definitions {
            cache.insert(def.object_name().to_string(), Arc::clone(def));
        }
        debug!(count = definitions.len(), "Discovered object definitions");

        Ok(definitions)
    }

    /// Like [`try_discover_all`](Self::try_discover_all), but failures are
    /// logged and yield an empty list.
    pub async fn discover_all(&self) -> Vec<Arc<EntityDefinition>> {
        match self.try_discover_all().await {
            Ok(definitions) => definitions,
            Err(err) => {
                warn!(error = %err, "Schema discovery failed");
                Vec::new()
            }
        }
    }

    /// Definition for an object, by singular or plural name.
    ///
    /// Served from the cache when possible, otherwise triggers discovery.
    pub async fn definition(&self, name: &str) -> Option<Arc<EntityDefinition>> {
        if let Some(def) = self.cached(name) {
            return Some(def);
        }
        self.discover_all().await;
        self.cached(name)
    }

    /// Cache-only lookup by singular or plural name.
    pub fn cached(&self, name: &str) -> Option<Arc<EntityDefinition>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(name).cloned().or_else(|| {
            cache
                .values()
                .find(|def| def.object_name_plural() == name)
                .cloned()
        })
    }

    /// Seed the cache with a known definition (e.g. one rebuilt from baked metadata).
    pub fn insert(&self, definition: EntityDefinition) -> Arc<EntityDefinition> {
        let def = Arc::new(definition);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(def.object_name().to_string(), Arc::clone(&def));
        def
    }

    /// Singular names currently cached, sorted.
    pub fn cached_names(&self) -> Vec<String> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every cached definition; the next lookup rediscovers.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
