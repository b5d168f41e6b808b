//! Relation loading.
//!
//! MANY_TO_ONE and ONE_TO_ONE relations read the foreign id stored on the
//! source entity and fetch the target by id. ONE_TO_MANY and MANY_TO_MANY
//! relations query the target type for records whose `<targetField>Id`
//! equals the source id.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};
use twenty_client::Transport;
use twenty_codec::FieldValue;
use twenty_metadata::{EntitySchema, RelationMetadata, RelationType, SchemaDiscovery};

use crate::entity::Entity;
use crate::error::{Error, ErrorKind, Result};
use crate::filter::FilterBuilder;
use crate::options::FindOptions;
use crate::service::EntityService;

/// A loaded relation, as cached on an [`Entity`].
#[derive(Debug, Clone)]
pub enum RelationValue {
    One(Option<Box<Entity>>),
    Many(Vec<Entity>),
}

impl RelationValue {
    pub fn as_one(&self) -> Option<&Entity> {
        match self {
            RelationValue::One(entity) => entity.as_deref(),
            RelationValue::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> &[Entity] {
        match self {
            RelationValue::Many(entities) => entities,
            RelationValue::One(_) => &[],
        }
    }

    /// Number of related records (0 or 1 for single relations).
    pub fn len(&self) -> usize {
        match self {
            RelationValue::One(entity) => usize::from(entity.is_some()),
            RelationValue::Many(entities) => entities.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves relations declared in entity schemas.
///
/// Target schemas come from explicitly registered schemas first, then from
/// schema discovery.
#[derive(Debug)]
pub struct RelationLoader<T> {
    discovery: Arc<SchemaDiscovery<T>>,
    schemas: HashMap<String, EntitySchema>,
}

impl<T: Transport + Clone> RelationLoader<T> {
    pub fn new(discovery: Arc<SchemaDiscovery<T>>) -> Self {
        Self {
            discovery,
            schemas: HashMap::new(),
        }
    }

    /// Register a target schema (e.g. baked metadata) ahead of discovery.
    pub fn with_schema(mut self, schema: impl Into<EntitySchema>) -> Self {
        let schema = schema.into();
        self.schemas.insert(schema.object_name().to_string(), schema);
        self
    }

    /// Load one relation of one entity.
    #[instrument(skip(self, entity), fields(object = %entity.object_name()))]
    pub async fn load(&self, entity: &Entity, relation: &str) -> Result<RelationValue> {
        let metadata = entity.schema().relation(relation).ok_or_else(|| {
            Error::new(ErrorKind::UnknownRelation {
                object: entity.object_name().to_string(),
                relation: relation.to_string(),
            })
        })?;

        match metadata.relation_type {
            RelationType::ManyToOne | RelationType::OneToOne => {
                let Some(id) = entity.get(relation).and_then(foreign_id) else {
                    return Ok(RelationValue::One(None));
                };
                let service = self.target_service(&metadata).await?;
                let target = service.get_by_id(&id).await?;
                Ok(RelationValue::One(target.map(Box::new)))
            }
            RelationType::OneToMany | RelationType::ManyToMany => {
                let Some(id) = entity.id() else {
                    return Ok(RelationValue::Many(Vec::new()));
                };
                let filter = FilterBuilder::new()
                    .equals(format!("{}Id", metadata.target_field), id)?
                    .build();
                let service = self.target_service(&metadata).await?;
                let items = service.find_all(&filter, FindOptions::new()).await?;
                Ok(RelationValue::Many(items))
            }
        }
    }

    /// Load a relation and cache it on the entity.
    pub async fn load_into<'e>(
        &self,
        entity: &'e mut Entity,
        relation: &str,
    ) -> Result<&'e RelationValue> {
        let value = self.load(entity, relation).await?;
        let object = entity.object_name().to_string();
        entity.set_relation(relation, value);
        entity.get_relation(relation).ok_or_else(|| {
            Error::new(ErrorKind::UnknownRelation {
                object,
                relation: relation.to_string(),
            })
        })
    }

    /// Load the named relations for every entity and cache the results.
    ///
    /// Names that are not relations of an entity's schema are skipped.
    #[instrument(skip(self, entities), fields(count = entities.len()))]
    pub async fn eager_load(&self, entities: &mut [Entity], relations: &[&str]) -> Result<()> {
        for relation in relations {
            for entity in entities.iter_mut() {
                if entity.schema().relation(relation).is_none() {
                    debug!(relation, object = entity.object_name(), "Skipping unknown relation");
                    continue;
                }
                let value = self.load(entity, relation).await?;
                entity.set_relation(*relation, value);
            }
        }
        Ok(())
    }

    async fn target_service(&self, relation: &RelationMetadata) -> Result<EntityService<T>> {
        let schema = match self.schemas.get(&relation.target_object) {
            Some(schema) => schema.clone(),
            None => self
                .discovery
                .definition(&relation.target_object)
                .await
                .map(EntitySchema::from)
                .ok_or_else(|| {
                    Error::new(ErrorKind::Metadata(format!(
                        "no definition for relation target '{}'",
                        relation.target_object
                    )))
                })?,
        };
        Ok(EntityService::new(self.discovery.transport().clone(), schema))
    }
}

/// The id held by a many-to-one field: the id itself or an object with an
/// `id` key. Falsy values mean "no related record".
fn foreign_id(value: &FieldValue) -> Option<String> {
    let json = value.as_json()?;
    let id = match json {
        Value::Object(object) => object.get("id")?,
        other => other,
    };
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
