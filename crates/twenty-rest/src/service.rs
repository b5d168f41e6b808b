//! Generic CRUD service over one object type.

use serde_json::Value;
use tracing::{debug, instrument, warn};
use twenty_client::{RequestMethod, RequestOptions, Transport};
use twenty_metadata::EntitySchema;

use crate::collection::{EntityCollection, FetchContext};
use crate::entity::Entity;
use crate::error::{Error, ErrorKind, Result};
use crate::filter::FilterBuilder;
use crate::options::FindOptions;
use crate::response::{parse_page, unwrap_list, unwrap_single, Page};

/// Statuses that `get_by_id` and `delete` treat as "no such record".
const ABSENT_STATUSES: [u16; 2] = [404, 400];

/// CRUD operations for one object type, driven entirely by its schema.
///
/// # Example
///
/// ```rust,ignore
/// use twenty_rest::{EntityService, FindOptions};
///
/// let people = EntityService::new(client, discovery.definition("person").await.unwrap());
/// let filter = people.filter().equals("city", "Paris")?.build();
/// let mut page = people.find(&filter, FindOptions::new().limit(50)).await?;
/// while let Some(person) = page.next_entity().await {
///     println!("{:?}", person.id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EntityService<T> {
    transport: T,
    schema: EntitySchema,
}

impl<T: Transport + Clone> EntityService<T> {
    pub fn new(transport: T, schema: impl Into<EntitySchema>) -> Self {
        Self {
            transport,
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A fresh, empty entity of this type.
    pub fn new_entity(&self) -> Entity {
        Entity::new(self.schema.clone())
    }

    /// A filter builder validating against this type's schema.
    pub fn filter(&self) -> FilterBuilder {
        FilterBuilder::for_schema(self.schema.clone())
    }

    /// First page of matching records. Further pages load lazily while the
    /// collection is traversed.
    ///
    /// An empty `filter` sends no `filter` parameter.
    #[instrument(skip(self), fields(object = %self.schema.object_name()))]
    pub async fn find(&self, filter: &str, options: FindOptions) -> Result<EntityCollection<T>> {
        let page = fetch_page(&self.transport, &self.schema, filter, &options).await?;
        let context = FetchContext {
            transport: self.transport.clone(),
            schema: self.schema.clone(),
            filter: filter.to_string(),
            options,
        };
        Ok(EntityCollection::from_page(page, Some(context)))
    }

    /// Every matching record, following cursors until the last page.
    ///
    /// Unlike lazy traversal, a failing page fetch is returned as an error.
    #[instrument(skip(self), fields(object = %self.schema.object_name()))]
    pub async fn find_all(&self, filter: &str, options: FindOptions) -> Result<Vec<Entity>> {
        let mut options = options;
        let mut items = Vec::new();
        let mut sent: Option<String> = None;
        loop {
            let page = fetch_page(&self.transport, &self.schema, filter, &options).await?;
            items.extend(page.items);
            match (page.has_next_page, page.end_cursor) {
                (true, Some(cursor)) if sent.as_deref() != Some(cursor.as_str()) => {
                    options = options.next_page(cursor.clone());
                    sent = Some(cursor);
                }
                (true, stalled) => {
                    warn!(
                        cursor = ?stalled,
                        loaded = items.len(),
                        "Page cursor did not advance, stopping"
                    );
                    break;
                }
                _ => break,
            }
        }
        Ok(items)
    }

    /// Fetch one record; `None` when the server answers 404 or 400.
    #[instrument(skip(self), fields(object = %self.schema.object_name()))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Entity>> {
        let result = self
            .transport
            .request(RequestMethod::Get, &self.item_path(id), RequestOptions::new())
            .await;
        match result {
            Ok(body) => self.single(&body).map(Some),
            Err(err) if is_absent(&err) => {
                debug!(id, status = ?err.status(), "Record not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, entity), fields(object = %self.schema.object_name()))]
    pub async fn create(&self, entity: &Entity) -> Result<Entity> {
        let body = self
            .transport
            .request(
                RequestMethod::Post,
                self.schema.endpoint(),
                RequestOptions::new().json(Value::Object(entity.to_wire())),
            )
            .await?;
        self.single(&body)
    }

    /// PATCH the entity's updatable fields. Fails without a network call
    /// when the entity has no id.
    #[instrument(skip(self, entity), fields(object = %self.schema.object_name()))]
    pub async fn update(&self, entity: &Entity) -> Result<Entity> {
        let id = entity.id().ok_or_else(|| {
            Error::new(ErrorKind::MissingId {
                object: self.schema.object_name().to_string(),
                operation: "update".to_string(),
            })
        })?;
        let body = self
            .transport
            .request(
                RequestMethod::Patch,
                &self.item_path(id),
                RequestOptions::new().json(Value::Object(entity.to_update_payload())),
            )
            .await?;
        self.single(&body)
    }

    /// Delete a record. Returns `false` when it was already gone (404/400).
    #[instrument(skip(self), fields(object = %self.schema.object_name()))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .transport
            .request(RequestMethod::Delete, &self.item_path(id), RequestOptions::new())
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(err) if is_absent(&err) => {
                debug!(id, status = ?err.status(), "Record already deleted");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create or update many records in one `POST batch/<endpoint>` call.
    #[instrument(skip(self, entities), fields(object = %self.schema.object_name(), count = entities.len()))]
    pub async fn batch_upsert(&self, entities: &[Entity]) -> Result<Vec<Entity>> {
        let payload = entities
            .iter()
            .map(|e| Value::Object(e.to_wire()))
            .collect();
        let body = self
            .transport
            .request(
                RequestMethod::Post,
                &format!("batch/{}", self.schema.endpoint()),
                RequestOptions::new().json(Value::Array(payload)),
            )
            .await?;
        Ok(unwrap_list(&body, self.schema.object_name_plural())
            .into_iter()
            .map(|wire| Entity::from_wire(self.schema.clone(), wire))
            .collect())
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.schema.endpoint(), urlencoding::encode(id))
    }

    fn single(&self, body: &Value) -> Result<Entity> {
        let wire = unwrap_single(body, self.schema.object_name())?;
        Ok(Entity::from_wire(self.schema.clone(), wire))
    }
}

fn is_absent(err: &twenty_client::Error) -> bool {
    err.status().is_some_and(|s| ABSENT_STATUSES.contains(&s))
}

/// GET one page of `schema`'s endpoint.
pub(crate) async fn fetch_page<T: Transport>(
    transport: &T,
    schema: &EntitySchema,
    filter: &str,
    options: &FindOptions,
) -> Result<Page> {
    let mut request = RequestOptions::new().with_query_params(options.to_query());
    if !filter.is_empty() {
        request = request.query("filter", filter);
    }
    let body = transport
        .request(RequestMethod::Get, schema.endpoint(), request)
        .await?;
    let page = parse_page(&body, schema);
    debug!(
        object = schema.object_name(),
        count = page.items.len(),
        has_next_page = page.has_next_page,
        "Fetched page"
    );
    Ok(page)
}
