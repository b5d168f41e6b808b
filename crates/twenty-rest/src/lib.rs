//! # twenty-rest
//!
//! Metadata-driven data access for the Twenty CRM REST API.
//!
//! ## Features
//!
//! - **Entity runtime** - [`Entity`] reads and writes fields through an
//!   [`EntitySchema`](twenty_metadata::EntitySchema), discovered or baked
//! - **CRUD** - [`EntityService`] with find, get, create, update, delete and batch upsert
//! - **Pagination** - [`EntityCollection`] fetches further pages while traversed
//! - **Relations** - [`RelationLoader`] resolves lazy and eager relation loads
//! - **Filters** - [`FilterBuilder`] renders validated `filter` expressions
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use twenty_client::{TwentyClient, TwentyCredentials};
//! use twenty_metadata::SchemaDiscovery;
//! use twenty_rest::{EntityService, FindOptions, RelationLoader};
//!
//! let client = TwentyClient::from_credentials(&TwentyCredentials::from_env()?, Default::default())?;
//! let discovery = Arc::new(SchemaDiscovery::new(client.clone()));
//! let people = EntityService::new(client, discovery.definition("person").await.unwrap());
//!
//! let mut page = people.find("", FindOptions::new().limit(20)).await?;
//! let loader = RelationLoader::new(discovery);
//! while let Some(person) = page.next_entity().await {
//!     let company = loader.load(person, "company").await?;
//!     println!("{:?} works at {:?}", person.id(), company.as_one().and_then(|c| c.id()));
//! }
//! ```

mod collection;
mod entity;
mod error;
mod filter;
mod options;
mod relation;
mod response;
mod service;

pub use collection::EntityCollection;
pub use entity::Entity;
pub use error::{Error, ErrorKind, Result};
pub use filter::{format_value, FilterBuilder, FilterOperator};
pub use options::FindOptions;
pub use relation::{RelationLoader, RelationValue};
pub use response::{parse_page, unwrap_list, unwrap_single, Page};
pub use service::EntityService;
