//! # twenty-metadata
//!
//! Entity metadata for the Twenty CRM REST API.
//!
//! ## Features
//!
//! - **Metadata model** - [`EntityDefinition`], [`FieldMetadata`], [`RelationMetadata`], [`FieldType`]
//! - **Wire-name mapping** - relation fields travel as `<name>Id`; everything else is identity
//! - **Baked metadata** - [`StaticEntityMetadata`] tables for generated code
//! - **Schema discovery** - [`SchemaDiscovery`] over `GET metadata/objects`, cached per object
//!
//! ## Example
//!
//! ```rust,ignore
//! use twenty_client::TwentyClient;
//! use twenty_metadata::SchemaDiscovery;
//!
//! let discovery = SchemaDiscovery::new(TwentyClient::new("https://api.twenty.com", "key")?);
//! let person = discovery.definition("person").await.expect("person object");
//! assert_eq!(person.map_field_to_api("company"), "companyId");
//! ```

mod baked;
mod definition;
mod discovery;
mod error;
mod field;
mod field_type;
mod relation;
mod schema;
mod updatable;

pub use baked::{StaticEntityMetadata, StaticEnumOption, StaticField, StaticRelation};
pub use definition::{EntityDefinition, EntityDefinitionBuilder};
pub use discovery::{parse_objects_response, SchemaDiscovery, METADATA_OBJECTS_PATH};
pub use error::{Error, ErrorKind, Result};
pub use field::{wire_name_for, EnumOption, FieldMetadata};
pub use field_type::FieldType;
pub use relation::{RelationMetadata, RelationType};
pub use schema::{EntitySchema, FieldLookup, FieldSpec};
pub use updatable::{is_updatable_field, AUDIT_FIELDS};
