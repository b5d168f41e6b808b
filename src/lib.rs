//! # twenty-api
//!
//! A metadata-driven data mapping layer for the Twenty CRM REST API.
//!
//! Records are held as [`Entity`](rest::Entity) values whose fields are
//! read and written through object metadata, either discovered at runtime
//! from `GET metadata/objects` or baked into generated code.
//!
//! ## Crates
//!
//! - **twenty-client** - HTTP transport, credentials, request options
//! - **twenty-metadata** - object metadata model, baked tables, schema discovery
//! - **twenty-codec** - composite field values and their wire codecs
//! - **twenty-rest** - entities, CRUD services, pagination, relations, filters
//! - **twenty-codegen** - typed entity source generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use twenty_api::client::{ClientConfig, TwentyClient, TwentyCredentials};
//! use twenty_api::metadata::SchemaDiscovery;
//! use twenty_api::rest::{EntityService, FindOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = TwentyCredentials::from_env()?;
//!     let client = TwentyClient::from_credentials(&creds, ClientConfig::default())?;
//!
//!     let discovery = SchemaDiscovery::new(client.clone());
//!     let person = discovery.definition("person").await.ok_or("no person object")?;
//!     let people = EntityService::new(client, person);
//!
//!     let filter = people.filter().equals("city", "Paris")?.build();
//!     for person in people.find_all(&filter, FindOptions::new().limit(50)).await? {
//!         println!("{:?}", person.get("name"));
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use twenty_client as client;
#[cfg(feature = "metadata")]
pub use twenty_codec as codec;
#[cfg(feature = "codegen")]
pub use twenty_codegen as codegen;
#[cfg(feature = "metadata")]
pub use twenty_metadata as metadata;
#[cfg(feature = "rest")]
pub use twenty_rest as rest;

#[cfg(feature = "client")]
pub use twenty_client::{ClientConfig, TwentyClient, TwentyCredentials};
#[cfg(feature = "rest")]
pub use twenty_rest::{Entity, EntityService};
