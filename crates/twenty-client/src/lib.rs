//! # twenty-client
//!
//! Transport layer for the Twenty CRM REST API.
//!
//! Every higher layer (metadata discovery, entity services, relation
//! loading) talks through the [`Transport`] trait, so tests can swap in a
//! scripted transport and production code uses [`TwentyClient`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (twenty-metadata discovery, twenty-rest services)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Transport::request
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TwentyClient                           │
//! │  - Holds base URL + API key + reqwest client                │
//! │  - Decodes JSON bodies, maps failures to status errors      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use twenty_client::{RequestMethod, RequestOptions, Transport, TwentyClient, TwentyCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twenty_client::Error> {
//!     let creds = TwentyCredentials::from_env()?;
//!     let client = TwentyClient::from_credentials(&creds, Default::default())?;
//!
//!     let objects = client
//!         .request(RequestMethod::Get, "metadata/objects", RequestOptions::new())
//!         .await?;
//!     println!("{objects}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod transport;

pub use client::TwentyClient;
pub use config::{ClientConfig, ClientConfigBuilder, TwentyCredentials};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestMethod, RequestOptions};
pub use transport::Transport;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("twenty-api/", env!("CARGO_PKG_VERSION"));
