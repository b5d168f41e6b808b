//! # twenty-codec
//!
//! Conversion between the nested wire objects of composite field types and
//! typed Rust values.
//!
//! ## Features
//!
//! - **Composite values** - [`Address`], [`Currency`], [`FullName`], [`Emails`], [`Phones`], [`Links`]
//! - **Field values** - [`FieldValue`] with typed extraction through [`FromFieldValue`]
//! - **Registry** - [`CodecRegistry`] keyed by [`FieldType`](twenty_metadata::FieldType)
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use twenty_codec::{CodecRegistry, Currency, FieldValue};
//! use twenty_metadata::FieldType;
//!
//! let registry = CodecRegistry::global();
//! let wire = registry.to_api(FieldType::Currency, &Currency::from_amount(50000.00, "USD").into());
//! assert_eq!(wire, json!({"amountMicros": 50000000000i64, "currencyCode": "USD"}));
//!
//! let back = registry.from_api(FieldType::Currency, &wire).unwrap().unwrap();
//! assert_eq!(back.as_currency().and_then(Currency::amount), Some(50000.0));
//! ```

mod composite;
mod currency;
mod error;
mod registry;
mod value;

pub use composite::{Address, Emails, FullName, Link, Links, Phone, Phones};
pub use currency::{Currency, MICROS_PER_UNIT};
pub use error::{Error, ErrorKind, Result};
pub use registry::{CodecRegistry, Composite, CompositeCodec, FieldCodec};
pub use value::{FieldValue, FromFieldValue};
