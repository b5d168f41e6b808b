//! # twenty-codegen
//!
//! Compiles Twenty CRM object metadata into typed Rust source.
//!
//! For each [`EntityDefinition`](twenty_metadata::EntityDefinition) the
//! generator emits one module holding:
//!
//! - a baked [`StaticEntityMetadata`](twenty_metadata::StaticEntityMetadata) table
//! - a typed entity wrapper with a getter per field and a setter per updatable field
//! - typed collection and service wrappers over `twenty-rest`
//!
//! Getters and setters use the decoded composite type when a codec is
//! registered for the field type (`Currency`, `FullName`, ...), a fixed
//! primitive mapping for scalar types, and a raw `FieldValue` otherwise.
//!
//! ## Example
//!
//! ```rust,ignore
//! use twenty_codegen::EntityGenerator;
//!
//! let generator = EntityGenerator::new();
//! let generated = generator.generate(&person_definition)?;
//! std::fs::write(out_dir.join(generated.file_name()), generated.to_source())?;
//! ```

mod error;
mod generator;
pub mod naming;
mod types;

pub use error::{Error, ErrorKind, Result};
pub use generator::{EntityGenerator, GeneratedEntity, DEFAULT_CRATE_PATH};
pub use types::AccessorType;
