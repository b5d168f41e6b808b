//! Accessor type selection.

use twenty_codec::CodecRegistry;
use twenty_metadata::FieldType;

/// The Rust type a generated accessor uses for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorType {
    /// Decoded value type of a registered codec, e.g. `Currency`.
    Codec(&'static str),
    String,
    Integer,
    Boolean,
    /// No fixed mapping; exposed as a raw `FieldValue`.
    Untyped,
}

impl AccessorType {
    /// Codec value type if the field type has a codec, else the fixed
    /// primitive mapping.
    pub fn for_field_type(field_type: FieldType, registry: &CodecRegistry) -> Self {
        if let Some(value_type) = registry.value_type(field_type) {
            return AccessorType::Codec(value_type);
        }
        match field_type {
            FieldType::Text
            | FieldType::Uuid
            | FieldType::Date
            | FieldType::DateTime
            | FieldType::Select
            | FieldType::Relation => AccessorType::String,
            FieldType::Number | FieldType::Rating => AccessorType::Integer,
            FieldType::Boolean => AccessorType::Boolean,
            _ => AccessorType::Untyped,
        }
    }

    /// Return type of the getter.
    pub fn getter_type(&self) -> String {
        match self {
            AccessorType::Codec(name) => format!("Option<{name}>"),
            AccessorType::String => "Option<String>".to_string(),
            AccessorType::Integer => "Option<i64>".to_string(),
            AccessorType::Boolean => "Option<bool>".to_string(),
            AccessorType::Untyped => "Option<&FieldValue>".to_string(),
        }
    }

    /// Parameter type of the setter.
    pub fn setter_param(&self) -> String {
        match self {
            AccessorType::Codec(name) => (*name).to_string(),
            AccessorType::String => "impl Into<String>".to_string(),
            AccessorType::Integer => "i64".to_string(),
            AccessorType::Boolean => "bool".to_string(),
            AccessorType::Untyped => "impl Into<FieldValue>".to_string(),
        }
    }

    /// Expression converting the setter's `value` parameter for `Entity::set`.
    pub fn setter_value(&self) -> &'static str {
        match self {
            AccessorType::String => "Into::<String>::into(value)",
            _ => "value",
        }
    }
}
