//! Codec registry keyed by field type.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;
use twenty_metadata::FieldType;

use crate::composite::{Address, Emails, FullName, Links, Phones};
use crate::currency::Currency;
use crate::error::{Error, ErrorKind, Result};
use crate::value::{FieldValue, FromFieldValue};

/// Converts one composite field type between its wire map and a value.
pub trait FieldCodec: Send + Sync {
    fn field_type(&self) -> FieldType;

    /// Rust type name of the decoded value, as generated code spells it.
    fn value_type(&self) -> &'static str;

    fn decode(&self, wire: &Map<String, Value>) -> Result<FieldValue>;

    /// `None` when `value` is not this codec's variant.
    fn encode(&self, value: &FieldValue) -> Option<Map<String, Value>>;
}

/// A composite struct that maps 1:1 onto a wire object through serde.
pub trait Composite:
    Serialize + DeserializeOwned + FromFieldValue + Into<FieldValue> + Send + Sync + 'static
{
    const FIELD_TYPE: FieldType;
    const TYPE_NAME: &'static str;
}

impl Composite for Address {
    const FIELD_TYPE: FieldType = FieldType::Address;
    const TYPE_NAME: &'static str = "Address";
}

impl Composite for Currency {
    const FIELD_TYPE: FieldType = FieldType::Currency;
    const TYPE_NAME: &'static str = "Currency";
}

impl Composite for FullName {
    const FIELD_TYPE: FieldType = FieldType::FullName;
    const TYPE_NAME: &'static str = "FullName";
}

impl Composite for Emails {
    const FIELD_TYPE: FieldType = FieldType::Emails;
    const TYPE_NAME: &'static str = "Emails";
}

impl Composite for Phones {
    const FIELD_TYPE: FieldType = FieldType::Phones;
    const TYPE_NAME: &'static str = "Phones";
}

impl Composite for Links {
    const FIELD_TYPE: FieldType = FieldType::Links;
    const TYPE_NAME: &'static str = "Links";
}

/// Serde-backed codec for any [`Composite`].
pub struct CompositeCodec<C>(PhantomData<fn() -> C>);

impl<C> Default for CompositeCodec<C> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<C: Composite> FieldCodec for CompositeCodec<C> {
    fn field_type(&self) -> FieldType {
        C::FIELD_TYPE
    }

    fn value_type(&self) -> &'static str {
        C::TYPE_NAME
    }

    fn decode(&self, wire: &Map<String, Value>) -> Result<FieldValue> {
        let decoded: C = serde_json::from_value(Value::Object(wire.clone())).map_err(|e| {
            Error::new(ErrorKind::Decode {
                field_type: C::FIELD_TYPE.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(decoded.into())
    }

    fn encode(&self, value: &FieldValue) -> Option<Map<String, Value>> {
        let typed = C::from_field_value(value)?;
        match serde_json::to_value(typed) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

static GLOBAL: LazyLock<CodecRegistry> = LazyLock::new(CodecRegistry::with_builtin);

/// Lookup table from [`FieldType`] to its codec.
///
/// Types without a codec pass through both directions unchanged.
pub struct CodecRegistry {
    codecs: HashMap<FieldType, Box<dyn FieldCodec>>,
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.codecs.keys().map(FieldType::as_str).collect();
        types.sort_unstable();
        f.debug_struct("CodecRegistry").field("codecs", &types).finish()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl CodecRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// The six built-in codecs: ADDRESS, CURRENCY, FULL_NAME, EMAILS,
    /// PHONES, LINKS.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CompositeCodec::<Address>::default());
        registry.register(CompositeCodec::<Currency>::default());
        registry.register(CompositeCodec::<FullName>::default());
        registry.register(CompositeCodec::<Emails>::default());
        registry.register(CompositeCodec::<Phones>::default());
        registry.register(CompositeCodec::<Links>::default());
        registry
    }

    /// Process-wide registry holding the built-in codecs.
    pub fn global() -> &'static CodecRegistry {
        &GLOBAL
    }

    /// Register a codec, replacing any existing one for the same type.
    pub fn register(&mut self, codec: impl FieldCodec + 'static) {
        self.codecs.insert(codec.field_type(), Box::new(codec));
    }

    pub fn has_codec(&self, field_type: FieldType) -> bool {
        self.codecs.contains_key(&field_type)
    }

    pub fn get(&self, field_type: FieldType) -> Option<&dyn FieldCodec> {
        self.codecs.get(&field_type).map(|c| c.as_ref())
    }

    pub fn value_type(&self, field_type: FieldType) -> Option<&'static str> {
        self.get(field_type).map(|c| c.value_type())
    }

    /// Decode a wire value.
    ///
    /// `null` and an empty object decode to `None`. Types without a codec,
    /// and non-object values for coded types, are returned as JSON.
    pub fn from_api(&self, field_type: FieldType, wire: &Value) -> Result<Option<FieldValue>> {
        match (self.get(field_type), wire) {
            (_, Value::Null) => Ok(None),
            (Some(_), Value::Object(map)) if map.is_empty() => Ok(None),
            (Some(codec), Value::Object(map)) => codec.decode(map).map(Some),
            (Some(_), other) => {
                trace!(%field_type, "Non-object value for composite field, passing through");
                Ok(Some(FieldValue::Json(other.clone())))
            }
            (None, other) => Ok(Some(FieldValue::Json(other.clone()))),
        }
    }

    /// Encode a value for the wire.
    ///
    /// Values already in JSON form pass through, so encoding is idempotent.
    pub fn to_api(&self, field_type: FieldType, value: &FieldValue) -> Value {
        if let FieldValue::Json(json) = value {
            return json.clone();
        }
        self.get(field_type)
            .and_then(|codec| codec.encode(value))
            .map(Value::Object)
            .unwrap_or_else(|| value.to_json())
    }
}
