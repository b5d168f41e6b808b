//! Decoded field values.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::composite::{Address, Emails, FullName, Links, Phones};
use crate::currency::Currency;

/// A field value as seen by entity code.
///
/// Scalars stay in JSON form; composite types decode into their own struct.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Json(Value),
    Address(Address),
    Currency(Currency),
    FullName(FullName),
    Emails(Emails),
    Phones(Phones),
    Links(Links),
}

impl FieldValue {
    pub const NULL: FieldValue = FieldValue::Json(Value::Null);

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Json(Value::Null))
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self, FieldValue::Json(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(Value::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    /// RFC 3339 timestamps, as DATE_TIME fields carry them.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.as_str()?)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// `YYYY-MM-DD`, as DATE fields carry them.
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.as_str()?, "%Y-%m-%d").ok()
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            FieldValue::Address(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_currency(&self) -> Option<&Currency> {
        match self {
            FieldValue::Currency(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_full_name(&self) -> Option<&FullName> {
        match self {
            FieldValue::FullName(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_emails(&self) -> Option<&Emails> {
        match self {
            FieldValue::Emails(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_phones(&self) -> Option<&Phones> {
        match self {
            FieldValue::Phones(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&Links> {
        match self {
            FieldValue::Links(v) => Some(v),
            _ => None,
        }
    }

    /// Plain JSON rendering. Composites use their wire shape.
    pub fn to_json(&self) -> Value {
        let encoded = match self {
            FieldValue::Json(value) => return value.clone(),
            FieldValue::Address(v) => serde_json::to_value(v),
            FieldValue::Currency(v) => serde_json::to_value(v),
            FieldValue::FullName(v) => serde_json::to_value(v),
            FieldValue::Emails(v) => serde_json::to_value(v),
            FieldValue::Phones(v) => serde_json::to_value(v),
            FieldValue::Links(v) => serde_json::to_value(v),
        };
        // Plain structs with string keys; serialization cannot fail.
        encoded.unwrap_or_default()
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::NULL
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::NULL, Into::into)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Json(Value::from(value.to_rfc3339()))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Json(Value::from(value.format("%Y-%m-%d").to_string()))
    }
}

macro_rules! composite_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for FieldValue {
                fn from(value: $variant) -> Self {
                    FieldValue::$variant(value)
                }
            }

            impl FromFieldValue for $variant {
                fn from_field_value(value: &FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

composite_conversions!(Address, Currency, FullName, Emails, Phones, Links);

/// Typed extraction from a [`FieldValue`].
///
/// Returns `None` when the stored value has a different shape.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromFieldValue for Value {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        Some(value.to_json())
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_datetime()
    }
}

impl FromFieldValue for NaiveDate {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_date()
    }
}

impl FromFieldValue for Vec<String> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value
            .as_json()?
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}
