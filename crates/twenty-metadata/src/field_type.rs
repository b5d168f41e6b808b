//! The closed set of field types the API reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Field type as reported by the metadata endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Uuid,
    Date,
    DateTime,
    Select,
    MultiSelect,
    Relation,
    Emails,
    Phones,
    Links,
    FullName,
    Address,
    Currency,
    Actor,
    Rating,
    Position,
    TsVector,
    RawJson,
}

impl FieldType {
    /// Every variant, in declaration order.
    pub const ALL: [FieldType; 20] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Uuid,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Select,
        FieldType::MultiSelect,
        FieldType::Relation,
        FieldType::Emails,
        FieldType::Phones,
        FieldType::Links,
        FieldType::FullName,
        FieldType::Address,
        FieldType::Currency,
        FieldType::Actor,
        FieldType::Rating,
        FieldType::Position,
        FieldType::TsVector,
        FieldType::RawJson,
    ];

    /// The wire spelling, e.g. `DATE_TIME`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Uuid => "UUID",
            FieldType::Date => "DATE",
            FieldType::DateTime => "DATE_TIME",
            FieldType::Select => "SELECT",
            FieldType::MultiSelect => "MULTI_SELECT",
            FieldType::Relation => "RELATION",
            FieldType::Emails => "EMAILS",
            FieldType::Phones => "PHONES",
            FieldType::Links => "LINKS",
            FieldType::FullName => "FULL_NAME",
            FieldType::Address => "ADDRESS",
            FieldType::Currency => "CURRENCY",
            FieldType::Actor => "ACTOR",
            FieldType::Rating => "RATING",
            FieldType::Position => "POSITION",
            FieldType::TsVector => "TS_VECTOR",
            FieldType::RawJson => "RAW_JSON",
        }
    }

    /// Composite types whose wire value is a nested object.
    pub fn requires_nested_handler(&self) -> bool {
        matches!(
            self,
            FieldType::Emails
                | FieldType::Phones
                | FieldType::Links
                | FieldType::FullName
                | FieldType::Address
                | FieldType::Currency
                | FieldType::Actor
        )
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, FieldType::Relation)
    }

    /// Types whose values are maintained by the server.
    pub fn is_system_type(&self) -> bool {
        matches!(
            self,
            FieldType::Actor | FieldType::Position | FieldType::TsVector
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::new(ErrorKind::UnknownFieldType(s.to_string())))
    }
}
