//! Relation descriptions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    OneToMany,
    ManyToOne,
    ManyToMany,
    OneToOne,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::OneToMany => "ONE_TO_MANY",
            RelationType::ManyToOne => "MANY_TO_ONE",
            RelationType::ManyToMany => "MANY_TO_MANY",
            RelationType::OneToOne => "ONE_TO_ONE",
        }
    }

    /// Whether resolving this relation yields a list of records.
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationType::OneToMany | RelationType::ManyToMany)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONE_TO_MANY" => Ok(RelationType::OneToMany),
            "MANY_TO_ONE" => Ok(RelationType::ManyToOne),
            "MANY_TO_MANY" => Ok(RelationType::ManyToMany),
            "ONE_TO_ONE" => Ok(RelationType::OneToOne),
            other => Err(Error::new(ErrorKind::UnknownRelationType(
                other.to_string(),
            ))),
        }
    }
}

/// A relation from one object to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMetadata {
    pub name: String,
    pub label: String,
    pub relation_type: RelationType,
    /// Singular name of the object owning this relation.
    pub source_object: String,
    /// Singular name of the related object.
    pub target_object: String,
    /// The field on the target object pointing back at the source.
    pub target_field: String,
    pub is_nullable: bool,
    pub is_system: bool,
    pub is_active: bool,
    pub is_custom: bool,
}

impl RelationMetadata {
    pub fn new(
        name: impl Into<String>,
        relation_type: RelationType,
        source_object: impl Into<String>,
        target_object: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            relation_type,
            source_object: source_object.into(),
            target_object: target_object.into(),
            target_field: target_field.into(),
            is_nullable: true,
            is_system: false,
            is_active: true,
            is_custom: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_collection(&self) -> bool {
        self.relation_type.is_collection()
    }
}
