//! Filter expression builder.
//!
//! Builds the string carried by the `filter` query parameter, e.g.
//! `or(stage[eq]:"WON",amount.amountMicros[gte]:1000000)`.
//!
//! # Example
//!
//! ```rust
//! use twenty_rest::FilterBuilder;
//!
//! let filter = FilterBuilder::new()
//!     .equals("name", "John")?
//!     .contains("email", "@x.com")?
//!     .build();
//! assert_eq!(filter, r#"name[eq]:"John",email[ilike]:"%@x.com%""#);
//! # Ok::<(), twenty_rest::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use twenty_metadata::EntitySchema;

use crate::error::{Error, ErrorKind, Result};

/// Comparison operators understood by the `filter` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Like,
    Ilike,
    StartsWith,
    Is,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
            FilterOperator::Like => "like",
            FilterOperator::Ilike => "ilike",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::Is => "is",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "eq" => FilterOperator::Eq,
            "neq" => FilterOperator::Neq,
            "gt" => FilterOperator::Gt,
            "gte" => FilterOperator::Gte,
            "lt" => FilterOperator::Lt,
            "lte" => FilterOperator::Lte,
            "in" => FilterOperator::In,
            "like" => FilterOperator::Like,
            "ilike" => FilterOperator::Ilike,
            "startsWith" => FilterOperator::StartsWith,
            "is" | "isNull" => FilterOperator::Is,
            other => return Err(Error::new(ErrorKind::UnknownOperator(other.to_string()))),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    field: String,
    operator: FilterOperator,
    value: Value,
}

/// Accumulates conditions and renders them as one filter string.
///
/// Conditions are ANDed (joined with `,`) unless [`use_or`](Self::use_or)
/// is set, in which case they render as `or(...)`. With a schema attached,
/// field names and SELECT values are checked as conditions are added.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    conditions: Vec<Condition>,
    use_or: bool,
    schema: Option<EntitySchema>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that validates against `schema`.
    pub fn for_schema(schema: impl Into<EntitySchema>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Self::default()
        }
    }

    /// Add a condition.
    pub fn where_op(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let field = field.into();
        let value = value.into();
        self.validate(&field, &value)?;
        self.conditions.push(Condition {
            field,
            operator,
            value,
        });
        Ok(self)
    }

    /// Add a condition with the operator given by name.
    pub fn where_named(
        self,
        field: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let operator = operator.parse()?;
        self.where_op(field, operator, value)
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_op(field, FilterOperator::Eq, value)
    }

    pub fn not_equals(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_op(field, FilterOperator::Neq, value)
    }

    pub fn greater_than(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_op(field, FilterOperator::Gt, value)
    }

    pub fn greater_than_or_equal(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.where_op(field, FilterOperator::Gte, value)
    }

    pub fn less_than(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_op(field, FilterOperator::Lt, value)
    }

    pub fn less_than_or_equal(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.where_op(field, FilterOperator::Lte, value)
    }

    pub fn in_list<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.where_op(field, FilterOperator::In, values)
    }

    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        self.where_op(field, FilterOperator::Like, pattern.into())
    }

    pub fn ilike(self, field: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        self.where_op(field, FilterOperator::Ilike, pattern.into())
    }

    pub fn starts_with(self, field: impl Into<String>, prefix: impl Into<String>) -> Result<Self> {
        self.where_op(field, FilterOperator::StartsWith, prefix.into())
    }

    /// `field[is]:NULL`.
    pub fn is_null(self, field: impl Into<String>) -> Result<Self> {
        self.where_op(field, FilterOperator::Is, Value::Null)
    }

    /// Case-insensitive substring match. LIKE wildcards in `needle` are
    /// escaped.
    pub fn contains(self, field: impl Into<String>, needle: &str) -> Result<Self> {
        let escaped = needle
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        self.where_op(field, FilterOperator::Ilike, format!("%{escaped}%"))
    }

    /// Join conditions with OR instead of AND.
    pub fn use_or(mut self) -> Self {
        self.use_or = true;
        self
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render the filter string; empty when there are no conditions.
    pub fn build(&self) -> String {
        let joined = self
            .conditions
            .iter()
            .map(|c| format!("{}[{}]:{}", c.field, c.operator, format_value(&c.value)))
            .collect::<Vec<_>>()
            .join(",");
        if self.use_or && !joined.is_empty() {
            format!("or({joined})")
        } else {
            joined
        }
    }

    fn validate(&self, field: &str, value: &Value) -> Result<()> {
        let Some(schema) = &self.schema else {
            return Ok(());
        };

        let base = field.split('.').next().unwrap_or(field);
        let base = if schema.has_field(base) {
            base
        } else {
            schema.map_api_to_field(base)
        };
        if !schema.has_field(base) {
            return Err(Error::new(ErrorKind::UnknownField {
                object: schema.object_name().to_string(),
                field: field.to_string(),
            }));
        }

        if let Some(allowed) = schema.select_values(base) {
            let candidates: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                Value::Null => Vec::new(),
                scalar => vec![scalar],
            };
            for candidate in candidates {
                let text = match candidate {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if !allowed.contains(&text.as_str()) {
                    return Err(Error::new(ErrorKind::InvalidSelectValue {
                        field: base.to_string(),
                        value: text,
                    }));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Render one filter value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(format_value).collect::<Vec<_>>().join(",")
        ),
        Value::Object(_) => quote(&value.to_string()),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}
