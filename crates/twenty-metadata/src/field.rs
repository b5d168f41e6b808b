//! Field descriptions.

use serde_json::Value;

use crate::field_type::FieldType;

/// One option of a SELECT or MULTI_SELECT field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
    pub color: String,
    pub position: i64,
}

impl EnumOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: String::new(),
            position: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }
}

/// Metadata for a single field of an object.
///
/// SELECT and MULTI_SELECT fields carry their options, ordered by
/// position. Every other type has an empty option list.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
    pub label: String,
    /// Id of the object this field belongs to.
    pub object_metadata_id: String,
    pub is_nullable: bool,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub default_value: Option<Value>,
    pub is_custom: bool,
    pub is_active: bool,
    pub is_system: bool,
    options: Vec<EnumOption>,
}

impl FieldMetadata {
    /// A nullable, active, non-custom, non-system field with empty ids.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            label: name.clone(),
            name,
            field_type,
            object_metadata_id: String::new(),
            is_nullable: true,
            description: None,
            icon: None,
            default_value: None,
            is_custom: false,
            is_active: true,
            is_system: false,
            options: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_object_metadata_id(mut self, id: impl Into<String>) -> Self {
        self.object_metadata_id = id.into();
        self
    }

    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    pub fn custom(mut self, is_custom: bool) -> Self {
        self.is_custom = is_custom;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Replace the options; they are kept sorted by position.
    pub fn with_options(mut self, options: impl IntoIterator<Item = EnumOption>) -> Self {
        self.options = options.into_iter().collect();
        self.options.sort_by_key(|o| o.position);
        self
    }

    /// Whether this field holds one value out of a fixed option list.
    pub fn is_select(&self) -> bool {
        matches!(self.field_type, FieldType::Select)
    }

    pub fn options(&self) -> &[EnumOption] {
        &self.options
    }

    /// The option values, in position order.
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }

    pub fn option_for(&self, value: &str) -> Option<&EnumOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// True iff `value` is one of the declared option values.
    pub fn is_valid_value(&self, value: &str) -> bool {
        self.option_for(value).is_some()
    }

    pub fn label_for_value(&self, value: &str) -> Option<&str> {
        self.option_for(value).map(|o| o.label.as_str())
    }

    /// Wire name of this field: `<name>Id` for relations, the name otherwise.
    pub fn wire_name(&self) -> String {
        wire_name_for(&self.name, self.field_type)
    }
}

/// The wire name a field of the given type is sent under.
pub fn wire_name_for(name: &str, field_type: FieldType) -> String {
    if field_type.is_relation() {
        format!("{name}Id")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> FieldMetadata {
        FieldMetadata::new("stage", FieldType::Select).with_options([
            EnumOption::new("MEETING", "Meeting").with_position(1),
            EnumOption::new("NEW", "New")
                .with_color("red")
                .with_position(0),
        ])
    }

    #[test]
    fn test_options_sorted_by_position() {
        let field = stage();
        let values: Vec<&str> = field.option_values().collect();
        assert_eq!(values, vec!["NEW", "MEETING"]);
    }

    #[test]
    fn test_select_lookups() {
        let field = stage();
        assert!(field.is_select());
        assert!(field.is_valid_value("NEW"));
        assert!(!field.is_valid_value("new"));
        assert_eq!(field.label_for_value("MEETING"), Some("Meeting"));
        assert_eq!(field.label_for_value("LOST"), None);
        assert_eq!(field.option_for("NEW").unwrap().color, "red");
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(
            FieldMetadata::new("company", FieldType::Relation).wire_name(),
            "companyId"
        );
        assert_eq!(FieldMetadata::new("city", FieldType::Text).wire_name(), "city");
    }
}
