//! Rust identifiers derived from metadata names.

use convert_case::{Case, Casing};

use crate::error::{Error, ErrorKind, Result};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "yield", "abstract", "become", "do", "final", "gen", "macro", "override", "priv",
    "typeof", "unsized", "virtual",
];

/// Keywords that cannot be raw identifiers.
const NOT_RAW: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Methods every generated entity type defines itself.
const RESERVED_METHODS: &[&str] = &[
    "new",
    "from_entity",
    "entity",
    "entity_mut",
    "into_entity",
    "clone",
    "default",
];

fn ensure_identifier(name: String, original: &str) -> Result<String> {
    match name.chars().next() {
        None => Err(Error::new(ErrorKind::InvalidName(original.to_string()))),
        Some(first) if first.is_ascii_digit() => Ok(format!("_{name}")),
        Some(_) => Ok(name),
    }
}

/// Keep ASCII alphanumerics, turning everything else into word breaks.
fn clean(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

/// `myCustomObject` -> `MyCustomObject`.
pub fn type_name(object_name: &str) -> Result<String> {
    ensure_identifier(clean(object_name).to_case(Case::Pascal), object_name)
}

/// `myCustomObject` -> `my_custom_object`.
pub fn module_name(object_name: &str) -> Result<String> {
    let name = ensure_identifier(clean(object_name).to_case(Case::Snake), object_name)?;
    Ok(escape_keyword(name))
}

/// `myCustomObject` -> `MY_CUSTOM_OBJECT_METADATA`.
pub fn metadata_const(object_name: &str) -> Result<String> {
    let base = ensure_identifier(clean(object_name).to_case(Case::Constant), object_name)?;
    Ok(format!("{base}_METADATA"))
}

/// Getter name for a field: snake case, keywords escaped, clashes with
/// the generated type's own methods suffixed.
pub fn getter_name(field_name: &str) -> Result<String> {
    let name = ensure_identifier(clean(field_name).to_case(Case::Snake), field_name)?;
    if RESERVED_METHODS.contains(&name.as_str()) {
        return Ok(format!("{name}_field"));
    }
    Ok(escape_keyword(name))
}

/// Setter name for a field: `set_` plus the snake-case name.
pub fn setter_name(field_name: &str) -> Result<String> {
    let name = ensure_identifier(clean(field_name).to_case(Case::Snake), field_name)?;
    Ok(format!("set_{}", name.trim_start_matches('_')))
}

fn escape_keyword(name: String) -> String {
    if NOT_RAW.contains(&name.as_str()) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_and_module_names() {
        assert_eq!(type_name("person").unwrap(), "Person");
        assert_eq!(type_name("myCustomObject").unwrap(), "MyCustomObject");
        assert_eq!(module_name("myCustomObject").unwrap(), "my_custom_object");
        assert_eq!(metadata_const("opportunity").unwrap(), "OPPORTUNITY_METADATA");
        assert_eq!(
            metadata_const("workspaceMember").unwrap(),
            "WORKSPACE_MEMBER_METADATA"
        );
    }

    #[test]
    fn test_field_method_names() {
        assert_eq!(getter_name("jobTitle").unwrap(), "job_title");
        assert_eq!(setter_name("jobTitle").unwrap(), "set_job_title");
        assert_eq!(getter_name("type").unwrap(), "r#type");
        assert_eq!(setter_name("type").unwrap(), "set_type");
        assert_eq!(getter_name("self").unwrap(), "self_");
        assert_eq!(getter_name("new").unwrap(), "new_field");
    }

    #[test]
    fn test_unusable_names() {
        assert!(type_name("").is_err());
        assert!(type_name("--").is_err());
        assert!(getter_name("2fa").unwrap().starts_with('_'));
    }
}
