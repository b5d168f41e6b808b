//! Unwrapping of REST response envelopes.

use serde_json::{Map, Value};
use twenty_metadata::EntitySchema;

use crate::entity::Entity;
use crate::error::{Error, ErrorKind, Result};

/// One page of a list response.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Entity>,
    pub total_count: Option<u64>,
    pub has_next_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn data_object(body: &Value) -> Option<&Map<String, Value>> {
    body.get("data").and_then(Value::as_object)
}

/// Extract the single object from a read, create or update response.
///
/// Accepted shapes, in order: `data.<object>`, `data.create<Object>`,
/// `data.update<Object>`, then `data` itself.
pub fn unwrap_single<'a>(body: &'a Value, object_name: &str) -> Result<&'a Map<String, Value>> {
    let data = data_object(body).ok_or_else(|| {
        Error::new(ErrorKind::UnexpectedResponse(format!(
            "expected an object under 'data' for {object_name}"
        )))
    })?;

    let capitalized = capitalize(object_name);
    let keys = [
        object_name.to_string(),
        format!("create{capitalized}"),
        format!("update{capitalized}"),
    ];
    for key in &keys {
        match data.get(key) {
            Some(Value::Object(object)) => return Ok(object),
            Some(other) => {
                return Err(Error::new(ErrorKind::UnexpectedResponse(format!(
                    "'data.{key}' is not an object: {other}"
                ))))
            }
            None => {}
        }
    }
    Ok(data)
}

/// Extract a list of objects.
///
/// Looks under `data.<plural>`, then `data.create<Plural>` (batch
/// responses), then accepts `data` itself when it is an array. Anything
/// else yields an empty list.
pub fn unwrap_list<'a>(body: &'a Value, plural: &str) -> Vec<&'a Map<String, Value>> {
    let list = match body.get("data") {
        Some(Value::Array(items)) => Some(items),
        Some(Value::Object(data)) => data
            .get(plural)
            .or_else(|| data.get(&format!("create{}", capitalize(plural))))
            .and_then(Value::as_array),
        _ => None,
    };
    list.map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Build a [`Page`] from a list response.
///
/// `pageInfo` and `totalCount` are read at the top level, or inside `data`
/// when the server nests them there.
pub fn parse_page(body: &Value, schema: &EntitySchema) -> Page {
    let items = unwrap_list(body, schema.object_name_plural())
        .into_iter()
        .map(|wire| Entity::from_wire(schema.clone(), wire))
        .collect();

    let lookup = |key: &str| {
        body.get(key)
            .or_else(|| data_object(body).and_then(|data| data.get(key)))
    };
    let page_info = lookup("pageInfo");
    let cursor = |key: &str| {
        page_info
            .and_then(|info| info.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Page {
        items,
        total_count: lookup("totalCount").and_then(Value::as_u64),
        has_next_page: page_info
            .and_then(|info| info.get("hasNextPage"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        start_cursor: cursor("startCursor"),
        end_cursor: cursor("endCursor"),
    }
}
