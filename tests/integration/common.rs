use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use twenty_api::client::{Error, RequestMethod, RequestOptions, Result, Transport};
use twenty_api::metadata::{
    EntityDefinition, EnumOption, FieldMetadata, FieldType, RelationMetadata, RelationType,
};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Call {
    pub method: RequestMethod,
    pub path: String,
    pub options: RequestOptions,
}

type Route = (RequestMethod, String);

#[derive(Default)]
struct State {
    responses: HashMap<Route, VecDeque<Result<Value>>>,
    calls: Vec<Call>,
}

/// In-memory transport answering from scripted responses, recording every call.
///
/// Responses are queued per method and path. A request with nothing queued
/// fails with a 500.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: RequestMethod, path: &str, body: Value) -> &Self {
        self.push(method, path, Ok(body))
    }

    pub fn fail(&self, method: RequestMethod, path: &str, status: u16) -> &Self {
        self.push(method, path, Err(Error::api(status, format!("scripted {status}"))))
    }

    fn push(&self, method: RequestMethod, path: &str, response: Result<Value>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl Transport for MockTransport {
    fn request(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value>> + Send {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            method,
            path: path.to_string(),
            options,
        });
        let response = state
            .responses
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(Error::api(500, format!("no response for {method} {path}"))));
        async move { response }
    }
}

pub fn person_definition() -> EntityDefinition {
    EntityDefinition::builder("person", "people")
        .field(FieldMetadata::new("id", FieldType::Uuid).system(true))
        .field(FieldMetadata::new("name", FieldType::FullName))
        .field(FieldMetadata::new("emails", FieldType::Emails))
        .field(FieldMetadata::new("city", FieldType::Text))
        .field(FieldMetadata::new("jobTitle", FieldType::Text))
        .field(FieldMetadata::new("company", FieldType::Relation))
        .field(FieldMetadata::new("createdAt", FieldType::DateTime))
        .field(FieldMetadata::new("position", FieldType::Position).system(true))
        .relation(RelationMetadata::new(
            "company",
            RelationType::ManyToOne,
            "person",
            "company",
            "people",
        ))
        .build()
        .unwrap()
}

pub fn company_definition() -> EntityDefinition {
    EntityDefinition::builder("company", "companies")
        .field(FieldMetadata::new("id", FieldType::Uuid).system(true))
        .field(FieldMetadata::new("name", FieldType::Text))
        .field(FieldMetadata::new("annualRecurringRevenue", FieldType::Currency))
        .field(FieldMetadata::new("domainName", FieldType::Links))
        .field(
            FieldMetadata::new("tier", FieldType::Select).with_options([
                EnumOption::new("GOLD", "Gold"),
                EnumOption::new("SILVER", "Silver").with_position(1),
            ]),
        )
        .relation(RelationMetadata::new(
            "people",
            RelationType::OneToMany,
            "company",
            "person",
            "company",
        ))
        .build()
        .unwrap()
}

/// A `metadata/objects` body describing person and company.
pub fn objects_body() -> Value {
    json!({
        "data": {
            "objects": [
                {
                    "id": "obj-person",
                    "nameSingular": "person",
                    "namePlural": "people",
                    "fields": [
                        {"id": "f1", "name": "id", "type": "UUID", "isSystem": true, "isNullable": false},
                        {"id": "f2", "name": "name", "type": "FULL_NAME", "label": "Name"},
                        {"id": "f3", "name": "city", "type": "TEXT", "label": "City"},
                        {"id": "f4", "name": "createdAt", "type": "DATE_TIME", "label": "Creation date"},
                        {
                            "id": "f5", "name": "company", "type": "RELATION", "label": "Company",
                            "relation": {
                                "type": "MANY_TO_ONE",
                                "sourceObjectMetadata": {"nameSingular": "person"},
                                "targetObjectMetadata": {"nameSingular": "company"},
                                "targetFieldMetadata": {"name": "people"}
                            }
                        }
                    ]
                },
                {
                    "id": "obj-company",
                    "nameSingular": "company",
                    "namePlural": "companies",
                    "fields": [
                        {"id": "f6", "name": "id", "type": "UUID", "isSystem": true},
                        {"id": "f7", "name": "name", "type": "TEXT", "label": "Name"},
                        {"id": "f8", "name": "annualRecurringRevenue", "type": "CURRENCY", "label": "ARR"},
                        {
                            "id": "f9", "name": "people", "type": "RELATION", "label": "People",
                            "relation": {
                                "type": "ONE_TO_MANY",
                                "sourceObjectMetadata": {"nameSingular": "company"},
                                "targetObjectMetadata": {"nameSingular": "person"},
                                "targetFieldMetadata": {"name": "company"}
                            }
                        }
                    ]
                }
            ]
        }
    })
}

/// A list response with page info.
pub fn page(plural: &str, items: Value, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {plural: items},
        "pageInfo": {"hasNextPage": has_next_page, "endCursor": end_cursor},
        "totalCount": 5
    })
}
