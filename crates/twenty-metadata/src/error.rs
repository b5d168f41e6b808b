//! Error types for twenty-metadata.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Duplicate field '{field}' on object '{object}'")]
    DuplicateField { object: String, field: String },
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),
    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),
    #[error("Discovery error: {0}")]
    Discovery(String),
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<twenty_client::Error> for Error {
    fn from(err: twenty_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Json(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
