//! Error types for twenty-rest.

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for entity, service and filter operations.
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

    /// HTTP status of the transport failure behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Client { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport or API failure.
    #[error("Client error: {message}")]
    Client {
        status: Option<u16>,
        message: String,
    },

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Codec error: {0}")]
    Codec(String),

    /// Update called on an entity that has no id yet.
    #[error("Cannot {operation} {object}: entity has no id")]
    MissingId { object: String, operation: String },

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown field '{field}' on {object}")]
    UnknownField { object: String, field: String },

    #[error("Invalid value '{value}' for select field '{field}'")]
    InvalidSelectValue { field: String, value: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Unknown relation '{relation}' on {object}")]
    UnknownRelation { object: String, relation: String },
}

impl From<twenty_client::Error> for Error {
    fn from(err: twenty_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client {
                status: err.status(),
                message: err.to_string(),
            },
            source: Some(Box::new(err)),
        }
    }
}

impl From<twenty_metadata::Error> for Error {
    fn from(err: twenty_metadata::Error) -> Self {
        Error {
            kind: ErrorKind::Metadata(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<twenty_codec::Error> for Error {
    fn from(err: twenty_codec::Error) -> Self {
        Error {
            kind: ErrorKind::Codec(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
