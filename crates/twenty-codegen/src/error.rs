//! Error types for twenty-codegen.

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
    #[error("Render error: {0}")]
    Render(String),
    /// A metadata name that yields no usable Rust identifier.
    #[error("Cannot derive a Rust identifier from '{0}'")]
    InvalidName(String),
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error {
            kind: ErrorKind::Render(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
