use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
    InvalidArgument,
    InvalidInput,
    Internal,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    /// Parse failure at a 1-based line of an input file.
    pub fn parse_at(path: &Path, line: usize, reason: impl std::fmt::Display) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: format!("{}:{}: {}", path.display(), line, reason),
        }
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error {
            kind: ErrorKind::InvalidArgument,
            context: context.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: format!("JSON error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
