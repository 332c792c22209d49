use std::fmt;

use ranking_core::{Category, ErrorKind, Product, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        token: RequestToken,
        category: Category,
        result: Result<Vec<Product>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Collapses the transport detail onto the kind the load state records.
    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            FailureKind::Malformed => ErrorKind::Parse,
            FailureKind::InvalidEndpoint
            | FailureKind::HttpStatus(_)
            | FailureKind::Timeout
            | FailureKind::TooLarge { .. }
            | FailureKind::Network => ErrorKind::Network,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Malformed,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed payload"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
