//! Error types for book request handlers.

use std::error::Error;
use std::fmt;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Outcome of a rejected request. The message is meant for the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Malformed identifier or undecodable request.
    BadRequest(String),
    /// A field failed validation.
    InvalidInput(String),
    /// Another book already has this title and author.
    Conflict(String),
    /// No book at the given id, or no books at all.
    NotFound(String),
    /// The store itself failed. The message never reaches the caller.
    Store(StoreError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::BadRequest(msg)
            | HandlerError::InvalidInput(msg)
            | HandlerError::Conflict(msg)
            | HandlerError::NotFound(msg) => f.write_str(msg),
            HandlerError::Store(_) => f.write_str("internal storage error"),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::InvalidInput(err.0)
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Store(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::BadRequest(err.to_string())
    }
}

impl HandlerError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::BadRequest(_) => "bad_request",
            HandlerError::InvalidInput(_) => "invalid_input",
            HandlerError::Conflict(_) => "conflict",
            HandlerError::NotFound(_) => "not_found",
            HandlerError::Store(_) => "internal",
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::BadRequest(_) => 400,
            HandlerError::InvalidInput(_) => 400,
            HandlerError::Conflict(_) => 409,
            HandlerError::NotFound(_) => 404,
            HandlerError::Store(_) => 500,
        }
    }
}
