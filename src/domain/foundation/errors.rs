//! Error kinds shared across ports.
//!
//! "Not found" is an explicit variant returned from repository calls rather
//! than a package-level sentinel, so callers match on the kind instead of
//! comparing error values.

use thiserror::Error;

/// Error constructing an identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} id cannot be empty")]
pub struct InvalidIdError {
    kind: &'static str,
}

impl InvalidIdError {
    pub(crate) fn empty(kind: &'static str) -> Self {
        Self { kind }
    }
}

/// Errors returned by repository ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// Any other persistence failure. The message is surfaced to API clients
    /// in the 500 envelope, so implementations should keep it descriptive but
    /// free of connection secrets.
    #[error("{message}")]
    Backend { message: String },
}

impl RepositoryError {
    /// Creates a backend failure error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns true for the not-found kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Errors returned by the event publisher port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The transport rejected or failed to deliver the publish call.
    #[error("publish failed: {message}")]
    Transport { message: String },
}

impl PublishError {
    /// Creates a transport failure error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
