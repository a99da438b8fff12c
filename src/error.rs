//! Error types for the context store and the application layer around it.

use crate::endpoint::EndpointKind;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error categories surfaced to callers of the store and builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    AlreadyExists,
    NotFound,
    InUse,
    InvalidOption,
    ConflictingOptions,
    PersistenceFailure,
}

/// Store and builder errors
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Invalid context name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Context already exists: {0}")]
    AlreadyExists(String),

    #[error("Context not found: {0}")]
    NotFound(String),

    #[error("Context {context} has no {kind} endpoint")]
    EndpointNotFound { context: String, kind: EndpointKind },

    #[error("Context {0} is the current context and cannot be removed")]
    InUse(String),

    #[error("Invalid {scope} option {key:?}: {reason}")]
    InvalidOption {
        scope: String,
        key: String,
        reason: String,
    },

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("Storage failure at {}: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContextError::InvalidName { .. } => ErrorKind::InvalidName,
            ContextError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ContextError::NotFound(_) | ContextError::EndpointNotFound { .. } => {
                ErrorKind::NotFound
            }
            ContextError::InUse(_) => ErrorKind::InUse,
            ContextError::InvalidOption { .. } => ErrorKind::InvalidOption,
            ContextError::ConflictingOptions(_) => ErrorKind::ConflictingOptions,
            ContextError::PersistenceFailure { .. } => ErrorKind::PersistenceFailure,
        }
    }

    /// Only storage I/O failures may succeed on retry. A record that fails to
    /// decode stays broken until it is rewritten.
    pub fn is_transient(&self) -> bool {
        match self {
            ContextError::PersistenceFailure { source, .. } => {
                source.kind() != std::io::ErrorKind::InvalidData
            }
            _ => false,
        }
    }

    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        ContextError::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_option(
        scope: impl Into<String>,
        key: &str,
        reason: impl Into<String>,
    ) -> Self {
        ContextError::InvalidOption {
            scope: scope.into(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContextError::PersistenceFailure {
            path: path.into(),
            source,
        }
    }
}

/// Application-level errors (CLI, configuration, logging)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
