//! Configuration System
//!
//! Layered configuration for the store location, the current context, and
//! logging. Sources, lowest precedence first: built-in defaults, the global
//! XDG file, an explicit `--config` file, and `CTXSTORE_*` environment
//! variables.

use crate::context::validate_name;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use sources::env::ENV_PREFIX;

/// XDG path helpers
pub mod xdg {
    pub use super::paths::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtxConfig {
    #[serde(default)]
    pub store: StoreConfig,

    /// Context the caller currently targets; it cannot be removed
    #[serde(default)]
    pub current_context: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `contexts/`. Defaults to `$XDG_CONFIG_HOME/ctxstore`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolve_root(&self) -> Result<PathBuf, ApiError> {
        self.root
            .clone()
            .or_else(paths::default_store_root)
            .ok_or_else(|| {
                ApiError::ConfigError(
                    "Cannot determine store root; set store.root or CTXSTORE_STORE__ROOT"
                        .to_string(),
                )
            })
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Store(String),
    CurrentContext(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::CurrentContext(msg) => write!(f, "Current context: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl CtxConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(root) = &self.store.root {
            if root.as_os_str().is_empty() {
                errors.push(ValidationError::Store("Store root cannot be empty".to_string()));
            }
        }

        if let Some(name) = &self.current_context {
            if let Err(e) = validate_name(name) {
                errors.push(ValidationError::CurrentContext(e.to_string()));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all problems into one error
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}
