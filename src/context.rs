//! Context records
//!
//! A context is the unit the store persists: a unique name, a free-text
//! description, and one endpoint descriptor per endpoint kind.

use crate::endpoint::{EndpointDescriptor, EndpointKind};
use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata layout version written with every record
pub const METADATA_VERSION: &str = "1";

/// Name of the implicit engine context owned by the outer tool
pub const RESERVED_CONTEXT_NAME: &str = "default";

pub const MAX_NAME_LEN: usize = 128;

/// Persisted context record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Kind the context was created as
    pub context_type: EndpointKind,
    #[serde(default)]
    pub endpoints: BTreeMap<EndpointKind, EndpointDescriptor>,
    /// Opaque passthrough, never validated here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_stack_orchestrator: Option<String>,
    #[serde(default = "default_metadata_version")]
    pub metadata_version: String,
}

fn default_metadata_version() -> String {
    METADATA_VERSION.to_string()
}

impl Context {
    /// Create a context holding a single endpoint
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        descriptor: EndpointDescriptor,
    ) -> Self {
        let context_type = descriptor.kind();
        let mut endpoints = BTreeMap::new();
        endpoints.insert(context_type, descriptor);
        Self {
            name: name.into(),
            description: description.into(),
            context_type,
            endpoints,
            default_stack_orchestrator: None,
            metadata_version: default_metadata_version(),
        }
    }

    pub fn endpoint(&self, kind: EndpointKind) -> Option<&EndpointDescriptor> {
        self.endpoints.get(&kind)
    }

    /// Insert or replace the descriptor for its kind
    pub fn set_endpoint(&mut self, descriptor: EndpointDescriptor) {
        self.endpoints.insert(descriptor.kind(), descriptor);
    }

    pub fn endpoint_kinds(&self) -> Vec<EndpointKind> {
        self.endpoints.keys().copied().collect()
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            context_type: self.context_type,
            endpoint_kinds: self.endpoint_kinds(),
        }
    }

    /// Check the record is storable: valid name and every descriptor filed
    /// under its own kind.
    pub fn validate(&self) -> Result<(), ContextError> {
        validate_name(&self.name)?;
        for (kind, descriptor) in &self.endpoints {
            if descriptor.kind() != *kind {
                return Err(ContextError::ConflictingOptions(format!(
                    "{} endpoint stored under {} key",
                    descriptor.kind(),
                    kind
                )));
            }
        }
        Ok(())
    }
}

/// Row returned by store listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub name: String,
    pub description: String,
    pub context_type: EndpointKind,
    pub endpoint_kinds: Vec<EndpointKind>,
}

/// Validate a context name for use as a store key and file name.
///
/// Names start with an ASCII letter or digit and continue with letters,
/// digits, `_`, `.`, `+` or `-`.
pub fn validate_name(name: &str) -> Result<(), ContextError> {
    if name.is_empty() {
        return Err(ContextError::invalid_name(name, "name cannot be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ContextError::invalid_name(
            name,
            format!("name is longer than {} characters", MAX_NAME_LEN),
        ));
    }
    if name == RESERVED_CONTEXT_NAME {
        return Err(ContextError::invalid_name(name, "name is reserved"));
    }

    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphanumeric())
        .unwrap_or(false);
    if !first_ok {
        return Err(ContextError::invalid_name(
            name,
            "name must start with a letter or digit",
        ));
    }
    if let Some(bad) = chars.find(|c| !is_name_char(*c)) {
        return Err(ContextError::invalid_name(
            name,
            format!("character {:?} is not allowed", bad),
        ));
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-')
}
