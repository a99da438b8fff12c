//! Raw endpoint option maps, as collected from `key=value,key=value` flags.

use crate::error::ContextError;
use std::collections::BTreeMap;

/// Option key naming the context to copy an endpoint from
pub const KEY_FROM: &str = "from";

/// Raw key/value options for one endpoint kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOptions {
    values: BTreeMap<String, String>,
}

impl EndpointOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `key=value` list. Later duplicates win.
    ///
    /// `scope` names the flag the text came from, for error reporting.
    pub fn parse(scope: &str, raw: &str) -> Result<Self, ContextError> {
        let mut options = Self::new();
        for pair in raw.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ContextError::invalid_option(scope, pair, "expected key=value")
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ContextError::invalid_option(scope, pair, "missing key"));
            }
            options.values.insert(key.to_string(), value.trim().to_string());
        }
        Ok(options)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Source context named by the `from` key
    pub fn from_context(&self) -> Option<&str> {
        self.get(KEY_FROM)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Options other than `from`, i.e. the field overrides
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, _)| *k != KEY_FROM)
    }

    /// Fail on the first key not in `allowed`
    pub fn validate_keys(&self, scope: &str, allowed: &[&str]) -> Result<(), ContextError> {
        match self.values.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(key) => Err(ContextError::invalid_option(
                scope,
                key,
                format!("unknown option (allowed: {})", allowed.join(", ")),
            )),
            None => Ok(()),
        }
    }
}

/// Parse a boolean option value
pub(crate) fn parse_bool(scope: &str, key: &str, value: &str) -> Result<bool, ContextError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ContextError::invalid_option(
            scope,
            key,
            format!("expected a boolean, got {:?}", value),
        )),
    }
}

/// Reject empty values for keys that map onto typed fields
pub(crate) fn non_empty(scope: &str, key: &str, value: &str) -> Result<String, ContextError> {
    if value.is_empty() {
        return Err(ContextError::invalid_option(scope, key, "value cannot be empty"));
    }
    Ok(value.to_string())
}
