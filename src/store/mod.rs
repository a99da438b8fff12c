//! Context Store
//!
//! Registry of named contexts. Enforces name rules and uniqueness and delegates
//! persistence to a [`ContextStorage`] port, so the same registry runs over a
//! directory on disk or an in-memory map.

pub mod memory;
pub mod persistence;

pub use memory::MemoryContextStorage;
pub use persistence::FileContextStorage;

use crate::context::{validate_name, Context, ContextSummary};
use crate::endpoint::{EndpointDescriptor, EndpointKind};
use crate::error::ContextError;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Persistence port for context records.
///
/// Implementations must make `insert` and `replace` all-or-nothing and must
/// make `insert` fail with `AlreadyExists` when the name is taken, even when
/// the competing writer lives in another process.
pub trait ContextStorage: Send + Sync {
    /// Names of all published records, in no particular order
    fn names(&self) -> Result<Vec<String>, ContextError>;

    fn load(&self, name: &str) -> Result<Option<Context>, ContextError>;

    /// Publish a new record
    fn insert(&self, context: &Context) -> Result<(), ContextError>;

    /// Replace an existing record wholesale
    fn replace(&self, context: &Context) -> Result<(), ContextError>;

    fn delete(&self, name: &str) -> Result<(), ContextError>;

    /// Human-readable location for diagnostics
    fn location(&self) -> String;
}

/// Context registry
pub struct ContextStore {
    storage: Arc<dyn ContextStorage>,
    current_context: Option<String>,
}

impl ContextStore {
    /// Create a store over the given storage
    pub fn with_storage(storage: Arc<dyn ContextStorage>) -> Self {
        Self {
            storage,
            current_context: None,
        }
    }

    /// Open a directory-backed store rooted at `root`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, ContextError> {
        Ok(Self::with_storage(Arc::new(FileContextStorage::open(root)?)))
    }

    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(MemoryContextStorage::new()))
    }

    /// Name of the context the outer tool currently targets. Removing it is refused.
    pub fn with_current_context(mut self, name: Option<String>) -> Self {
        self.current_context = name;
        self
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Create a context holding a single endpoint of `kind`
    pub fn create(
        &self,
        name: &str,
        kind: EndpointKind,
        description: &str,
        descriptor: EndpointDescriptor,
    ) -> Result<(), ContextError> {
        validate_name(name)?;
        if descriptor.kind() != kind {
            return Err(ContextError::ConflictingOptions(format!(
                "context type {} does not match {} endpoint payload",
                kind,
                descriptor.kind()
            )));
        }
        self.create_context(&Context::new(name, description, descriptor))
    }

    /// Create a fully composed context. Nothing is written unless the whole
    /// record is valid.
    pub fn create_context(&self, context: &Context) -> Result<(), ContextError> {
        context.validate()?;
        debug!(
            context = %context.name,
            context_type = %context.context_type,
            endpoints = context.endpoints.len(),
            "Creating context"
        );
        self.storage.insert(context)?;
        info!(context = %context.name, location = %self.storage.location(), "Context created");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Context, ContextError> {
        validate_name(name)?;
        self.storage
            .load(name)?
            .ok_or_else(|| ContextError::NotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> Result<bool, ContextError> {
        validate_name(name)?;
        Ok(self.storage.load(name)?.is_some())
    }

    /// Replace an existing context wholesale. Concurrent updates are
    /// last-writer-wins.
    pub fn update(&self, context: &Context) -> Result<(), ContextError> {
        context.validate()?;
        self.storage.replace(context)?;
        info!(context = %context.name, "Context updated");
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Result<(), ContextError> {
        validate_name(name)?;
        if !self.exists(name)? {
            return Err(ContextError::NotFound(name.to_string()));
        }
        if self.current_context.as_deref() == Some(name) {
            return Err(ContextError::InUse(name.to_string()));
        }
        self.storage.delete(name)?;
        info!(context = %name, "Context removed");
        Ok(())
    }

    /// Snapshot of the names present now; records are loaded lazily while
    /// iterating.
    pub fn list(&self) -> Result<ContextList<'_>, ContextError> {
        let mut names = self.storage.names()?;
        names.sort();
        names.dedup();
        Ok(ContextList {
            storage: self.storage.as_ref(),
            names,
        })
    }

    pub fn len(&self) -> Result<usize, ContextError> {
        Ok(self.storage.names()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ContextError> {
        Ok(self.len()? == 0)
    }
}

/// Name-ordered listing. Each call to [`ContextList::iter`] walks the
/// snapshot again from the start.
pub struct ContextList<'a> {
    storage: &'a dyn ContextStorage,
    names: Vec<String>,
}

impl<'a> ContextList<'a> {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> ContextIter<'_> {
        ContextIter {
            storage: self.storage,
            names: self.names.iter(),
        }
    }
}

impl<'l, 'a> IntoIterator for &'l ContextList<'a> {
    type Item = Result<ContextSummary, ContextError>;
    type IntoIter = ContextIter<'l>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ContextIter<'a> {
    storage: &'a dyn ContextStorage,
    names: std::slice::Iter<'a, String>,
}

impl Iterator for ContextIter<'_> {
    type Item = Result<ContextSummary, ContextError>;

    fn next(&mut self) -> Option<Self::Item> {
        for name in self.names.by_ref() {
            match self.storage.load(name) {
                Ok(Some(context)) => return Some(Ok(context.summary())),
                // Removed after the snapshot was taken
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.names.len()))
    }
}
