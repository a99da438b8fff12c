//! In-process context storage, for embedding and tests.

use crate::context::Context;
use crate::error::ContextError;
use crate::store::ContextStorage;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryContextStorage {
    records: RwLock<BTreeMap<String, Context>>,
}

impl MemoryContextStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextStorage for MemoryContextStorage {
    fn names(&self) -> Result<Vec<String>, ContextError> {
        Ok(self.records.read().keys().cloned().collect())
    }

    fn load(&self, name: &str) -> Result<Option<Context>, ContextError> {
        Ok(self.records.read().get(name).cloned())
    }

    fn insert(&self, context: &Context) -> Result<(), ContextError> {
        match self.records.write().entry(context.name.clone()) {
            Entry::Occupied(_) => Err(ContextError::AlreadyExists(context.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(context.clone());
                Ok(())
            }
        }
    }

    fn replace(&self, context: &Context) -> Result<(), ContextError> {
        match self.records.write().get_mut(&context.name) {
            Some(existing) => {
                *existing = context.clone();
                Ok(())
            }
            None => Err(ContextError::NotFound(context.name.clone())),
        }
    }

    fn delete(&self, name: &str) -> Result<(), ContextError> {
        self.records
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ContextError::NotFound(name.to_string()))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
