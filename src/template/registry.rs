//! Registry of component bindings for capitalized names

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use tracing::debug;

use super::resolver::is_component_name;
use crate::value::Value;

/// Errors that can occur during component registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Name already bound
    #[error("duplicate component definition: {name}")]
    Duplicate { name: String },

    /// Component names must start with an uppercase letter
    #[error("invalid component name: {name} (must start with an uppercase letter)")]
    InvalidName { name: String },
}

/// Name -> value bindings consulted when a capitalized name is first classified
///
/// Bindings are write-once: a name that has already been classified keeps its
/// cached handler, so rebinding it could never take effect.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: RwLock<HashMap<String, Value>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a component name to a value
    pub fn register(&self, name: impl Into<String>, value: impl Into<Value>) -> Result<(), RegistryError> {
        let name = name.into();
        if !is_component_name(&name) {
            return Err(RegistryError::InvalidName { name });
        }

        let mut components = self.components.write().unwrap_or_else(PoisonError::into_inner);
        if components.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        debug!(component = %name, "registered component");
        components.insert(name, value.into());
        Ok(())
    }

    /// Look up a binding
    pub fn get(&self, name: &str) -> Option<Value> {
        self.components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Check if a name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// All bound names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.components.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every binding
    pub fn clear(&self) {
        self.components.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
