//! Validator-schema adapters.
//!
//! Route annotations may embed schema descriptions produced by third-party validation
//! libraries instead of JSON Schema. An adapter recognizes one library's description
//! format and converts it to JSON Schema; the [`AdapterRegistry`] picks the first adapter
//! that recognizes a value.
//!
//! Built-in adapters:
//!
//! - [`joi::JoiAdapter`] for Joi `describe()` output
//! - [`yup::YupAdapter`] for Yup `describe()` output
//! - [`zod::ZodAdapter`] for serialized Zod `_def` trees

pub mod joi;
pub mod yup;
pub mod zod;

use crate::error::Result;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::sync::{OnceLock, RwLock};

/// Converts one schema description format to JSON Schema.
pub trait SchemaAdapter: Send + Sync {
    /// Unique adapter name used as the registry key
    fn name(&self) -> &str;

    /// Whether `schema` is in this adapter's format
    fn detect(&self, schema: &Value) -> bool;

    /// Converts `schema` to JSON Schema.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::AdapterMismatch`] if `detect` rejects `schema`.
    fn convert(&self, schema: &Value) -> Result<Value>;
}

/// Ordered name -> adapter registry.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SchemaAdapter>>,
}

impl AdapterRegistry {
    /// Registry holding the built-in adapters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.reset();
        registry
    }

    /// Registry without any adapter
    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Process-wide registry, initialized with the built-in adapters on first use.
    ///
    /// Walkers without an explicit registry convert schemas through this one.
    pub fn global() -> &'static RwLock<AdapterRegistry> {
        static GLOBAL: OnceLock<RwLock<AdapterRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| RwLock::new(AdapterRegistry::new()))
    }

    /// Register an adapter. A name collision replaces the existing adapter in place.
    pub fn register(&mut self, adapter: Box<dyn SchemaAdapter>) {
        match self.position(adapter.name()) {
            Some(index) => {
                warn!("Replacing schema adapter '{}'", adapter.name());
                self.adapters[index] = adapter;
            }
            None => {
                debug!("Registering schema adapter '{}'", adapter.name());
                self.adapters.push(adapter);
            }
        }
    }

    /// Remove an adapter by name; returns whether it was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.adapters.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get_adapter(&self, name: &str) -> Option<&dyn SchemaAdapter> {
        self.position(name).map(|index| self.adapters[index].as_ref())
    }

    /// All adapters in registration order
    pub fn adapters(&self) -> Vec<&dyn SchemaAdapter> {
        self.adapters.iter().map(|a| a.as_ref()).collect()
    }

    /// Converts `schema` with the first adapter, in registration order, that detects it.
    ///
    /// Returns `None` if no adapter matches; never fails.
    pub fn detect_and_convert(&self, schema: &Value) -> Option<Value> {
        for adapter in &self.adapters {
            if !adapter.detect(schema) {
                continue;
            }
            match adapter.convert(schema) {
                Ok(converted) => return Some(converted),
                Err(e) => warn!("Schema adapter '{}' failed: {}", adapter.name(), e),
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.adapters.clear();
    }

    /// Restore the built-in adapter set
    pub fn reset(&mut self) {
        self.adapters = vec![
            Box::new(joi::JoiAdapter),
            Box::new(yup::YupAdapter),
            Box::new(zod::ZodAdapter),
        ];
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.adapters.iter().position(|a| a.name() == name)
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.adapters.iter().map(|a| a.name()))
            .finish()
    }
}

/// Helper for adapters building JSON Schema objects
pub(crate) fn schema_object(schema_type: Option<&str>) -> Map<String, Value> {
    let mut schema = Map::new();
    if let Some(t) = schema_type {
        schema.insert("type".to_string(), Value::String(t.to_string()));
    }
    schema
}
