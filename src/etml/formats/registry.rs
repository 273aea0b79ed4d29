//! Format registry for document serialization
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`.

use crate::etml::document::Document;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Trait for document formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    /// Serialize a document to this format
    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of document formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a document using the named format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(doc)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::JsonFormatter);
        registry.register(super::MarkupFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::YamlFormatter);

        registry
    }
}

/// Shared registry holding the built-in formatters
pub static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
