//! Data formats: JSON, YAML and markup itself

use super::registry::{FormatError, Formatter};
use crate::etml::document::Document;

/// Pretty JSON, `{"segments": [{"modifier": "angry", "text": "..."}]}`
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Segments as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Segments as YAML"
    }
}

/// Canonical markup. Fails on segments with the neutral modifier.
pub struct MarkupFormatter;

impl Formatter for MarkupFormatter {
    fn name(&self) -> &str {
        "markup"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        doc.to_markup()
    }

    fn description(&self) -> &str {
        "Canonical [CODE]text[/CODE] markup"
    }
}
