//! Configuration loading
//!
//! `defaults/etml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`EtmlConfig`].

use crate::etml::parser::{OutsideText, ParseOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/etml.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EtmlConfig {
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
}

/// Parser knobs, see [`ParseOptions`]
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub outside_text: OutsideText,
    pub strict_closing: bool,
    #[serde(default)]
    pub max_segments: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

impl From<&ParsingConfig> for ParseOptions {
    fn from(config: &ParsingConfig) -> Self {
        ParseOptions {
            outside_text: config.outside_text,
            strict_closing: config.strict_closing,
            max_segments: config.max_segments,
        }
    }
}

impl EtmlConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::from(&self.parsing)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EtmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
