//! File processing API
//!
//! Processing runs a script through one stage (tokens or the parsed
//! document) and renders the result in a named format. Format strings are
//! `<stage>-<format>`:
//!
//! - `token-simple`, `token-json`
//! - `document-<name>` for every format in the
//!   [`FormatRegistry`](crate::etml::formats::FormatRegistry)
//!   (`document-json`, `document-markup`, `document-treeviz`, `document-yaml`)

use crate::etml::error::MarkupError;
use crate::etml::formats::{FormatError, DEFAULT_REGISTRY};
use crate::etml::lexer::{tokenize_with_spans, Token};
use crate::etml::parser::{parse_with_options, ParseOptions};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Document,
}

/// Output format for the token stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFormat {
    Simple,
    Json,
}

/// Represents the output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Token(TokenFormat),
    /// Name of a registered document formatter
    Document(String),
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "document-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, rest) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        match stage {
            "token" => {
                let format = match rest {
                    "simple" => TokenFormat::Simple,
                    "json" => TokenFormat::Json,
                    _ => return Err(ProcessingError::InvalidFormatType(rest.to_string())),
                };
                Ok(ProcessingSpec {
                    stage: ProcessingStage::Token,
                    format: OutputFormat::Token(format),
                })
            }
            "document" => {
                if !DEFAULT_REGISTRY.has(rest) {
                    return Err(ProcessingError::InvalidFormatType(rest.to_string()));
                }
                Ok(ProcessingSpec {
                    stage: ProcessingStage::Document,
                    format: OutputFormat::Document(rest.to_string()),
                })
            }
            _ => Err(ProcessingError::InvalidStage(stage.to_string())),
        }
    }

    /// Build a document-stage spec for a registered format name
    pub fn document(format: &str) -> Result<Self, ProcessingError> {
        Self::from_string(&format!("document-{}", format))
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Markup(MarkupError),
    Format(FormatError),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Markup(err) => write!(f, "{}", err),
            ProcessingError::Format(err) => write!(f, "{}", err),
        }
    }
}

impl From<MarkupError> for ProcessingError {
    fn from(err: MarkupError) -> Self {
        ProcessingError::Markup(err)
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Format(err)
    }
}

/// Process a markup file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)
        .map_err(|e| ProcessingError::IoError(format!("{}: {}", file_path.display(), e)))?;
    process_source(&content, spec, options)
}

/// Process markup text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    match &spec.format {
        OutputFormat::Token(format) => format_tokens(source, format),
        OutputFormat::Document(name) => {
            let doc = parse_with_options(source, options)?;
            Ok(DEFAULT_REGISTRY.serialize(&doc, name)?)
        }
    }
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    token: Token,
    text: &'a str,
    start: usize,
    end: usize,
}

/// Format tokens according to the specified format
fn format_tokens(source: &str, format: &TokenFormat) -> Result<String, ProcessingError> {
    let records: Vec<TokenRecord> = tokenize_with_spans(source)
        .into_iter()
        .filter_map(|(token, span)| {
            let token = token?;
            Some(TokenRecord {
                token,
                text: source.get(span.clone())?,
                start: span.start,
                end: span.end,
            })
        })
        .collect();

    match format {
        TokenFormat::Simple => {
            let mut result = String::new();
            for record in &records {
                if record.token.is_literal() {
                    result.push_str(&format!(
                        "<{}:{}>",
                        token_name(&record.token),
                        record.text
                    ));
                } else {
                    result.push_str(&record.token.to_string());
                }
            }
            Ok(result)
        }
        TokenFormat::Json => serde_json::to_string_pretty(&records)
            .map_err(|e| ProcessingError::Format(FormatError::SerializationError(e.to_string()))),
    }
}

fn token_name(token: &Token) -> String {
    token
        .to_string()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_string()
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    let mut formats = vec!["token-simple".to_string(), "token-json".to_string()];
    formats.extend(
        DEFAULT_REGISTRY
            .list_formats()
            .into_iter()
            .map(|name| format!("document-{}", name)),
    );
    formats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Token(TokenFormat::Simple));

        let spec = ProcessingSpec::from_string("document-json").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Document);
        assert_eq!(spec.format, OutputFormat::Document("json".into()));

        assert!(ProcessingSpec::from_string("invalid").is_err());
        assert!(ProcessingSpec::from_string("token-invalid").is_err());
        assert!(ProcessingSpec::from_string("document-invalid").is_err());
        assert_eq!(
            ProcessingSpec::from_string("ast-json"),
            Err(ProcessingError::InvalidStage("ast".into()))
        );
    }

    #[test]
    fn test_token_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output =
            process_source("[ANG]a \\[b[/ANG]", &spec, &ParseOptions::default()).unwrap();
        assert_eq!(
            output,
            "<open-tag><text:ANG><close-bracket><text:a ><escape:\\[><text:b><open-closing-tag><text:ANG><close-bracket>"
        );
    }

    #[test]
    fn test_token_json() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let output = process_source("[TRD]", &spec, &ParseOptions::default()).unwrap();
        assert!(output.contains("\"token\": \"OpenTag\""));
        assert!(output.contains("\"text\": \"TRD\""));
    }

    #[test]
    fn test_token_stage_does_not_validate() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert!(process_source("[ANG]open", &spec, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_document_stage() {
        let spec = ProcessingSpec::document("markup").unwrap();
        let output = process_source(
            "intro [ANG]grr[/ANG] outro",
            &spec,
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(output, "[ANG]grr[/ANG]");
    }

    #[test]
    fn test_document_stage_propagates_markup_errors() {
        let spec = ProcessingSpec::document("json").unwrap();
        let err = process_source("[ANG]open", &spec, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::Markup(e) if e.is_malformed()));
    }

    #[test]
    fn test_process_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[REL]phew[/REL]").expect("write script");

        let spec = ProcessingSpec::document("treeviz").unwrap();
        let output = process_file(file.path(), &spec, &ParseOptions::default()).unwrap();
        assert_eq!(output, "Document (1 segments)\n└─ relieved: phew\n");
    }

    #[test]
    fn test_process_missing_file() {
        let spec = ProcessingSpec::document("json").unwrap();
        let err = process_file("/no/such/script.txt", &spec, &ParseOptions::default());
        assert!(matches!(err, Err(ProcessingError::IoError(_))));
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert!(formats.contains(&"token-simple".to_string()));
        assert!(formats.contains(&"token-json".to_string()));
        assert!(formats.contains(&"document-yaml".to_string()));
        assert_eq!(formats.len(), 6);
    }
}
