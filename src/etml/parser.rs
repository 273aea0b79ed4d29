//! Public parsing API
//!
//! Source text goes through the [scanner](crate::etml::scanner), each raw tag
//! code is resolved to a [`Modifier`](crate::etml::modifier::Modifier), and the
//! results are assembled into a [`Document`]. A call either returns a complete
//! document or an error, never a partial document.
//!
//! ```text
//! let doc = parse_document("[ANG]I am furious[/ANG][REL]but now calm[/REL]")?;
//! assert_eq!(doc.len(), 2);
//! ```

use crate::etml::document::{assemble, Document};
use crate::etml::error::{Diagnostic, MarkupError};
use crate::etml::scanner::scan;
use log::debug;
use serde::{Deserialize, Serialize};

/// What to do with text that sits between tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutsideText {
    /// Ignore it. Plain text with no tags parses to an empty document.
    #[default]
    Discard,
    /// Fail on any outside text that is not whitespace.
    Reject,
}

/// Knobs for a single parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub outside_text: OutsideText,
    /// Require `[/CODE]` to repeat the opening code.
    pub strict_closing: bool,
    /// Upper bound on the number of segments. `None` means unbounded.
    pub max_segments: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            outside_text: OutsideText::Discard,
            strict_closing: true,
            max_segments: None,
        }
    }
}

/// A successful parse together with its non-fatal findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub document: Document,
    pub warnings: Vec<Diagnostic>,
}

/// Parse markup with the default options
pub fn parse_document(source: &str) -> Result<Document, MarkupError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse markup with explicit options
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Document, MarkupError> {
    parse_with_diagnostics(source, options).map(|parsed| parsed.document)
}

/// Parse markup and keep the diagnostics for unknown modifier codes
pub fn parse_with_diagnostics(
    source: &str,
    options: &ParseOptions,
) -> Result<Parsed, MarkupError> {
    debug!("parsing {} bytes with {:?}", source.len(), options);
    let tags = scan(source, options)?;
    let (document, warnings) = assemble(tags, options.max_segments)?;
    debug!(
        "parsed {} segments, {} warnings",
        document.len(),
        warnings.len()
    );
    Ok(Parsed { document, warnings })
}
