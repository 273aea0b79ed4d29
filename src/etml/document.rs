//! Segments and documents
//!
//! A [`Document`] is the ordered list of [`Segment`]s found in one script, in
//! source order. It owns its text and keeps no reference to the source.
//! Segments are built once during assembly and never change afterwards.

use crate::etml::error::{Diagnostic, MarkupError};
use crate::etml::formats::FormatError;
use crate::etml::modifier::Modifier;
use crate::etml::scanner::RawTag;
use log::warn;
use serde::{Deserialize, Serialize};

/// One contiguous span of text and the mood it is rendered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    modifier: Modifier,
    text: String,
}

impl Segment {
    pub fn new(modifier: Modifier, text: impl Into<String>) -> Self {
        Self {
            modifier,
            text: text.into(),
        }
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write this segment as `[CODE]text[/CODE]`, escaping brackets and
    /// backslashes in the text.
    pub fn to_markup(&self) -> Option<String> {
        let code = self.modifier.code()?;
        Some(format!("[{code}]{}[/{code}]", escape_text(&self.text)))
    }
}

/// Ordered segments of one parsed script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// The modifier of every segment, in order
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.segments.iter().map(Segment::modifier)
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Re-serialize the document as markup.
    ///
    /// Parsing the result yields an equal document. Segments with the neutral
    /// modifier have no tag code and cannot be written.
    pub fn to_markup(&self) -> Result<String, FormatError> {
        let mut markup = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            let tagged = segment.to_markup().ok_or_else(|| {
                FormatError::SerializationError(format!(
                    "segment {} has modifier '{}', which has no tag code",
                    index,
                    segment.modifier()
                ))
            })?;
            markup.push_str(&tagged);
        }
        Ok(markup)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Document {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl FromIterator<Segment> for Document {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Resolve raw tags into a document, in encounter order.
///
/// `limit` bounds the number of segments; exceeding it fails instead of
/// truncating. Unknown codes resolve to `Modifier::None` and are reported
/// as diagnostics.
pub(crate) fn assemble(
    tags: Vec<RawTag>,
    limit: Option<usize>,
) -> Result<(Document, Vec<Diagnostic>), MarkupError> {
    if let Some(limit) = limit {
        if tags.len() > limit {
            return Err(MarkupError::CapacityExceeded {
                limit,
                found: tags.len(),
            });
        }
    }

    let mut diagnostics = Vec::new();
    let mut segments = Vec::with_capacity(tags.len());

    for tag in tags {
        let modifier = match Modifier::lookup_code(&tag.code) {
            Some(modifier) => modifier,
            None => {
                warn!("unknown modifier code [{}] at {}", tag.code, tag.position);
                diagnostics.push(Diagnostic::UnknownModifierCode {
                    code: tag.code,
                    position: tag.position,
                });
                Modifier::None
            }
        };
        segments.push(Segment::new(modifier, tag.body));
    }

    Ok((Document::new(segments), diagnostics))
}

/// Escape the characters the scanner treats as markup
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
