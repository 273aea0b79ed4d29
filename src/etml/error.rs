//! Error and diagnostic types for markup parsing
//!
//! Parsing is all-or-nothing: any [`MarkupError`] aborts the parse and no
//! partial document is handed back. Conditions that do not abort the parse
//! (currently only unknown modifier codes) are reported as [`Diagnostic`]s
//! alongside the successful result.

use serde::Serialize;
use std::fmt;

/// A location in the source text.
///
/// `offset` is a byte offset into the source; `line` and `column` are 0-based,
/// with the column counted in characters so multi-byte text reports sensibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for display
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Provides conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end.
    pub fn position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);

        Position::new(offset, line, column)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Why a piece of markup was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MalformedReason {
    /// End of input inside a tag body or a closing tag.
    UnterminatedTag { code: String },
    /// End of input after `[` before the code was closed with `]`.
    UnterminatedTagName,
    /// `[]` with nothing between the brackets.
    EmptyTagCode,
    /// A tag code holding anything but ASCII uppercase letters.
    InvalidTagCode,
    /// `]` with no open `[`.
    StrayClosingBracket,
    /// `[/` while no tag is open.
    UnexpectedClosingTag,
    /// `[` inside a tag body. Tags do not nest.
    NestedTag { code: String },
    /// `[/FOUND]` closing a tag opened as `[EXPECTED]`.
    MismatchedClosingTag { expected: String, found: String },
    /// Non-whitespace text between tags when outside text is rejected.
    TextOutsideTag,
    /// Input the lexer could not classify.
    UnrecognizedInput,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::UnterminatedTag { code } => {
                write!(f, "tag [{}] is never closed", code)
            }
            MalformedReason::UnterminatedTagName => write!(f, "tag name is never closed with ']'"),
            MalformedReason::EmptyTagCode => write!(f, "tag has an empty code"),
            MalformedReason::InvalidTagCode => {
                write!(f, "tag code must be ASCII uppercase letters")
            }
            MalformedReason::StrayClosingBracket => write!(f, "stray ']' with no matching '['"),
            MalformedReason::UnexpectedClosingTag => {
                write!(f, "closing tag '[/' with no open tag")
            }
            MalformedReason::NestedTag { code } => {
                write!(f, "unescaped '[' inside the body of [{}]", code)
            }
            MalformedReason::MismatchedClosingTag { expected, found } => {
                write!(f, "tag [{}] closed by [/{}]", expected, found)
            }
            MalformedReason::TextOutsideTag => write!(f, "text outside of a tag"),
            MalformedReason::UnrecognizedInput => write!(f, "unrecognized input"),
        }
    }
}

/// Errors that abort a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The markup does not follow the tag grammar.
    MalformedMarkup {
        position: Position,
        reason: MalformedReason,
    },
    /// The document holds more segments than the configured bound allows.
    CapacityExceeded { limit: usize, found: usize },
}

impl MarkupError {
    pub(crate) fn malformed(position: Position, reason: MalformedReason) -> Self {
        MarkupError::MalformedMarkup { position, reason }
    }

    /// Returns the source position for malformed markup errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            MarkupError::MalformedMarkup { position, .. } => Some(*position),
            MarkupError::CapacityExceeded { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, MarkupError::MalformedMarkup { .. })
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::MalformedMarkup { position, reason } => {
                write!(f, "Malformed markup at {}: {}", position, reason)
            }
            MarkupError::CapacityExceeded { limit, found } => write!(
                f,
                "Document holds {} segments, more than the limit of {}",
                found, limit
            ),
        }
    }
}

impl std::error::Error for MarkupError {}

/// Non-fatal findings reported next to a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A tag code with no modifier; the segment resolved to `none`.
    UnknownModifierCode { code: String, position: Position },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownModifierCode { code, position } => write!(
                f,
                "Unknown modifier code [{}] at {}, treated as none",
                code, position
            ),
        }
    }
}

/// Format source context around an error position
///
/// Shows up to 2 lines before the error, the error line with a `>>` marker,
/// and up to 2 lines after. Lines are numbered from 1.
pub fn format_source_context(source: &str, position: &Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}
