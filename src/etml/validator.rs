//! Markup validation predicates
//!
//! Callers use these to decide whether a script should be parsed as markup at
//! all, or treated as plain unmarked text. All of them are pure functions over
//! the input and share no state with a running parse.

use crate::etml::error::{MalformedReason, MarkupError, SourceLocation};
use crate::etml::lexer::{tokenize_with_spans, Token};
use crate::etml::parser::parse_document;

/// Returns `true` when the text holds at least one `[` ... `]` bracket pair.
///
/// Escaped brackets do not count.
pub fn is_markup_bearing(text: &str) -> bool {
    let mut open = false;
    for (token, _) in tokenize_with_spans(text) {
        match token {
            Some(Token::OpenTag) | Some(Token::OpenClosingTag) => open = true,
            Some(Token::CloseBracket) if open => return true,
            _ => {}
        }
    }
    false
}

/// Check that every bracket opened is closed before the next one opens.
///
/// This only looks at bracket balance; it does not check that tags pair up
/// or that codes match. Plain text with no brackets is balanced.
pub fn check_balanced(text: &str) -> Result<(), MarkupError> {
    let location = SourceLocation::new(text);
    let mut open: Option<usize> = None;

    for (token, span) in tokenize_with_spans(text) {
        match token {
            Some(Token::OpenTag) | Some(Token::OpenClosingTag) => {
                if let Some(start) = open {
                    return Err(MarkupError::malformed(
                        location.position(start),
                        MalformedReason::UnterminatedTagName,
                    ));
                }
                open = Some(span.start);
            }
            Some(Token::CloseBracket) => {
                if open.take().is_none() {
                    return Err(MarkupError::malformed(
                        location.position(span.start),
                        MalformedReason::StrayClosingBracket,
                    ));
                }
            }
            Some(_) => {}
            None => {
                return Err(MarkupError::malformed(
                    location.position(span.start),
                    MalformedReason::UnrecognizedInput,
                ))
            }
        }
    }

    match open {
        Some(start) => Err(MarkupError::malformed(
            location.position(start),
            MalformedReason::UnterminatedTagName,
        )),
        None => Ok(()),
    }
}

/// Returns `true` when the text bears markup and parses cleanly with the
/// default options.
pub fn is_well_formed_markup(text: &str) -> bool {
    is_markup_bearing(text) && parse_document(text).is_ok()
}
