//! Implementation of the markup lexer
//!
//! Convenience functions for tokenizing markup text on top of logos.

use crate::etml::lexer::tokens::Token;
use logos::Logos;
use std::ops::Range;

/// A token paired with its byte range in the source. A token of `None` marks
/// input logos could not classify.
pub type TokenSpan = (Option<Token>, Range<usize>);

/// Tokenize a string and collect tokens with their spans
pub fn tokenize_with_spans(source: &str) -> Vec<TokenSpan> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push((result.ok(), lexer.span()));
    }

    tokens
}
