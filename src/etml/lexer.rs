//! Lexer module for mood markup
//!
//! Tokenization is handled entirely by logos. The lexer does not know about
//! tags, it only splits the source into delimiters, escapes and text runs;
//! the [scanner](crate::etml::scanner) turns that stream into tags.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize_with_spans, TokenSpan};
pub use tokens::Token;
