//! Token definitions for mood markup
//!
//! The markup only has three delimiters: `[`, `[/` and `]`. Everything else is
//! text, except for backslash escapes which let a body carry literal brackets.
//! All delimiters are ASCII, so a multi-byte character is always part of a
//! single `Text` token and never split.
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible tokens in mood markup
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Token {
    // Closing tag opener, must win over `[`
    #[token("[/")]
    OpenClosingTag,

    #[token("[")]
    OpenTag,

    #[token("]")]
    CloseBracket,

    // `\[`, `\]` or `\\`
    #[regex(r"\\[\[\]\\]")]
    Escape,

    // A backslash that escapes nothing is kept as is
    #[token("\\")]
    Backslash,

    #[regex(r"[^\[\]\\]+")]
    Text,
}

impl Token {
    /// Check if this token contributes literal characters to a body
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Text | Token::Escape | Token::Backslash)
    }

    /// Returns the literal text a token stands for, given its source slice.
    ///
    /// Escapes drop the leading backslash; delimiters have no literal text.
    pub fn literal<'a>(&self, slice: &'a str) -> Option<&'a str> {
        match self {
            Token::Text | Token::Backslash => Some(slice),
            Token::Escape => slice.get(1..),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::OpenClosingTag => "open-closing-tag",
            Token::OpenTag => "open-tag",
            Token::CloseBracket => "close-bracket",
            Token::Escape => "escape",
            Token::Backslash => "backslash",
            Token::Text => "text",
        };
        write!(f, "<{}>", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|t| t.ok()).collect()
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            lex_all("[ANG]"),
            vec![Token::OpenTag, Token::Text, Token::CloseBracket]
        );
        assert_eq!(
            lex_all("[/ANG]"),
            vec![Token::OpenClosingTag, Token::Text, Token::CloseBracket]
        );
    }

    #[test]
    fn test_text_runs_include_whitespace() {
        assert_eq!(lex_all("I am furious\n"), vec![Token::Text]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            lex_all("a\\[b\\]c\\\\"),
            vec![
                Token::Text,
                Token::Escape,
                Token::Text,
                Token::Escape,
                Token::Text,
                Token::Escape
            ]
        );
    }

    #[test]
    fn test_lone_backslash() {
        assert_eq!(
            lex_all("a\\b"),
            vec![Token::Text, Token::Backslash, Token::Text]
        );
    }

    #[test]
    fn test_multibyte_text_is_one_token() {
        assert_eq!(lex_all("héllo wörld ✨"), vec![Token::Text]);
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(Token::Escape.literal("\\["), Some("["));
        assert_eq!(Token::Text.literal("abc"), Some("abc"));
        assert_eq!(Token::Backslash.literal("\\"), Some("\\"));
        assert_eq!(Token::OpenTag.literal("["), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Token::OpenTag), "<open-tag>");
        assert_eq!(format!("{}", Token::OpenClosingTag), "<open-closing-tag>");
        assert_eq!(format!("{}", Token::Text), "<text>");
    }
}
