//! Tag scanner
//!
//! Walks the token stream once, left to right, and turns every
//! `[CODE]body[/CODE]` span into a [`RawTag`]. The scanner is an explicit state
//! machine driven by a single forward-only logos cursor:
//!
//! ```text
//! Outside      --[-->   InTagName    (start a code)
//! InTagName    --]-->   InBody       (code finished)
//! InBody       --text-> InBody       (collect body)
//! InBody       --[/-->  InClosingTag (start closing code)
//! InClosingTag --]-->   Outside      (emit tag)
//! ```
//!
//! Any other delimiter in any state is malformed markup, as is reaching the
//! end of input anywhere but `Outside`. Text outside of tags is discarded or
//! rejected depending on [`OutsideText`].

use crate::etml::error::{MalformedReason, MarkupError, Position, SourceLocation};
use crate::etml::lexer::Token;
use crate::etml::parser::{OutsideText, ParseOptions};
use log::{debug, trace};
use logos::Logos;
use std::ops::Range;

/// An unresolved `(code, body)` pair, as found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub code: String,
    /// Body text with escapes already resolved
    pub body: String,
    /// Position of the opening `[`
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Outside,
    InTagName {
        open: usize,
        code: String,
    },
    InBody {
        open: usize,
        code: String,
        body: String,
    },
    InClosingTag {
        open: usize,
        code: String,
        body: String,
        closing: String,
        close_at: usize,
    },
}

/// Tag codes are one or more ASCII uppercase letters
fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Scan markup into raw tags
pub fn scan(source: &str, options: &ParseOptions) -> Result<Vec<RawTag>, MarkupError> {
    Scanner::new(source, options).run()
}

struct Scanner<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    location: SourceLocation<'a>,
    tags: Vec<RawTag>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            source,
            options,
            location: SourceLocation::new(source),
            tags: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<RawTag>, MarkupError> {
        let mut lexer = Token::lexer(self.source);
        let mut state = ScanState::Outside;

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let token = result
                .map_err(|_| self.error(span.start, MalformedReason::UnrecognizedInput))?;
            state = self.step(state, token, lexer.slice(), span)?;
        }

        self.finish(state)?;
        debug!("scanned {} tags", self.tags.len());
        Ok(self.tags)
    }

    fn step(
        &mut self,
        state: ScanState,
        token: Token,
        slice: &str,
        span: Range<usize>,
    ) -> Result<ScanState, MarkupError> {
        trace!("{:?} + {} at {:?}", state, token, span);

        match state {
            ScanState::Outside => match token {
                Token::OpenTag => Ok(ScanState::InTagName {
                    open: span.start,
                    code: String::new(),
                }),
                Token::OpenClosingTag => {
                    Err(self.error(span.start, MalformedReason::UnexpectedClosingTag))
                }
                Token::CloseBracket => {
                    Err(self.error(span.start, MalformedReason::StrayClosingBracket))
                }
                Token::Text | Token::Escape | Token::Backslash => {
                    if self.options.outside_text == OutsideText::Reject
                        && !slice.trim().is_empty()
                    {
                        let offset = span.start + (slice.len() - slice.trim_start().len());
                        return Err(self.error(offset, MalformedReason::TextOutsideTag));
                    }
                    Ok(ScanState::Outside)
                }
            },

            ScanState::InTagName { open, mut code } => match token {
                Token::Text => {
                    code.push_str(slice);
                    Ok(ScanState::InTagName { open, code })
                }
                Token::CloseBracket if code.is_empty() => {
                    Err(self.error(open, MalformedReason::EmptyTagCode))
                }
                Token::CloseBracket if !is_valid_code(&code) => {
                    Err(self.error(open + 1, MalformedReason::InvalidTagCode))
                }
                Token::CloseBracket => Ok(ScanState::InBody {
                    open,
                    code,
                    body: String::new(),
                }),
                _ => Err(self.error(span.start, MalformedReason::InvalidTagCode)),
            },

            ScanState::InBody {
                open,
                code,
                mut body,
            } => match token {
                Token::OpenClosingTag => Ok(ScanState::InClosingTag {
                    open,
                    code,
                    body,
                    closing: String::new(),
                    close_at: span.start,
                }),
                Token::OpenTag => Err(self.error(span.start, MalformedReason::NestedTag { code })),
                Token::CloseBracket => {
                    Err(self.error(span.start, MalformedReason::StrayClosingBracket))
                }
                Token::Text | Token::Escape | Token::Backslash => {
                    body.push_str(token.literal(slice).unwrap_or_default());
                    Ok(ScanState::InBody { open, code, body })
                }
            },

            ScanState::InClosingTag {
                open,
                code,
                body,
                mut closing,
                close_at,
            } => match token {
                Token::Text => {
                    closing.push_str(slice);
                    Ok(ScanState::InClosingTag {
                        open,
                        code,
                        body,
                        closing,
                        close_at,
                    })
                }
                Token::CloseBracket => {
                    // An empty `[/]` is left to the strict-closing check
                    if !closing.is_empty() && !is_valid_code(&closing) {
                        return Err(self.error(close_at + 2, MalformedReason::InvalidTagCode));
                    }
                    if self.options.strict_closing && closing != code {
                        return Err(self.error(
                            close_at,
                            MalformedReason::MismatchedClosingTag {
                                expected: code,
                                found: closing,
                            },
                        ));
                    }
                    let position = self.location.position(open);
                    debug!("tag [{}] at {} closed", code, position);
                    self.tags.push(RawTag {
                        code,
                        body,
                        position,
                    });
                    Ok(ScanState::Outside)
                }
                _ => Err(self.error(span.start, MalformedReason::InvalidTagCode)),
            },
        }
    }

    fn finish(&self, state: ScanState) -> Result<(), MarkupError> {
        match state {
            ScanState::Outside => Ok(()),
            ScanState::InTagName { open, .. } => {
                Err(self.error(open, MalformedReason::UnterminatedTagName))
            }
            ScanState::InBody { open, code, .. } | ScanState::InClosingTag { open, code, .. } => {
                Err(self.error(open, MalformedReason::UnterminatedTag { code }))
            }
        }
    }

    fn error(&self, offset: usize, reason: MalformedReason) -> MarkupError {
        MarkupError::malformed(self.location.position(offset), reason)
    }
}
