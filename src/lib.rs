//! # etml
//!
//! A parser for mood-tagged script markup.
//!
//! Scripts annotate narrative text with bracketed mood tags:
//!
//! ```text
//! [ANG]I am furious[/ANG][REL]but now calm[/REL]
//! ```
//!
//! Parsing yields a [`Document`](etml::document::Document): the ordered
//! segments of text, each with the [`Modifier`](etml::modifier::Modifier) it
//! should be rendered with. Rendering and storage are left to the consumer.
//!
//! Markup grammar:
//!
//! ```text
//! document := (plain_text | tag)*
//! tag      := "[" CODE "]" body "[/" CODE "]"
//! body     := any characters except an unescaped "[" or "]"
//! ```
//!
//! A backslash escapes `[`, `]` and `\` inside a body.

pub mod etml;
