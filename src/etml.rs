//! Main module for etml library functionality
//!
//! The parsing path is `lexer` -> `scanner` -> `modifier` resolution ->
//! `document` assembly, wrapped by the entry points in `parser`. `validator`
//! answers whether a text is markup at all. `config`, `formats` and
//! `processor` serve the command-line tool and other collaborators that
//! load, render or store documents.

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod modifier;
pub mod parser;
pub mod processor;
pub mod scanner;
pub mod validator;
