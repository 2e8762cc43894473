//! Common lexer module
//!
//! This module contains shared interfaces and utilities for lexer implementations.

use crate::typoscript::token::Token;
use std::fmt;
use std::ops::Range;

/// Lexer output: flat, position-ordered tokens covering the whole source
pub type Tokens = Vec<(Token, Range<usize>)>;

/// Errors that can occur around lexing
///
/// Tokenizing itself never fails; these only show up when building rule tables or
/// selecting a lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A rule pattern did not compile
    InvalidPattern { state: String, message: String },
    /// A state includes a state that is not defined
    UnknownState(String),
    /// Include cycle between states
    IncludeCycle(String),
    /// No registered lexer matches the given name, file name or MIME type
    UnknownLexer(String),
    /// Reading the source failed
    Io(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidPattern { state, message } => {
                write!(f, "Invalid pattern in state '{}': {}", state, message)
            }
            LexError::UnknownState(name) => write!(f, "Unknown state: {}", name),
            LexError::IncludeCycle(name) => write!(f, "Include cycle through state: {}", name),
            LexError::UnknownLexer(name) => write!(f, "No lexer found for: {}", name),
            LexError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LexError {}

impl From<std::io::Error> for LexError {
    fn from(err: std::io::Error) -> Self {
        LexError::Io(err.to_string())
    }
}

impl From<LexError> for String {
    fn from(err: LexError) -> Self {
        err.to_string()
    }
}

/// Trait for lexer implementations
///
/// Implementations hold no per-call state, so a single instance can serve any number of
/// concurrent calls.
pub trait Lexer: Send + Sync {
    /// Display name, e.g. `TypoScript`
    fn name(&self) -> &'static str;

    /// Tokenize the source text
    ///
    /// Ranges are byte offsets into `source`; concatenating them in order yields `source`.
    fn tokenize(&self, source: &str) -> Tokens;
}
