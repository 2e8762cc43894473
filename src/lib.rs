//! # typoscript
//!
//! Syntax highlighting lexers for TYPO3 TypoScript.
//!
//! The crate classifies TypoScript source into flat, lossless token streams for a
//! rendering layer. It does not parse, validate or evaluate TypoScript.
//!
//! Layout
//!
//! src/typoscript
//!   ├── lexing      The rule engine and the three lexers (TypoScript, HTML data, CSS data)
//!   ├── token       Token categories and detokenizing helpers
//!   ├── registry    Names, aliases, file globs and MIME types for lexer selection
//!   └── testing     Token factories, sample loading and structural assertions
//!
//! For testing guidelines, see the [testing module](typoscript::testing).

pub mod typoscript;

pub use typoscript::lexing::{tokenize, LexError, Lexer, Tokens};
pub use typoscript::token::Token;
