//! Lexer
//!
//!     This module holds the three TypoScript lexers and the engine they share.
//!
//! Structure
//!
//!     Every lexer is a [Grammar](rules::Grammar): named states of ordered rules, where a
//!     state may include other states. The grammar is flattened once into a single rule list
//!     and driven by the [RegexLexer](engine::RegexLexer), which tries the rules in order at
//!     every position and takes the first match. There is no state stack and no tree: the
//!     output is a flat sequence of `(Token, Range<usize>)` pairs.
//!
//!     The lexers:
//!         - [typoscript]: the root lexer for TypoScript sources.
//!         - [html_data]: markers, constants and labels inside HTML tags.
//!         - [css_data]: markers, constants and comments inside CSS blocks.
//!
//!     The root lexer delegates HTML tags and `_CSS_DEFAULT_STYLE` bodies to the two data
//!     lexers and splices their tokens into its own output.
//!
//! Source Preservation
//!
//!     Tokens carry the byte range of their source text, and the ranges of a lexer's output
//!     are contiguous and cover the whole input. Concatenating them gives the source back,
//!     see [detokenize](crate::typoscript::token::detokenize). Input no rule accepts is
//!     emitted one character at a time as `Error` tokens, so lexing never fails.
//!
//!     Rule tables are built lazily on first use and never change afterwards, so the lexers
//!     can be shared freely between threads.

pub mod common;
pub mod css_data;
pub mod engine;
pub mod html_data;
pub mod rules;
pub mod typoscript;

pub use common::{LexError, Lexer, Tokens};
pub use css_data::CSS_DATA_LEXER;
pub use engine::RegexLexer;
pub use html_data::HTML_DATA_LEXER;
pub use typoscript::TYPOSCRIPT_LEXER;
// Re-export token types for consumers that import them from `lexing`
pub use crate::typoscript::token::Token;

/// Tokenize TypoScript source with the root lexer
pub fn tokenize(source: &str) -> Tokens {
    TYPOSCRIPT_LEXER.tokenize(source)
}
