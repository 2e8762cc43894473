//! Detokenizer and token listing helpers
//!
//! The lexer output is a flat sequence of `(Token, Range<usize>)` pairs over the source.
//! These helpers turn that sequence back into text, which is useful for:
//!
//! - Round-trip testing (source -> tokens -> source)
//! - Printing token streams for debugging
//! - Feeding a rendering layer that wants the text next to each category

use super::core::Token;
use serde::Serialize;
use std::ops::Range;

/// A token paired with the text it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenText<'a> {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Pair every token with its slice of `source`
pub fn with_text<'a>(source: &'a str, tokens: &[(Token, Range<usize>)]) -> Vec<TokenText<'a>> {
    tokens
        .iter()
        .map(|(token, range)| TokenText {
            token: *token,
            start: range.start,
            end: range.end,
            text: &source[range.clone()],
        })
        .collect()
}

/// Detokenize a stream of tokens back into source text
///
/// Spans are concatenated in emission order. For lexer output this always equals the
/// original source.
pub fn detokenize(source: &str, tokens: &[(Token, Range<usize>)]) -> String {
    let mut result = String::with_capacity(source.len());
    for (_, range) in tokens {
        result.push_str(&source[range.clone()]);
    }
    result
}

/// Renders one line per token: `Label "text"` with the text debug-escaped
pub fn render_listing(source: &str, tokens: &[(Token, Range<usize>)]) -> String {
    let mut out = String::new();
    for (token, range) in tokens {
        out.push_str(&format!("{} {:?}\n", token.label(), &source[range.clone()]));
    }
    out
}
