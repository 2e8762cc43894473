//! Test factories for creating locations and spanned tokens succinctly

use std::ops::Range;

use crate::typoscript::lexing::Tokens;
use crate::typoscript::token::Token;

/// Make a single spanned token
pub fn mk_token(token: Token, start: usize, end: usize) -> (Token, Range<usize>) {
    (token, start..end)
}

/// Make a vector of spanned tokens from a list of (Token, start, end)
pub fn mk_tokens(specs: &[(Token, usize, usize)]) -> Tokens {
    specs
        .iter()
        .cloned()
        .map(|(t, s, e)| mk_token(t, s, e))
        .collect()
}

/// Pair each token with its text, for assertions that read better with literals
pub fn texts<'a>(source: &'a str, tokens: &[(Token, Range<usize>)]) -> Vec<(Token, &'a str)> {
    tokens
        .iter()
        .map(|(token, range)| (*token, &source[range.clone()]))
        .collect()
}
