//! Testing utilities for the TypoScript lexers
//!
//!     Lexer tests check two different things, and the helpers here are split the same way:
//!
//!         1. Exact classification of a small input, written with [mk_tokens](factories::mk_tokens)
//!            so that both the category and the byte range of every token are pinned down.
//!         2. Structural properties over realistic input: the output covers the source
//!            without gaps or overlaps, and every token is non-empty. Use
//!            [assert_lossless] together with the sample files from [samples].
//!
//!     Structural checks are cheap and catch rule-ordering mistakes that exact tests on tiny
//!     inputs miss, so every new sample should go through [assert_lossless].

pub mod factories;
pub mod samples;

pub use factories::{mk_token, mk_tokens, texts};
pub use samples::{load_sample, sample_names};

use crate::typoscript::token::Token;
use std::ops::Range;

/// Assert that `tokens` tile `source` exactly: contiguous, non-empty, in order, complete
pub fn assert_lossless(source: &str, tokens: &[(Token, Range<usize>)]) {
    let mut expected_start = 0;
    for (index, (token, range)) in tokens.iter().enumerate() {
        assert_eq!(
            range.start, expected_start,
            "token #{} ({}) starts at {} but the previous token ended at {}",
            index, token, range.start, expected_start
        );
        assert!(
            range.start < range.end,
            "token #{} ({}) is empty at {}",
            index,
            token,
            range.start
        );
        assert!(
            source.is_char_boundary(range.start) && source.is_char_boundary(range.end),
            "token #{} ({}) splits a character: {:?}",
            index,
            token,
            range
        );
        expected_start = range.end;
    }
    assert_eq!(
        expected_start,
        source.len(),
        "tokens stop at {} but the source is {} bytes long",
        expected_start,
        source.len()
    );
}
