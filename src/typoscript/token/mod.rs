//! Core token types and helpers shared across the lexers and tooling.

pub mod core;
pub mod formatting;

pub use self::core::{Token, TokenFamily, ALL_TOKENS};
pub use formatting::{detokenize, render_listing, with_text, TokenText};
