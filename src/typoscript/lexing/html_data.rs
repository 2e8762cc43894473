//! HTML data lexer
//!
//! Highlights markers, constants and registers within HTML tags. Besides the constructs it
//! shares with the CSS data lexer it knows the `INCLUDE_TYPOSCRIPT` directive and
//! `EXT:`, `FILE:` and `LLL:` resource labels.

use super::engine::RegexLexer;
use super::rules::{rule, Action, Flags, Grammar};
use crate::typoscript::token::Token;
use once_cell::sync::Lazy;

pub const NAME: &str = "TypoScriptHtmlData";

pub fn grammar() -> Grammar {
    Grammar::new(NAME, Flags::default()).state(
        "root",
        vec![
            rule("(INCLUDE_TYPOSCRIPT)", Action::Emit(Token::NameClass)).into(),
            // Language label or extension resource FILE:... or LLL:... or EXT:...
            rule(r#"(EXT|FILE|LLL):[^}\n"]*"#, Action::Emit(Token::String)).into(),
            // marker: ###MARK###
            rule(
                r"(.*)(###\w+###)(.*)",
                Action::by_groups([Token::String, Token::NameConstant, Token::String]),
            )
            .into(),
            // constant: {$some.constant}
            rule(
                r"(\{)(\$)((?:[\w\-_]+\.)*)([\w\-_]+)(\})",
                Action::by_groups([
                    Token::StringSymbol,
                    Token::Operator,
                    Token::NameConstant,
                    Token::NameConstant,
                    Token::StringSymbol,
                ]),
            )
            .into(),
            // constant: {register:somevalue}
            rule(
                r"(.*)(\{)([\w\-_]+)(\s*:\s*)([\w\-_]+)(\})(.*)",
                Action::by_groups([
                    Token::String,
                    Token::StringSymbol,
                    Token::NameConstant,
                    Token::Operator,
                    Token::NameConstant,
                    Token::StringSymbol,
                    Token::String,
                ]),
            )
            .into(),
            rule(r"\s+", Action::Emit(Token::Text)).into(),
            rule(r"[<>,:=.*%+|]", Action::Emit(Token::String)).into(),
            rule(r#"[\w"_\-!/&;(){}#]+"#, Action::Emit(Token::String)).into(),
        ],
    )
}

pub static HTML_DATA_LEXER: Lazy<RegexLexer> =
    Lazy::new(|| RegexLexer::new(&grammar()).expect("html data grammar compiles"));
