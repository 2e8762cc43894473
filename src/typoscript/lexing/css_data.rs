//! CSS data lexer
//!
//! Highlights markers, constants and registers inside CSS blocks such as the body of
//! `_CSS_DEFAULT_STYLE`. Everything that is not TypoScript is plain `String`, except for
//! whitespace and comments.
//!
//! Rules run without dot-all, so block comments and the marker and register rules never
//! reach past the end of a line.

use super::engine::RegexLexer;
use super::rules::{rule, Action, Flags, Grammar};
use crate::typoscript::token::Token;
use once_cell::sync::Lazy;

pub const NAME: &str = "TypoScriptCssData";

/// Characters that must not precede a `#` comment
pub(crate) const COMMENT_GUARD: &[char] = &['#', '\'', '"'];

/// A comment `#` is never followed by something that reads as a hex color
pub(crate) const HEX_COLOR_START: &str = "[a-fA-F0-9]{3}";

pub fn grammar() -> Grammar {
    Grammar::new(NAME, Flags::default()).state(
        "root",
        vec![
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
            // comments
            rule(r"/\*.*?\*/", Action::Emit(Token::Comment)).into(),
            rule(r"#[^\n#]+", Action::Emit(Token::Comment))
                .not_after(COMMENT_GUARD)
                .not_followed_by(1, HEX_COLOR_START)
                .into(),
            rule(r"//[^\n]*", Action::Emit(Token::Comment))
                .not_after(COMMENT_GUARD)
                .into(),
            // other
            rule(r"[<>,:=.*%+|]", Action::Emit(Token::String)).into(),
            rule(r#"[\w"_\-!/&;(){}]+"#, Action::Emit(Token::String)).into(),
        ],
    )
}

pub static CSS_DATA_LEXER: Lazy<RegexLexer> =
    Lazy::new(|| RegexLexer::new(&grammar()).expect("css data grammar compiles"));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typoscript::lexing::Lexer;
    use crate::typoscript::testing::factories::mk_tokens;

    #[test]
    fn test_constant_in_css() {
        let tokens = CSS_DATA_LEXER.tokenize("color: {$styles.color};");
        assert_eq!(
            tokens,
            mk_tokens(&[
                (Token::String, 0, 5),
                (Token::String, 5, 6),
                (Token::Text, 6, 7),
                (Token::StringSymbol, 7, 8),
                (Token::Operator, 8, 9),
                (Token::NameConstant, 9, 16),
                (Token::NameConstant, 16, 21),
                (Token::StringSymbol, 21, 22),
                (Token::String, 22, 23),
            ])
        );
    }

    #[test]
    fn test_marker_takes_the_whole_line() {
        let tokens = CSS_DATA_LEXER.tokenize("a { ###COLOR### }\nb");
        assert_eq!(
            tokens,
            mk_tokens(&[
                (Token::String, 0, 4),
                (Token::NameConstant, 4, 15),
                (Token::String, 15, 17),
                (Token::Text, 17, 18),
                (Token::String, 18, 19),
            ])
        );
    }

    #[test]
    fn test_register_line() {
        let tokens = CSS_DATA_LEXER.tokenize("w: {register : width}px");
        assert_eq!(
            tokens,
            mk_tokens(&[
                (Token::String, 0, 3),
                (Token::StringSymbol, 3, 4),
                (Token::NameConstant, 4, 12),
                (Token::Operator, 12, 15),
                (Token::NameConstant, 15, 20),
                (Token::StringSymbol, 20, 21),
                (Token::String, 21, 23),
            ])
        );
    }

    #[test]
    fn test_hex_color_is_not_a_comment() {
        let tokens = CSS_DATA_LEXER.tokenize("#fff");
        assert_eq!(tokens[0], (Token::Error, 0..1));
        let tokens = CSS_DATA_LEXER.tokenize("#main");
        assert_eq!(tokens, mk_tokens(&[(Token::Comment, 0, 5)]));
    }

    #[test]
    fn test_block_comment_stays_on_one_line() {
        let tokens = CSS_DATA_LEXER.tokenize("/* a */");
        assert_eq!(tokens, mk_tokens(&[(Token::Comment, 0, 7)]));
        let tokens = CSS_DATA_LEXER.tokenize("/* a\n*/");
        assert_ne!(tokens[0].0, Token::Comment);
    }
}
