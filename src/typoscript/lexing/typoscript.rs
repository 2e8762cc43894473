//! TypoScript lexer
//!
//!     The root lexer for TypoScript setup and constants files. It is assembled from small
//!     named states which the `root` state includes in a fixed priority order:
//!
//!         1. comment      `#`, `//`, `/* */` and lone `#` lines
//!         2. constant     `{$a.b}`, `{register:value}` and hex colors
//!         3. html         tags (delegated), entities, `_CSS_DEFAULT_STYLE` bodies (delegated)
//!         4. label        `EXT:`/`FILE:`/`LLL:` references and resource paths
//!         5. whitespace
//!         6. keywords     conditions, functions, top-level objects, content objects
//!         7. punctuation
//!         8. operator
//!         9. structure    brackets and braces
//!        10. literal      numbers and `###MARKERS###`
//!        11. other        the catch-all word run
//!
//!     Changing this order changes the output: rules earlier in the list shadow later ones.
//!     A `###MARK###` run, for instance, is never a comment (a `#` comment needs a non-`#`
//!     character after it) and never a hex color, so it falls through to the literal state.
//!
//!     HTML tags are handed to the [HTML data lexer](super::html_data) and the body of a
//!     `_CSS_DEFAULT_STYLE (` block, up to the last `\n)` of the source, to the
//!     [CSS data lexer](super::css_data).

use super::css_data::{CSS_DATA_LEXER, COMMENT_GUARD, HEX_COLOR_START};
use super::engine::RegexLexer;
use super::html_data::HTML_DATA_LEXER;
use super::rules::{include, rule, Action, Entry, Flags, Grammar, GroupAction};
use crate::typoscript::token::Token;
use once_cell::sync::Lazy;

pub const NAME: &str = "TypoScript";

/// Trailing context for names: the next character is not part of a word
const WORD_END: &str = r"[^\w\-]|\z";

fn comment() -> Vec<Entry> {
    vec![
        rule(r"#[^\n#]+", Action::Emit(Token::Comment))
            .not_after(COMMENT_GUARD)
            .not_followed_by(1, HEX_COLOR_START)
            .into(),
        rule(r"//[^\n]*", Action::Emit(Token::Comment))
            .not_after(COMMENT_GUARD)
            .into(),
        rule(r"/\*.*?\*/", Action::Emit(Token::Comment)).into(),
        rule(r"(\s*#\s*\n)", Action::Emit(Token::Comment)).into(),
    ]
}

fn constant() -> Vec<Entry> {
    vec![
        // Constant: {$some.constant}
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
        // Constant: {register:somevalue}
        rule(
            r"(\{)([\w\-_]+)(\s*:\s*)([\w\-_]+)(\})",
            Action::by_groups([
                Token::StringSymbol,
                Token::NameConstant,
                Token::Operator,
                Token::NameConstant,
                Token::StringSymbol,
            ]),
        )
        .into(),
        // Hex color: #ff0077
        rule(
            r"(#[a-fA-F0-9]{6}\b|#[a-fA-F0-9]{3}\b)",
            Action::Emit(Token::StringChar),
        )
        .into(),
    ]
}

fn html() -> Vec<Entry> {
    vec![
        rule(r"<[^\s][^\n>]*>", Action::Using(&*HTML_DATA_LEXER)).into(),
        rule(r"&[^;\n]*;", Action::Emit(Token::String)).into(),
        rule(
            r"(_CSS_DEFAULT_STYLE)(\s*)(\()(.*)",
            Action::ByGroups(vec![
                GroupAction::Emit(Token::NameClass),
                GroupAction::Emit(Token::Text),
                GroupAction::Emit(Token::StringSymbol),
                GroupAction::Using(&*CSS_DATA_LEXER),
            ]),
        )
        .ahead(r"\n\)")
        .into(),
    ]
}

fn label() -> Vec<Entry> {
    vec![
        // Language label or extension resource FILE:... or LLL:... or EXT:...
        rule(r#"(EXT|FILE|LLL):[^}\n"]*"#, Action::Emit(Token::String)).into(),
        // Path to a resource
        rule(
            r"([\w\-_]+(?:/[\w\-_]+)+/?)([^\s]*\n)",
            Action::by_groups([Token::String, Token::String]),
        )
        .into(),
    ]
}

fn whitespace() -> Vec<Entry> {
    vec![rule(r"\s+", Action::Emit(Token::Text)).into()]
}

const CONDITIONS: &str = r"(\[)(browser|compatVersion|dayofmonth|dayofweek|dayofyear|device|ELSE|END|GLOBAL|globalString|globalVar|hostname|hour|IP|language|loginUser|loginuser|minute|month|page|PIDinRootline|PIDupinRootline|system|treeLevel|useragent|userFunc|usergroup|version)([^\]]*)(\])";

const FUNCTIONS: &str = r"(HTMLparser|HTMLparser_tags|addParams|cache|encapsLines|filelink|if|imageLinkWrap|imgResource|makelinks|numRows|numberFormat|parseFunc|replacement|round|select|split|stdWrap|strPad|tableStyle|tags|textStyle|typolink)";

const TOP_LEVEL_OBJECTS: &str = r"(cObj|field|config|content|constants|FEData|file|frameset|includeLibs|lib|page|plugin|register|resources|sitemap|sitetitle|styles|temp|tt_[^:.\n\s]*|types|xmlnews|INCLUDE_TYPOSCRIPT|_CSS_DEFAULT_STYLE|_DEFAULT_PI_VARS|_LOCAL_LANG)";

const CONTENT_OBJECTS: &str = r"(CASE|CLEARGIF|COA|COA_INT|COBJ_ARRAY|COLUMNS|CONTENT|CTABLE|EDITPANEL|FILE|FILES|FLUIDTEMPLATE|FORM|HMENU|HRULER|HTML|IMAGE|IMGTEXT|IMG_RESOURCE|LOAD_REGISTER|MEDIA|MULTIMEDIA|OTABLE|PAGE|QTOBJECT|RECORDS|RESTORE_REGISTER|SEARCHRESULT|SVG|SWFOBJECT|TEMPLATE|TEXT|USER|USER_INT)";

const MENU_STATES: &str = r"(ACT|ACTIFSUB|ACTIFSUBRO|ACTRO|CUR|CURIFSUB|CURIFSUBRO|CURRO|IFSUB|IFSUBRO|NO|SPC|USERDEF1|USERDEF1RO|USERDEF2|USERDEF2RO|USR|USRRO)";

const MENU_OBJECTS: &str = r"(GMENU|GMENU_FOLDOUT|GMENU_LAYERS|IMGMENU|IMGMENUITEM|JSMENU|JSMENUITEM|TMENU|TMENUITEM|TMENU_LAYERS)";

fn keywords() -> Vec<Entry> {
    vec![
        // Conditions
        rule(
            CONDITIONS,
            Action::by_groups([
                Token::StringSymbol,
                Token::NameConstant,
                Token::Text,
                Token::StringSymbol,
            ]),
        )
        .ignore_case()
        .into(),
        // Functions
        rule(FUNCTIONS, Action::Emit(Token::NameFunction))
            .ahead(WORD_END)
            .into(),
        // Toplevel objects and _*, after an assignment or copy operator
        rule(
            format!(r"(=?\s*<?\s+){}", TOP_LEVEL_OBJECTS),
            Action::by_groups([Token::Operator, Token::NameBuiltin]),
        )
        .ahead(WORD_END)
        .into(),
        // Toplevel objects and _*, at the start of a line
        rule(
            format!(r"(\s*){}", TOP_LEVEL_OBJECTS),
            Action::by_groups([Token::Operator, Token::NameBuiltin]),
        )
        .ahead(WORD_END)
        .at_line_start()
        .into(),
        // Content objects
        rule(CONTENT_OBJECTS, Action::Emit(Token::NameClass))
            .ahead(WORD_END)
            .into(),
        // Menu states
        rule(MENU_STATES, Action::Emit(Token::NameClass)).into(),
        // Menu objects
        rule(MENU_OBJECTS, Action::Emit(Token::NameClass)).into(),
        // PHP objects
        rule(r"(PHP_SCRIPT(_EXT|_INT)?)", Action::Emit(Token::NameClass)).into(),
        rule(r"(userFunc)", Action::Emit(Token::NameFunction))
            .ahead(WORD_END)
            .into(),
    ]
}

fn punctuation() -> Vec<Entry> {
    vec![rule(r"[,.]", Action::Emit(Token::Punctuation)).into()]
}

fn operator() -> Vec<Entry> {
    vec![rule(r"[<>,:=.*%+|]", Action::Emit(Token::Operator)).into()]
}

fn structure() -> Vec<Entry> {
    // Brackets and braces
    vec![rule(r"[{}()\[\]\\]", Action::Emit(Token::StringSymbol)).into()]
}

fn literal() -> Vec<Entry> {
    vec![
        rule(r"0x[0-9A-Fa-f]+t?", Action::Emit(Token::NumberHex)).into(),
        rule(r"[0-9]+", Action::Emit(Token::NumberInteger)).into(),
        rule(r"(###\w+###)", Action::Emit(Token::NameConstant)).into(),
    ]
}

fn other() -> Vec<Entry> {
    vec![rule(r#"[\w"\-_!/&;@]+"#, Action::Emit(Token::Text)).into()]
}

pub fn grammar() -> Grammar {
    Grammar::new(
        NAME,
        Flags {
            dot_all: true,
            multi_line: true,
        },
    )
    .state(
        "root",
        vec![
            include("comment"),
            include("constant"),
            include("html"),
            include("label"),
            include("whitespace"),
            include("keywords"),
            include("punctuation"),
            include("operator"),
            include("structure"),
            include("literal"),
            include("other"),
        ],
    )
    .state("keywords", keywords())
    .state("whitespace", whitespace())
    .state("html", html())
    .state("literal", literal())
    .state("label", label())
    .state("punctuation", punctuation())
    .state("operator", operator())
    .state("structure", structure())
    .state("constant", constant())
    .state("comment", comment())
    .state("other", other())
}

pub static TYPOSCRIPT_LEXER: Lazy<RegexLexer> =
    Lazy::new(|| RegexLexer::new(&grammar()).expect("typoscript grammar compiles"));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typoscript::lexing::Lexer;
    use crate::typoscript::testing::factories::mk_tokens;

    fn lex(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
        TYPOSCRIPT_LEXER.tokenize(source)
    }

    #[test]
    fn test_states_flatten_in_priority_order() {
        let states: Vec<_> = TYPOSCRIPT_LEXER.rules().iter().map(|r| r.state()).collect();
        let mut order: Vec<&str> = Vec::new();
        for state in states {
            if order.last() != Some(&state) {
                order.push(state);
            }
        }
        assert_eq!(
            order,
            vec![
                "comment",
                "constant",
                "html",
                "label",
                "whitespace",
                "keywords",
                "punctuation",
                "operator",
                "structure",
                "literal",
                "other"
            ]
        );
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            lex("// comment\n"),
            mk_tokens(&[(Token::Comment, 0, 10), (Token::Text, 10, 11)])
        );
    }

    #[test]
    fn test_hash_comment_and_hex_color() {
        assert_eq!(
            lex("# note\n#abc"),
            mk_tokens(&[
                (Token::Comment, 0, 6),
                (Token::Text, 6, 7),
                (Token::StringChar, 7, 11),
            ])
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            lex("/* a\n b */x"),
            mk_tokens(&[(Token::Comment, 0, 10), (Token::Text, 10, 11)])
        );
    }

    #[test]
    fn test_lone_hash_line() {
        assert_eq!(lex("#\n"), mk_tokens(&[(Token::Comment, 0, 2)]));
    }

    #[test]
    fn test_dotted_constant() {
        assert_eq!(
            lex("{$plugin.tx_example.setting}"),
            mk_tokens(&[
                (Token::StringSymbol, 0, 1),
                (Token::Operator, 1, 2),
                (Token::NameConstant, 2, 20),
                (Token::NameConstant, 20, 27),
                (Token::StringSymbol, 27, 28),
            ])
        );
    }

    #[test]
    fn test_assignment_of_content_object() {
        assert_eq!(
            lex("page = PAGE"),
            mk_tokens(&[
                (Token::NameBuiltin, 0, 4),
                (Token::Text, 4, 5),
                (Token::Operator, 5, 6),
                (Token::Text, 6, 7),
                (Token::NameClass, 7, 11),
            ])
        );
    }

    #[test]
    fn test_copy_operator_context() {
        assert_eq!(
            lex("lib.foo < lib.bar"),
            mk_tokens(&[
                (Token::NameBuiltin, 0, 3),
                (Token::Punctuation, 3, 4),
                (Token::Text, 4, 7),
                (Token::Text, 7, 8),
                (Token::Operator, 8, 10),
                (Token::NameBuiltin, 10, 13),
                (Token::Punctuation, 13, 14),
                (Token::Text, 14, 17),
            ])
        );
    }

    #[test]
    fn test_top_level_name_needs_line_start_or_operator() {
        // `lib` after plain whitespace is not at a line start anymore
        assert_eq!(
            lex("  lib"),
            mk_tokens(&[(Token::Text, 0, 2), (Token::Text, 2, 5)])
        );
    }

    #[test]
    fn test_content_object_prefers_whole_word() {
        assert_eq!(lex("FILES"), mk_tokens(&[(Token::NameClass, 0, 5)]));
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(
            lex("fileadmin/templates/main.html\n"),
            mk_tokens(&[(Token::String, 0, 24), (Token::String, 24, 30)])
        );
    }

    #[test]
    fn test_extension_label() {
        assert_eq!(
            lex("EXT:site/Resources/Private/Language/locallang.xlf"),
            mk_tokens(&[(Token::String, 0, 49)])
        );
    }

    #[test]
    fn test_numbers_and_marker() {
        assert_eq!(
            lex("10 0x1Ft ###MAIN###"),
            mk_tokens(&[
                (Token::NumberInteger, 0, 2),
                (Token::Text, 2, 3),
                (Token::NumberHex, 3, 8),
                (Token::Text, 8, 9),
                (Token::NameConstant, 9, 19),
            ])
        );
    }

    #[test]
    fn test_condition_is_case_insensitive() {
        let expected = mk_tokens(&[
            (Token::StringSymbol, 0, 1),
            (Token::NameConstant, 1, 8),
            (Token::Text, 8, 15),
            (Token::StringSymbol, 15, 16),
        ]);
        assert_eq!(lex("[browser = msie]"), expected);
        assert_eq!(lex("[BROWSER = msie]"), expected);
    }

    #[test]
    fn test_html_tags_are_delegated() {
        assert_eq!(
            lex("<div>{register:foo}</div>"),
            mk_tokens(&[
                (Token::String, 0, 1),
                (Token::String, 1, 4),
                (Token::String, 4, 5),
                (Token::StringSymbol, 5, 6),
                (Token::NameConstant, 6, 14),
                (Token::Operator, 14, 15),
                (Token::NameConstant, 15, 18),
                (Token::StringSymbol, 18, 19),
                (Token::String, 19, 20),
                (Token::String, 20, 24),
                (Token::String, 24, 25),
            ])
        );
    }

    #[test]
    fn test_css_default_style_is_delegated() {
        let source = "_CSS_DEFAULT_STYLE (\n  p { color: red; }\n)";
        assert_eq!(
            lex(source),
            mk_tokens(&[
                (Token::NameClass, 0, 18),
                (Token::Text, 18, 19),
                (Token::StringSymbol, 19, 20),
                // CSS data lexer from here
                (Token::Text, 20, 23),
                (Token::String, 23, 24),
                (Token::Text, 24, 25),
                (Token::String, 25, 26),
                (Token::Text, 26, 27),
                (Token::String, 27, 32),
                (Token::String, 32, 33),
                (Token::Text, 33, 34),
                (Token::String, 34, 38),
                (Token::Text, 38, 39),
                (Token::String, 39, 40),
                // back in TypoScript
                (Token::Text, 40, 41),
                (Token::StringSymbol, 41, 42),
            ])
        );
    }

    #[test]
    fn test_control_character_falls_back() {
        assert_eq!(lex("\u{1}"), mk_tokens(&[(Token::Error, 0, 1)]));
    }

    #[test]
    fn test_unicode_class_edges() {
        // Information separators are not whitespace
        assert_eq!(lex("\u{1c}"), mk_tokens(&[(Token::Error, 0, 1)]));
        // Superscript digits are not word characters
        assert_eq!(
            lex("²x"),
            mk_tokens(&[(Token::Error, 0, 2), (Token::Text, 2, 3)])
        );
        // Combining marks are
        assert_eq!(lex("x\u{300}y"), mk_tokens(&[(Token::Text, 0, 4)]));
    }
}
