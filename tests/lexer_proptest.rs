//! Property-based tests for the TypoScript lexers
//!
//! These tests ensure that every registered lexer handles arbitrary input without
//! panicking, reproduces the source exactly and is deterministic.

use proptest::prelude::*;
use typoscript::typoscript::registry;
use typoscript::typoscript::testing::assert_lossless;
use typoscript::typoscript::token::detokenize;
use typoscript::{tokenize, Token};

/// Generate TypoScript-like lines
fn typoscript_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Assignments
        "(page|lib|temp|plugin)(\\.[a-z0-9]+){0,3} = (TEXT|COA|HMENU|[a-z ]+)",
        // Copies and references
        "[a-z]+(\\.[a-z]+)? [<=]< [a-z]+\\.[a-z]+",
        // Conditions
        "\\[(globalVar|browser|END|GLOBAL)[ =a-z0-9:]*\\]",
        // Constants and registers
        "\\{\\$[a-z]+(\\.[a-z]+){0,2}\\}",
        "\\{register:[a-z]+\\}",
        // Comments
        "(#|//) [a-zA-Z ]*",
        "/\\* [a-z\n]* \\*/",
        // HTML
        "<(p|div|span)( class=\"[a-z]+\")?>[a-z ]*</(p|div|span)>",
        // Resources, markers and numbers
        "(EXT|FILE|LLL):[a-z/._]+",
        "###[A-Z]+###",
        "(0x[0-9a-f]+|[0-9]+|#[0-9a-f]{6})",
        // Blocks
        "[a-z]+ \\{",
        "\\}",
        "_CSS_DEFAULT_STYLE \\(\n[a-z.{}: ;#]*\n\\)",
    ]
}

/// Generate TypoScript-like documents
fn typoscript_document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop_oneof!["", "  ", "\t"], typoscript_line_strategy()),
        1..20,
    )
    .prop_map(|lines| {
        lines
            .into_iter()
            .map(|(indent, line)| format!("{}{}", indent, line))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #[test]
    fn test_tokenize_is_lossless_on_documents(input in typoscript_document_strategy()) {
        let tokens = tokenize(&input);
        prop_assert_eq!(detokenize(&input, &tokens), input.clone());
        assert_lossless(&input, &tokens);
    }

    #[test]
    fn test_every_lexer_is_lossless_on_any_text(input in "\\PC*") {
        for info in registry::all() {
            let tokens = info.lexer().tokenize(&input);
            prop_assert_eq!(detokenize(&input, &tokens), input.clone(), "{}", info.name);
            assert_lossless(&input, &tokens);
        }
    }

    #[test]
    fn test_every_lexer_survives_control_characters(input in any::<String>()) {
        for info in registry::all() {
            let tokens = info.lexer().tokenize(&input);
            assert_lossless(&input, &tokens);
        }
    }

    #[test]
    fn test_tokenize_is_deterministic(input in typoscript_document_strategy()) {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    #[test]
    fn test_error_tokens_are_single_characters(input in any::<String>()) {
        let tokens = tokenize(&input);
        for (token, range) in tokens {
            if token == Token::Error {
                prop_assert_eq!(input[range.clone()].chars().count(), 1);
                prop_assert_ne!(&input[range], "\n");
            }
        }
    }
}
