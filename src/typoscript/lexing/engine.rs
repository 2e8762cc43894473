//! Matching engine shared by all TypoScript lexers
//!
//!     The engine walks the source with a single cursor. At every position it tries the
//!     flattened rules in order and the first one that matches wins; priority is encoded
//!     purely by declaration order, never by match length.
//!
//!     The winning rule's action decides what gets emitted:
//!         - a single token for the whole match,
//!         - one token per non-empty capture group (text between groups becomes `Text`),
//!         - or the tokens of another lexer run over the matched text, shifted to the
//!           parent's offsets.
//!
//!     If no rule matches, exactly one character is emitted (`Text` for a newline, `Error`
//!     otherwise) and the cursor moves on. Every iteration consumes at least one character,
//!     so tokenizing always terminates and always covers the whole input.

use super::common::{LexError, Lexer, Tokens};
use super::rules::{Action, Grammar, GroupAction, Rule, RuleMatch};
use crate::typoscript::token::Token;
use std::ops::Range;

/// A lexer driven by an ordered rule list
#[derive(Debug)]
pub struct RegexLexer {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RegexLexer {
    /// Builds the lexer from a grammar, flattening its includes
    pub fn new(grammar: &Grammar) -> Result<Self, LexError> {
        Ok(RegexLexer {
            name: grammar.name(),
            rules: grammar.build()?,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn first_match<'s>(&self, source: &'s str, pos: usize) -> Option<(&Rule, RuleMatch<'s>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_at(source, pos).map(|m| (rule, m)))
    }
}

impl Lexer for RegexLexer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tokenize(&self, source: &str) -> Tokens {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            match self.first_match(source, pos) {
                Some((rule, found)) => {
                    emit(rule.action(), source, pos, &found, &mut tokens);
                    pos = found.end;
                }
                None => {
                    let width = source[pos..].chars().next().map_or(1, char::len_utf8);
                    let token = if source[pos..].starts_with('\n') {
                        Token::Text
                    } else {
                        log::trace!("{}: no rule matches at {}", self.name, pos);
                        Token::Error
                    };
                    tokens.push((token, pos..pos + width));
                    pos += width;
                }
            }
        }

        tokens
    }
}

fn emit(action: &Action, source: &str, pos: usize, found: &RuleMatch<'_>, tokens: &mut Tokens) {
    match action {
        Action::Emit(token) => tokens.push((*token, pos..found.end)),
        Action::Using(lexer) => splice(*lexer, source, pos..found.end, tokens),
        Action::ByGroups(groups) => {
            let mut cursor = pos;
            for (index, group) in groups.iter().enumerate() {
                let Some(m) = found.captures.get(index + 1) else {
                    continue;
                };
                let range = pos + m.start()..pos + m.end();
                if range.is_empty() || range.start < cursor {
                    continue;
                }
                match group {
                    GroupAction::Emit(token) => {
                        fill_gap(cursor, range.start, tokens);
                        tokens.push((*token, range.clone()));
                    }
                    GroupAction::Using(lexer) => {
                        fill_gap(cursor, range.start, tokens);
                        splice(*lexer, source, range.clone(), tokens);
                    }
                    GroupAction::Skip => continue,
                }
                cursor = range.end;
            }
            fill_gap(cursor, found.end, tokens);
        }
    }
}

/// Text inside a match that no group claimed still has to be covered
fn fill_gap(from: usize, to: usize, tokens: &mut Tokens) {
    if from < to {
        tokens.push((Token::Text, from..to));
    }
}

fn splice(lexer: &dyn Lexer, source: &str, range: Range<usize>, tokens: &mut Tokens) {
    log::trace!("delegating {:?} to {}", range, lexer.name());
    let offset = range.start;
    tokens.extend(
        lexer
            .tokenize(&source[range])
            .into_iter()
            .map(|(token, inner)| (token, inner.start + offset..inner.end + offset)),
    );
}
