//! Rule Table Definitions
//!
//!     A lexer is described by a [Grammar]: named states, each holding an ordered list of
//!     entries. An entry is either a rule (pattern + action) or an include of another state.
//!     Building the grammar flattens the includes of the `root` state, depth first and in
//!     declared order, into a single ordered list of compiled [Rule]s. There is no state
//!     stack at runtime: the flattened list is all the engine ever looks at.
//!
//! Pattern Dialect
//!
//!     Patterns use the `regex` crate syntax, which has no look-around. Rules that need
//!     context beyond the text they consume declare it explicitly:
//!
//!         - `ahead(p)`: `p` must match right after the consumed text, but is not consumed.
//!           It is compiled into the same regex as the body, so alternations in the body
//!           backtrack exactly as they would against a real look-ahead.
//!         - `not_after(chars)`: the character before the match start is not one of `chars`.
//!         - `at_line_start()`: the match starts at offset 0 or right after a newline.
//!         - `not_followed_by(skip, p)`: `p` does not match `skip` bytes into the match.
//!
//!     Context checks look at the whole source, not only the suffix being matched.

use super::common::{LexError, Lexer};
use crate::typoscript::token::Token;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Name of the capture group holding the trailing context of a rule
const LOOKAHEAD_GROUP: &str = "lookahead";

/// Regex flags applied to every rule of a grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `.` matches newlines
    pub dot_all: bool,
    /// `^` and `$` match at line boundaries
    pub multi_line: bool,
}

/// What to do with a single capture group
#[derive(Clone)]
pub enum GroupAction {
    /// Emit the group text as one token
    Emit(Token),
    /// Hand the group text to another lexer and splice its tokens
    Using(&'static dyn Lexer),
    /// Leave the group out
    Skip,
}

/// What to do with the text a rule matched
#[derive(Clone)]
pub enum Action {
    /// One token for the whole match
    Emit(Token),
    /// One action per capture group, in group order
    ByGroups(Vec<GroupAction>),
    /// Hand the whole match to another lexer
    Using(&'static dyn Lexer),
}

impl Action {
    /// Per-group action where every group is emitted as a token
    pub fn by_groups<const N: usize>(tokens: [Token; N]) -> Action {
        Action::ByGroups(tokens.into_iter().map(GroupAction::Emit).collect())
    }
}

impl std::fmt::Debug for GroupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupAction::Emit(token) => write!(f, "Emit({})", token),
            GroupAction::Using(lexer) => write!(f, "Using({})", lexer.name()),
            GroupAction::Skip => f.write_str("Skip"),
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Emit(token) => write!(f, "Emit({})", token),
            Action::ByGroups(groups) => f.debug_tuple("ByGroups").field(groups).finish(),
            Action::Using(lexer) => write!(f, "Using({})", lexer.name()),
        }
    }
}

/// Context a rule requires around its match, before compilation
#[derive(Debug, Clone)]
enum ContextDef {
    NotAfter(&'static [char]),
    LineStart,
    NotFollowedBy { skip: usize, pattern: &'static str },
}

/// Compiled context check
#[derive(Debug, Clone)]
enum Context {
    NotAfter(&'static [char]),
    LineStart,
    NotFollowedBy { skip: usize, pattern: Regex },
}

impl Context {
    /// Check the context of a match starting at `pos`
    fn allows(&self, source: &str, pos: usize) -> bool {
        match self {
            Context::NotAfter(chars) => match source[..pos].chars().next_back() {
                Some(prev) => !chars.contains(&prev),
                None => true,
            },
            Context::LineStart => pos == 0 || source[..pos].ends_with('\n'),
            Context::NotFollowedBy { skip, pattern } => match source.get(pos + skip..) {
                Some(rest) => !pattern.is_match(rest),
                None => true,
            },
        }
    }
}

/// A rule as written in a grammar
#[derive(Debug, Clone)]
pub struct RuleDef {
    pattern: String,
    action: Action,
    ahead: Option<&'static str>,
    ignore_case: bool,
    context: Vec<ContextDef>,
}

/// Declares a rule
pub fn rule(pattern: impl Into<String>, action: Action) -> RuleDef {
    RuleDef {
        pattern: pattern.into(),
        action,
        ahead: None,
        ignore_case: false,
        context: Vec::new(),
    }
}

/// Declares an include of another state
pub fn include(state: &'static str) -> Entry {
    Entry::Include(state)
}

impl RuleDef {
    /// Trailing context that must follow the match without being consumed
    pub fn ahead(mut self, pattern: &'static str) -> Self {
        self.ahead = Some(pattern);
        self
    }

    /// Match case-insensitively
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Reject matches right after one of `chars`
    pub fn not_after(mut self, chars: &'static [char]) -> Self {
        self.context.push(ContextDef::NotAfter(chars));
        self
    }

    /// Only match at the start of a line
    pub fn at_line_start(mut self) -> Self {
        self.context.push(ContextDef::LineStart);
        self
    }

    /// Reject matches where `pattern` matches `skip` bytes past the match start
    pub fn not_followed_by(mut self, skip: usize, pattern: &'static str) -> Self {
        self.context.push(ContextDef::NotFollowedBy { skip, pattern });
        self
    }

    fn compile(&self, state: &str, flags: Flags) -> Result<Rule, LexError> {
        let mut inline = String::new();
        if flags.dot_all {
            inline.push('s');
        }
        if flags.multi_line {
            inline.push('m');
        }
        if self.ignore_case {
            inline.push('i');
        }

        let mut source = String::new();
        if !inline.is_empty() {
            source.push_str(&format!("(?{})", inline));
        }
        source.push_str(&format!(r"\A(?:{})", self.pattern));
        if let Some(ahead) = self.ahead {
            source.push_str(&format!("(?P<{}>{})", LOOKAHEAD_GROUP, ahead));
        }

        let regex = compile_pattern(state, &source)?;
        let context = self
            .context
            .iter()
            .map(|def| -> Result<Context, LexError> {
                Ok(match def {
                    ContextDef::NotAfter(chars) => Context::NotAfter(*chars),
                    ContextDef::LineStart => Context::LineStart,
                    ContextDef::NotFollowedBy { skip, pattern } => Context::NotFollowedBy {
                        skip: *skip,
                        pattern: compile_pattern(state, &format!(r"\A(?:{})", pattern))?,
                    },
                })
            })
            .collect::<Result<Vec<_>, LexError>>()?;

        Ok(Rule {
            state: state.to_string(),
            regex,
            action: self.action.clone(),
            context,
        })
    }
}

fn compile_pattern(state: &str, source: &str) -> Result<Regex, LexError> {
    Regex::new(source).map_err(|e| LexError::InvalidPattern {
        state: state.to_string(),
        message: e.to_string(),
    })
}

/// An entry of a state: a rule or an include
#[derive(Debug, Clone)]
pub enum Entry {
    Rule(RuleDef),
    Include(&'static str),
}

impl From<RuleDef> for Entry {
    fn from(def: RuleDef) -> Self {
        Entry::Rule(def)
    }
}

/// A compiled rule, ready for matching
#[derive(Debug, Clone)]
pub struct Rule {
    state: String,
    regex: Regex,
    action: Action,
    context: Vec<Context>,
}

/// A successful rule match
#[derive(Debug)]
pub struct RuleMatch<'s> {
    /// Capture groups, relative to the match start
    pub captures: Captures<'s>,
    /// Absolute end of the consumed text
    pub end: usize,
}

impl Rule {
    /// State this rule was declared in
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Try this rule at `pos`
    ///
    /// Returns `None` if the pattern does not match, if a context check fails, or if the
    /// match would consume nothing.
    pub fn match_at<'s>(&self, source: &'s str, pos: usize) -> Option<RuleMatch<'s>> {
        let captures = self.regex.captures(&source[pos..])?;
        let consumed = match captures.name(LOOKAHEAD_GROUP) {
            Some(ahead) => ahead.start(),
            None => captures.get(0)?.end(),
        };
        if consumed == 0 {
            return None;
        }
        if !self.context.iter().all(|c| c.allows(source, pos)) {
            return None;
        }
        Some(RuleMatch {
            captures,
            end: pos + consumed,
        })
    }
}

/// Declarative description of a lexer
#[derive(Debug, Clone)]
pub struct Grammar {
    name: &'static str,
    flags: Flags,
    states: HashMap<&'static str, Vec<Entry>>,
}

impl Grammar {
    pub fn new(name: &'static str, flags: Flags) -> Self {
        Grammar {
            name,
            flags,
            states: HashMap::new(),
        }
    }

    /// Adds (or replaces) a state
    pub fn state(mut self, name: &'static str, entries: Vec<Entry>) -> Self {
        self.states.insert(name, entries);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Flattens the `root` state into compiled rules, in priority order
    pub fn build(&self) -> Result<Vec<Rule>, LexError> {
        let mut rules = Vec::new();
        let mut stack = Vec::new();
        self.flatten("root", &mut stack, &mut rules)?;
        log::debug!("{}: built {} rules", self.name, rules.len());
        Ok(rules)
    }

    fn flatten(
        &self,
        state: &'static str,
        stack: &mut Vec<&'static str>,
        rules: &mut Vec<Rule>,
    ) -> Result<(), LexError> {
        if stack.contains(&state) {
            return Err(LexError::IncludeCycle(state.to_string()));
        }
        let entries = self
            .states
            .get(state)
            .ok_or_else(|| LexError::UnknownState(state.to_string()))?;

        stack.push(state);
        for entry in entries {
            match entry {
                Entry::Rule(def) => rules.push(def.compile(state, self.flags)?),
                Entry::Include(name) => self.flatten(*name, stack, rules)?,
            }
        }
        stack.pop();
        Ok(())
    }
}
