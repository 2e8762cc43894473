//! Lexer registry
//!
//! Registration metadata for the TypoScript lexers: display name, aliases, file name globs
//! and MIME types. A host picks a lexer through one of the lookups here; the lexers
//! themselves do not depend on this module.

use crate::typoscript::lexing::{
    css_data, html_data, typoscript, LexError, Lexer, RegexLexer, CSS_DATA_LEXER,
    HTML_DATA_LEXER, TYPOSCRIPT_LEXER,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::path::Path;

/// Metadata of a registered lexer
#[derive(Debug, Clone, Serialize)]
pub struct LexerInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
    #[serde(skip)]
    lexer: &'static Lazy<RegexLexer>,
}

impl LexerInfo {
    /// The lexer itself, built on first use
    pub fn lexer(&self) -> &'static dyn Lexer {
        let lexer: &'static RegexLexer = Lazy::force(self.lexer);
        lexer
    }

    fn matches_filename(&self, file_name: &str) -> bool {
        self.filenames
            .iter()
            .any(|pattern| glob_match(pattern, file_name))
    }
}

static REGISTRY: [LexerInfo; 3] = [
    LexerInfo {
        name: typoscript::NAME,
        aliases: &["typoscript"],
        filenames: &["*.ts", "*.txt"],
        mimetypes: &["text/x-typoscript"],
        lexer: &TYPOSCRIPT_LEXER,
    },
    LexerInfo {
        name: css_data::NAME,
        aliases: &["typoscriptcssdata"],
        filenames: &[],
        mimetypes: &[],
        lexer: &CSS_DATA_LEXER,
    },
    LexerInfo {
        name: html_data::NAME,
        aliases: &["typoscripthtmldata"],
        filenames: &[],
        mimetypes: &[],
        lexer: &HTML_DATA_LEXER,
    },
];

/// All registered lexers
pub fn all() -> &'static [LexerInfo] {
    &REGISTRY
}

/// Finds a lexer by alias or display name, ignoring case
pub fn find_by_alias(alias: &str) -> Result<&'static LexerInfo, LexError> {
    let wanted = alias.to_lowercase();
    REGISTRY
        .iter()
        .find(|info| {
            info.name.to_lowercase() == wanted || info.aliases.iter().any(|a| *a == wanted)
        })
        .ok_or_else(|| LexError::UnknownLexer(alias.to_string()))
}

/// Finds a lexer whose file name globs match the base name of `path`
pub fn find_for_filename(path: &str) -> Option<&'static LexerInfo> {
    let file_name = Path::new(path).file_name()?.to_str()?;
    REGISTRY.iter().find(|info| info.matches_filename(file_name))
}

/// Finds a lexer by MIME type
pub fn find_for_mimetype(mimetype: &str) -> Option<&'static LexerInfo> {
    REGISTRY
        .iter()
        .find(|info| info.mimetypes.iter().any(|m| m.eq_ignore_ascii_case(mimetype)))
}

/// Picks the lexer for `path`: by alias when one is given, else by file name, else TypoScript
pub fn select(path: &str, alias: Option<&str>) -> Result<&'static LexerInfo, LexError> {
    match alias {
        Some(alias) => find_by_alias(alias),
        None => match find_for_filename(path) {
            Some(info) => Ok(info),
            None => {
                log::debug!("no lexer registered for {}, using {}", path, REGISTRY[0].name);
                Ok(&REGISTRY[0])
            }
        },
    }
}

/// Matches `name` against a glob with `*` (any run) and `?` (any single character)
fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    // Position of the last `*` and the name index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(c) if *c == '?' || *c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    n = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|c| *c == '*')
}
