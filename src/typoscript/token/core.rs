//! Token categories produced by the TypoScript lexers
//!
//!     The categories form a closed, flat vocabulary. Each one carries a dotted label
//!     (`Name.Constant`, `String.Symbol`, ...) so that a rendering layer can map it to a
//!     display style, and a family (`Name`, `String`, ...) for coarser styling.
//!
//!     A token is never more than a category: the text it covers lives in the source and
//!     is addressed by the byte range paired with it in the lexer output.

use serde::Serialize;
use std::fmt;

/// Every category a TypoScript lexer can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// Whitespace, condition bodies and plain words
    Text,
    Comment,
    /// Constants, registers, markers and condition names
    NameConstant,
    /// stdWrap functions such as `typolink` or `userFunc`
    NameFunction,
    /// Top-level objects such as `page`, `lib` or `plugin`
    NameBuiltin,
    /// Content objects, menu objects and menu states
    NameClass,
    String,
    /// Braces, brackets and parentheses
    StringSymbol,
    /// Hex colors like `#ff0077`
    StringChar,
    NumberHex,
    NumberInteger,
    Operator,
    Punctuation,
    /// A single character no rule accepted
    Error,
}

/// Coarse grouping of token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenFamily {
    Text,
    Comment,
    Name,
    String,
    Number,
    Operator,
    Punctuation,
    Error,
}

/// All token categories, in declaration order
pub const ALL_TOKENS: &[Token] = &[
    Token::Text,
    Token::Comment,
    Token::NameConstant,
    Token::NameFunction,
    Token::NameBuiltin,
    Token::NameClass,
    Token::String,
    Token::StringSymbol,
    Token::StringChar,
    Token::NumberHex,
    Token::NumberInteger,
    Token::Operator,
    Token::Punctuation,
    Token::Error,
];

impl Token {
    /// Dotted label of the category, e.g. `Name.Constant`
    pub fn label(self) -> &'static str {
        match self {
            Token::Text => "Text",
            Token::Comment => "Comment",
            Token::NameConstant => "Name.Constant",
            Token::NameFunction => "Name.Function",
            Token::NameBuiltin => "Name.Builtin",
            Token::NameClass => "Name.Class",
            Token::String => "String",
            Token::StringSymbol => "String.Symbol",
            Token::StringChar => "String.Char",
            Token::NumberHex => "Number.Hex",
            Token::NumberInteger => "Number.Integer",
            Token::Operator => "Operator",
            Token::Punctuation => "Punctuation",
            Token::Error => "Error",
        }
    }

    /// Parses a dotted label back into a category
    pub fn from_label(label: &str) -> Option<Token> {
        ALL_TOKENS.iter().copied().find(|t| t.label() == label)
    }

    pub fn family(self) -> TokenFamily {
        match self {
            Token::Text => TokenFamily::Text,
            Token::Comment => TokenFamily::Comment,
            Token::NameConstant | Token::NameFunction | Token::NameBuiltin | Token::NameClass => {
                TokenFamily::Name
            }
            Token::String | Token::StringSymbol | Token::StringChar => TokenFamily::String,
            Token::NumberHex | Token::NumberInteger => TokenFamily::Number,
            Token::Operator => TokenFamily::Operator,
            Token::Punctuation => TokenFamily::Punctuation,
            Token::Error => TokenFamily::Error,
        }
    }

    /// Check if this token is a fallback for unrecognised input
    pub fn is_error(self) -> bool {
        matches!(self, Token::Error)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
