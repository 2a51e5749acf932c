//! Token types produced by the scanner.
//!
//! A [`Token`] pairs a [`TokenKind`] with the literal text it was scanned from
//! and the [`Location`] where it starts.
//!
//! ## Examples
//!
//! ```rust
//! use bibtex_scanner::{Location, Token, TokenKind};
//!
//! let tok = Token::new(TokenKind::BareIdent, "article", Location::new(1, 1));
//! assert_eq!(tok.to_string(), "BAREIDENT \"article\" at 1:1");
//! assert!(TokenKind::Comment.is_keyword());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token classifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// An unrecognized character or an unterminated literal.
    Illegal,
    Eof,
    /// `@`
    AtSign,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `=`
    Equal,
    /// `#`
    Pound,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// A delimited literal value, or an integer inside a field value.
    Ident,
    /// An undelimited literal such as an entry type or citation key.
    BareIdent,
    /// The reserved word `comment`, in any case.
    Comment,
    /// The reserved word `preamble`, in any case.
    Preamble,
    /// The reserved word `string`, in any case.
    String,
}

impl TokenKind {
    /// Returns the conventional upper-case name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::AtSign => "ATSIGN",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Equal => "EQUAL",
            TokenKind::Pound => "POUND",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Ident => "IDENT",
            TokenKind::BareIdent => "BAREIDENT",
            TokenKind::Comment => "COMMENT",
            TokenKind::Preamble => "PREAMBLE",
            TokenKind::String => "STRING",
        }
    }

    /// Returns true for the reserved bare words that select alternate entry grammars.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Preamble | TokenKind::String
        )
    }

    /// Returns true for kinds whose literal is taken from the input rather than fixed.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::BareIdent) || self.is_keyword()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `line:column` source location.
///
/// Lines start at 1. The column is the number of characters consumed on the
/// current line before the token, so the first character of a line is at column 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified piece of input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    unterminated: bool,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, literal: impl Into<String>, location: Location) -> Self {
        Token {
            kind,
            literal: literal.into(),
            location,
            unterminated: false,
        }
    }

    /// An [`Illegal`](TokenKind::Illegal) token for a literal cut short by the end of input.
    pub(crate) fn unterminated(literal: String, location: Location) -> Self {
        Token {
            kind: TokenKind::Illegal,
            literal,
            location,
            unterminated: true,
        }
    }

    /// Returns true if this is an illegal token produced by input ending inside
    /// a braced or quoted literal.
    #[must_use]
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.literal, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::AtSign.to_string(), "ATSIGN");
        assert_eq!(TokenKind::BareIdent.as_str(), "BAREIDENT");
        assert_eq!(TokenKind::Eof.as_str(), "EOF");
    }

    #[test]
    fn test_kind_classes() {
        assert!(TokenKind::Preamble.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(TokenKind::String.is_literal());
        assert!(TokenKind::Ident.is_literal());
        assert!(!TokenKind::LBrace.is_literal());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_token_display() {
        let tok = Token::new(TokenKind::Ident, "a{b}c", Location::new(2, 9));
        assert_eq!(tok.to_string(), "IDENT \"a{b}c\" at 2:9");
        assert!(!tok.is_unterminated());
    }
}
