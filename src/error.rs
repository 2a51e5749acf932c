//! Error types for the tokenizing convenience layer.
//!
//! The scanning core never fails: every call to [`Scanner::scan`](crate::Scanner::scan)
//! returns a token, and problems in the input surface as
//! [`TokenKind::Illegal`](crate::TokenKind::Illegal) tokens. The types here are for
//! callers that would rather stop at the first problem, such as [`tokenize`](crate::tokenize).
//!
//! ## Error Categories
//!
//! - **Illegal characters**: a character that cannot start any token
//! - **Unterminated literals**: input ended inside a braced or quoted value
//! - **I/O Errors**: the underlying source failed while being read
//!
//! ## Examples
//!
//! ```rust
//! use bibtex_scanner::{tokenize, Error};
//!
//! let err = tokenize("@article{key, title = {unbalanced").unwrap_err();
//! assert!(matches!(err, Error::UnterminatedLiteral { .. }));
//! assert!(err.to_string().contains("line 1"));
//! ```

use crate::token::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Represents all errors reported while turning BibTeX text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error while reading the source
    #[error("IO error: {0}")]
    Io(String),

    /// A character that cannot begin any token
    #[error("Illegal character {ch:?} at line {line}, column {col}")]
    IllegalCharacter { line: usize, col: usize, ch: String },

    /// Input ended before a braced or quoted literal was closed
    #[error("Unterminated literal starting at line {line}, column {col}: {partial:?}\nHelp: check for a missing closing brace or quote")]
    UnterminatedLiteral {
        line: usize,
        col: usize,
        partial: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an illegal-character error at the given location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bibtex_scanner::Error;
    ///
    /// let err = Error::illegal_character(3, 7, "%");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn illegal_character(line: usize, col: usize, ch: &str) -> Self {
        Error::IllegalCharacter {
            line,
            col,
            ch: ch.to_string(),
        }
    }

    /// Creates an unterminated-literal error carrying what was read before the end of input.
    pub fn unterminated_literal(line: usize, col: usize, partial: &str) -> Self {
        Error::UnterminatedLiteral {
            line,
            col,
            partial: partial.to_string(),
        }
    }

    /// Converts an [`Illegal`](TokenKind::Illegal) token into the matching error.
    ///
    /// Returns `None` for every other token kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bibtex_scanner::{Error, Location, Token, TokenKind};
    ///
    /// let tok = Token::new(TokenKind::Illegal, "%", Location::new(1, 4));
    /// assert_eq!(Error::from_token(&tok), Some(Error::illegal_character(1, 4, "%")));
    /// ```
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind != TokenKind::Illegal {
            return None;
        }
        let loc = token.location;
        if token.is_unterminated() {
            Some(Error::unterminated_literal(
                loc.line,
                loc.column,
                &token.literal,
            ))
        } else {
            Some(Error::illegal_character(loc.line, loc.column, &token.literal))
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for source reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
