//! # bibtex_scanner
//!
//! A lexical scanner for BibTeX bibliography databases.
//!
//! The scanner turns raw `.bib` text into a stream of classified [`Token`]s for an
//! entry parser to consume. It handles the lexical rules that make BibTeX awkward to
//! tokenize by hand:
//!
//! - **Brace balancing**: `{The {\TeX}book}` is one value, inner braces included
//! - **Quoted values**: a quote inside a braced region, as in `"a {"b"} c"`, does not
//!   end the value
//! - **Field context**: after `=`, a `{` opens a value rather than an entry, and
//!   integers such as `1999` are values rather than bare keys
//! - **Reserved words**: `@comment`, `@preamble` and `@string` are recognized in any case
//! - **Positions**: every token carries the `line:column` where it starts
//!
//! ## Quick Start
//!
//! ```rust
//! use bibtex_scanner::{tokenize, TokenKind};
//!
//! let tokens = tokenize("@article{einstein1905, year = 1905}").unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::AtSign,
//!         TokenKind::BareIdent,
//!         TokenKind::LBrace,
//!         TokenKind::BareIdent,
//!         TokenKind::Comma,
//!         TokenKind::BareIdent,
//!         TokenKind::Equal,
//!         TokenKind::Ident,
//!         TokenKind::RBrace,
//!     ]
//! );
//! ```
//!
//! ### Pulling tokens one at a time
//!
//! [`Scanner::scan`] never fails. Malformed input produces
//! [`TokenKind::Illegal`] tokens, and the end of input is a distinguished
//! [`TokenKind::Eof`] token that repeats on every further call.
//!
//! ```rust
//! use bibtex_scanner::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::from_str("title = \"unclosed");
//! (&mut scanner).scan(); // title
//! (&mut scanner).scan(); // =
//! let tok = (&mut scanner).scan();
//! assert_eq!(tok.kind, TokenKind::Illegal);
//! assert_eq!(tok.literal, "unclosed");
//! assert_eq!(tok.location.to_string(), "1:8");
//! assert_eq!((&mut scanner).scan().kind, TokenKind::Eof);
//! ```
//!
//! ## Logging
//!
//! Scanning emits [`tracing`] events: one `TRACE` event per token, `DEBUG` for
//! illegal tokens, and `WARN` when the source contains invalid UTF-8 or fails
//! to read. Install any subscriber to see them.

pub mod error;
pub mod options;
pub mod reader;
pub mod scanner;
pub mod token;

pub use error::{Error, Result};
pub use options::ScannerOptions;
pub use reader::{Position, Reader};
pub use scanner::Scanner;
pub use token::{Location, Token, TokenKind};

use std::io;

/// Scans a whole string into tokens, stopping at the first illegal token.
///
/// The returned tokens do not include the final EOF token.
///
/// # Examples
///
/// ```rust
/// use bibtex_scanner::tokenize;
///
/// let tokens = tokenize("@string{me = \"Ada\"}").unwrap();
/// assert_eq!(tokens[1].literal, "string");
/// assert_eq!(tokens[5].literal, "Ada");
/// ```
///
/// # Errors
///
/// Returns [`Error::IllegalCharacter`] or [`Error::UnterminatedLiteral`] for the
/// first illegal token, with its line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    tokenize_with_options(input, ScannerOptions::default())
}

/// Scans a whole string into tokens with custom options.
///
/// # Errors
///
/// Returns an error for the first illegal token.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn tokenize_with_options(input: &str, options: ScannerOptions) -> Result<Vec<Token>> {
    collect(Scanner::with_options(input.as_bytes(), options))
}

/// Scans an I/O stream into tokens.
///
/// # Examples
///
/// ```rust
/// use bibtex_scanner::tokenize_reader;
/// use std::io::Cursor;
///
/// let tokens = tokenize_reader(Cursor::new(b"@misc{x}")).unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
///
/// # Errors
///
/// Returns an error for the first illegal token, or [`Error::Io`] if reading
/// from the source failed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn tokenize_reader<R>(reader: R) -> Result<Vec<Token>>
where
    R: io::Read,
{
    collect(Scanner::new(reader))
}

fn collect<R: io::Read>(mut scanner: Scanner<R>) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for token in scanner.by_ref() {
        if let Some(err) = Error::from_token(&token) {
            return Err(err);
        }
        tokens.push(token);
    }
    match scanner.error() {
        Some(err) => Err(err.clone()),
        None => Ok(tokens),
    }
}
