//! The BibTeX token scanner.
//!
//! [`Scanner`] pulls characters from a [`Reader`] and classifies them into
//! [`Token`]s. It is context sensitive in exactly one way: after an `=` it is
//! inside a field value, where `{` opens a braced literal instead of being a
//! plain [`LBrace`](TokenKind::LBrace), and integers scan as
//! [`Ident`](TokenKind::Ident). A `,` or a closing `}` leaves the field value.
//!
//! ## Usage
//!
//! ```rust
//! use bibtex_scanner::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::from_str("@book{knuth84, title = {The {\\TeX}book}}");
//! let kinds: Vec<TokenKind> = scanner.by_ref().map(|t| t.kind).collect();
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
//! assert!((&mut scanner).scan().is_eof());
//! ```

use crate::error::Error;
use crate::options::ScannerOptions;
use crate::reader::Reader;
use crate::token::{Location, Token, TokenKind};
use std::io;
use tracing::{debug, trace};

/// Characters allowed inside a bare identifier besides letters and digits.
const BARE_SYMBOLS: &str = "-_:./+";

/// A pull-based BibTeX tokenizer.
///
/// Call [`scan`](Self::scan) until it returns an [`Eof`](TokenKind::Eof) token,
/// or iterate the scanner to receive every token before the end of input.
#[derive(Debug)]
pub struct Scanner<R> {
    reader: Reader<R>,
    options: ScannerOptions,
    // Set by `=`, cleared by `,` and by `}`.
    in_field: bool,
    finished: bool,
}

impl<'a> Scanner<&'a [u8]> {
    /// Creates a scanner over a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Scanner::new(input.as_bytes())
    }
}

impl<R: io::Read> Scanner<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    pub fn with_options(source: R, options: ScannerOptions) -> Self {
        Scanner {
            reader: Reader::new(source),
            options,
            in_field: false,
            finished: false,
        }
    }

    /// Scans the next token.
    ///
    /// Never fails: problems in the input come back as
    /// [`Illegal`](TokenKind::Illegal) tokens, and once the input is exhausted
    /// every call returns [`Eof`](TokenKind::Eof).
    pub fn scan(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.reader.location();
        let token = self.dispatch(start);

        if token.kind == TokenKind::Illegal {
            debug!(location = %start, literal = %token.literal, unterminated = token.is_unterminated(), "illegal token");
        } else {
            trace!(kind = %token.kind, location = %start, literal = %token.literal, "token");
        }
        token
    }

    /// Whether the scanner is currently inside a field value.
    #[must_use]
    pub fn in_field(&self) -> bool {
        self.in_field
    }

    /// Location of the next unread character.
    #[must_use]
    pub fn location(&self) -> Location {
        self.reader.location()
    }

    #[must_use]
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// The I/O error that cut the input short, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.reader.error()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn dispatch(&mut self, start: Location) -> Token {
        let Some(ch) = self.reader.read() else {
            return Token::new(TokenKind::Eof, "", start);
        };
        if self.is_alphanumeric(ch) {
            self.reader.unread();
            return self.scan_ident(start);
        }

        let kind = match ch {
            '@' => TokenKind::AtSign,
            ':' => TokenKind::Colon,
            '#' => TokenKind::Pound,
            ',' => {
                self.in_field = false;
                TokenKind::Comma
            }
            '=' => {
                self.in_field = true;
                TokenKind::Equal
            }
            '"' => return self.scan_quoted(start),
            '{' if self.in_field => return self.scan_braced(start),
            '{' => TokenKind::LBrace,
            '}' => {
                self.in_field = false;
                TokenKind::RBrace
            }
            _ => TokenKind::Illegal,
        };
        Token::new(kind, ch, start)
    }

    fn scan_ident(&mut self, start: Location) -> Token {
        match self.reader.read() {
            Some('"') => self.scan_quoted(start),
            Some('{') => self.scan_braced(start),
            _ => {
                self.reader.unread();
                self.scan_bare(start)
            }
        }
    }

    /// Scans an undelimited literal and classifies it.
    fn scan_bare(&mut self, start: Location) -> Token {
        let mut buf = String::new();
        let mut trailing = 0;
        while let Some(ch) = self.reader.read() {
            if is_whitespace(ch) {
                trailing += ch.len_utf8();
            } else if self.is_alphanumeric(ch) || is_bare_symbol(ch) {
                trailing = 0;
            } else {
                self.reader.unread();
                break;
            }
            buf.push(ch);
        }
        if self.options.trim_trailing_whitespace {
            buf.truncate(buf.len() - trailing);
        }

        let kind = if buf.eq_ignore_ascii_case("comment") {
            TokenKind::Comment
        } else if buf.eq_ignore_ascii_case("preamble") {
            TokenKind::Preamble
        } else if buf.eq_ignore_ascii_case("string") {
            TokenKind::String
        } else if self.in_field && self.options.numeric_idents && buf.parse::<i64>().is_ok() {
            TokenKind::Ident
        } else {
            TokenKind::BareIdent
        };
        Token::new(kind, buf, start)
    }

    /// Scans a brace-delimited literal whose opening brace was already consumed.
    ///
    /// Backslashes are not escapes, so `\{` still opens a nesting level.
    fn scan_braced(&mut self, start: Location) -> Token {
        let mut buf = String::new();
        let mut depth = 1usize;
        while let Some(ch) = self.reader.read() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Token::new(TokenKind::Ident, buf, start);
                    }
                }
                _ => {}
            }
            buf.push(ch);
        }
        Token::unterminated(buf, start)
    }

    /// Scans a quote-delimited literal whose opening quote was already consumed.
    ///
    /// A quote only closes the literal outside braces, so `"a {"b"} c"` is one value.
    fn scan_quoted(&mut self, start: Location) -> Token {
        let mut buf = String::new();
        let mut depth = 0isize;
        while let Some(ch) = self.reader.read() {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                '"' if depth == 0 => return Token::new(TokenKind::Ident, buf, start),
                _ => {}
            }
            buf.push(ch);
        }
        Token::unterminated(buf, start)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.reader.read() {
            if !is_whitespace(ch) {
                self.reader.unread();
                break;
            }
        }
    }

    fn is_alphanumeric(&self, ch: char) -> bool {
        if self.options.unicode_idents {
            ch.is_alphanumeric()
        } else {
            ch.is_ascii_alphanumeric()
        }
    }
}

impl<R: io::Read> Iterator for Scanner<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.scan();
        if token.is_eof() {
            self.finished = true;
            return None;
        }
        Some(token)
    }
}

impl<R: io::Read> std::iter::FusedIterator for Scanner<R> {}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_bare_symbol(ch: char) -> bool {
    BARE_SYMBOLS.contains(ch)
}
