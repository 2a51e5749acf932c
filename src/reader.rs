//! Character reader with one-character push-back and line/column tracking.
//!
//! [`Reader`] decodes any [`io::Read`] source as UTF-8 one scalar value at a
//! time. Every read advances a [`Position`] cursor, and [`Reader::unread`] undoes
//! exactly the last read, including one that crossed a line boundary.
//!
//! ```rust
//! use bibtex_scanner::reader::Reader;
//!
//! let mut reader = Reader::new("a\nb".as_bytes());
//! assert_eq!(reader.read(), Some('a'));
//! assert_eq!(reader.read(), Some('\n'));
//! assert_eq!(reader.location().to_string(), "2:0");
//!
//! reader.unread();
//! assert_eq!(reader.location().to_string(), "1:1");
//! assert_eq!(reader.read(), Some('\n'));
//! ```

use crate::error::Error;
use crate::token::Location;
use std::io::{self, BufRead, BufReader};
use tracing::warn;

/// The reader's cursor: the column on the current line and the width of every
/// line completed so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    column: usize,
    lines: Vec<usize>,
}

impl Position {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current line, starting at 1.
    #[must_use]
    pub fn line(&self) -> usize {
        self.lines.len() + 1
    }

    /// Characters consumed since the last newline.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Widths of the completed lines, excluding their newline.
    #[must_use]
    pub fn completed_lines(&self) -> &[usize] {
        &self.lines
    }

    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.line(), self.column)
    }

    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.lines.push(self.column);
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn retreat(&mut self, ch: char) {
        if ch == '\n' {
            // A newline can only be retreated over after it was advanced over,
            // so the history is never empty here.
            self.column = self.lines.pop().unwrap_or_default();
        } else {
            self.column = self.column.saturating_sub(1);
        }
    }
}

/// A buffered UTF-8 character reader with a single push-back slot.
#[derive(Debug)]
pub struct Reader<R> {
    inner: BufReader<R>,
    pos: Position,
    // Character returned by the most recent `read`, cleared by `unread`.
    last: Option<char>,
    pending: Option<char>,
    done: bool,
    error: Option<Error>,
}

impl<R: io::Read> Reader<R> {
    pub fn new(source: R) -> Self {
        Reader {
            inner: BufReader::new(source),
            pos: Position::new(),
            last: None,
            pending: None,
            done: false,
            error: None,
        }
    }

    /// Reads the next character, or `None` at end of input.
    ///
    /// Once the end is reached every further call returns `None` without
    /// moving the cursor.
    pub fn read(&mut self) -> Option<char> {
        let ch = match self.pending.take() {
            Some(ch) => Some(ch),
            None => self.decode(),
        };
        if let Some(ch) = ch {
            self.pos.advance(ch);
        }
        self.last = ch;
        ch
    }

    /// Pushes back the character returned by the immediately preceding [`read`](Self::read).
    ///
    /// Does nothing if the previous call was not a `read` that produced a character.
    pub fn unread(&mut self) {
        if let Some(ch) = self.last.take() {
            self.pos.retreat(ch);
            self.pending = Some(ch);
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.pos
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.pos.location()
    }

    /// The I/O error that ended the input early, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Unwraps this reader, returning the underlying source.
    ///
    /// Bytes already buffered but not yet read are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn decode(&mut self) -> Option<char> {
        let first = self.next_byte_if(|_| true)?;
        if first.is_ascii() {
            return Some(char::from(first));
        }

        let width = match first {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Some(self.replacement(&[first])),
        };
        let mut buf = [first, 0, 0, 0];
        for i in 1..width {
            match self.next_byte_if(|b| (0x80..=0xBF).contains(&b)) {
                Some(b) => buf[i] = b,
                None => return Some(self.replacement(&buf[..i])),
            }
        }
        match std::str::from_utf8(&buf[..width]) {
            Ok(s) => s.chars().next(),
            Err(_) => Some(self.replacement(&buf[..width])),
        }
    }

    // Consumes one byte if the source has one and it satisfies `accept`.
    fn next_byte_if(&mut self, accept: impl Fn(u8) -> bool) -> Option<u8> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.fill_buf() {
                Ok([]) => {
                    self.done = true;
                    return None;
                }
                Ok(buf) => {
                    let b = buf[0];
                    if !accept(b) {
                        return None;
                    }
                    self.inner.consume(1);
                    return Some(b);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(location = %self.pos.location(), error = %e, "source read failed, ending input");
                    self.error = Some(Error::io(&e.to_string()));
                    self.done = true;
                    return None;
                }
            }
        }
    }

    fn replacement(&self, bytes: &[u8]) -> char {
        warn!(location = %self.pos.location(), bytes = ?bytes, "invalid UTF-8 sequence");
        char::REPLACEMENT_CHARACTER
    }
}
