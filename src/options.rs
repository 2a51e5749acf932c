//! Configuration options for the scanner.
//!
//! The defaults reproduce classic BibTeX lexing. [`ScannerOptions`] lets callers
//! relax individual rules.
//!
//! ## Examples
//!
//! ```rust
//! use bibtex_scanner::{Scanner, ScannerOptions, TokenKind};
//!
//! // Keep integer field values as bare identifiers
//! let options = ScannerOptions::new().with_numeric_idents(false);
//! let mut scanner = Scanner::with_options("year = 1999".as_bytes(), options);
//! (&mut scanner).scan(); // year
//! (&mut scanner).scan(); // =
//! assert_eq!((&mut scanner).scan().kind, TokenKind::BareIdent);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration options for [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use bibtex_scanner::ScannerOptions;
///
/// let options = ScannerOptions::new()
///     .with_unicode_idents(true)
///     .with_trim_trailing_whitespace(false);
/// assert!(options.numeric_idents);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerOptions {
    /// Classify integer bare literals inside a field value as `IDENT`.
    pub numeric_idents: bool,
    /// Trim trailing whitespace from bare literals.
    pub trim_trailing_whitespace: bool,
    /// Accept non-ASCII letters and digits in bare identifiers.
    pub unicode_idents: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        ScannerOptions {
            numeric_idents: true,
            trim_trailing_whitespace: true,
            unicode_idents: false,
        }
    }
}

impl ScannerOptions {
    /// Creates default options (ASCII identifiers, numeric field values as `IDENT`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bibtex_scanner::ScannerOptions;
    ///
    /// let options = ScannerOptions::new();
    /// assert!(options.numeric_idents);
    /// assert!(!options.unicode_idents);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether integers inside field values are scanned as `IDENT`.
    #[must_use]
    pub fn with_numeric_idents(mut self, enabled: bool) -> Self {
        self.numeric_idents = enabled;
        self
    }

    /// Sets whether trailing whitespace is trimmed from bare literals.
    ///
    /// Whitespace between words of a bare literal is always kept.
    #[must_use]
    pub fn with_trim_trailing_whitespace(mut self, enabled: bool) -> Self {
        self.trim_trailing_whitespace = enabled;
        self
    }

    /// Sets whether non-ASCII alphanumeric characters may appear in bare identifiers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bibtex_scanner::{tokenize_with_options, ScannerOptions, TokenKind};
    ///
    /// let options = ScannerOptions::new().with_unicode_idents(true);
    /// let tokens = tokenize_with_options("@article{müller2020,", options).unwrap();
    /// assert_eq!(tokens[3].literal, "müller2020");
    /// ```
    #[must_use]
    pub fn with_unicode_idents(mut self, enabled: bool) -> Self {
        self.unicode_idents = enabled;
        self
    }
}
