//! Catalog configuration and cage construction options.

use std::borrow::Cow;

/// Which implementation backs the markup filters.
///
/// Both strip tags; they differ only in how the escaping filters spell
/// entities. Each character is encoded once under either backend, so a
/// quote never comes out as `&#38;#39;`.
///
/// `Native` is the default. Select `Extended` explicitly for numeric
/// entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Named entities (`&amp;`, `&quot;`, `&#039;`, `&lt;`, `&gt;`).
    #[default]
    Native,
    /// Numeric entities throughout; `no_tags` also encodes quotes.
    Extended,
}

/// Decimal and thousands separators used by `is_int` and `is_float`.
///
/// # Examples
///
/// ```
/// use input_cage::NumericLocale;
///
/// let german = NumericLocale::new(',', Some('.'));
/// assert_eq!(german.normalize("1.234,5"), "1234.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLocale {
    decimal_point: char,
    thousands_sep: Option<char>,
}

impl NumericLocale {
    /// The "C" locale: `.` decimal point, no thousands separator.
    pub const C: Self = Self {
        decimal_point: '.',
        thousands_sep: None,
    };

    /// Creates a locale with the given separators.
    pub fn new(decimal_point: char, thousands_sep: Option<char>) -> Self {
        Self {
            decimal_point,
            thousands_sep,
        }
    }

    /// Returns the decimal point.
    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    /// Returns the thousands separator, if any.
    pub fn thousands_sep(&self) -> Option<char> {
        self.thousands_sep
    }

    /// Rewrites `text` into canonical form: the decimal point becomes `.`
    /// and thousands separators are removed.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if *self == Self::C {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if Some(c) == self.thousands_sep {
                continue;
            }
            out.push(if c == self.decimal_point { '.' } else { c });
        }
        Cow::Owned(out)
    }
}

impl Default for NumericLocale {
    fn default() -> Self {
        Self::C
    }
}

/// Configuration threaded through the catalog and every cage built from it.
///
/// # Examples
///
/// ```
/// use input_cage::{Backend, Config};
///
/// let config = Config::new()
///     .with_max_depth(8)
///     .with_backend(Backend::Extended);
///
/// assert_eq!(config.max_depth(), 8);
/// assert_eq!(config.backend(), Backend::Extended);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_depth: usize,
    backend: Backend,
    locale: NumericLocale,
}

impl Config {
    /// Default nesting ceiling for the recursive applicator.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            backend: Backend::default(),
            locale: NumericLocale::default(),
        }
    }

    /// Sets the maximum container nesting accepted by the applicator.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Selects the markup filter backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the numeric locale used by `is_int` and `is_float`.
    pub fn with_locale(mut self, locale: NumericLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Returns the nesting ceiling.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the markup filter backend.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the numeric locale.
    pub fn locale(&self) -> &NumericLocale {
        &self.locale
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Options fixed when a cage is constructed.
///
/// `strict` clears the caller's container on [`Cage::ingest`](crate::Cage::ingest).
/// `keep_original` retains an untouched copy readable through
/// [`Cage::get_raw`](crate::Cage::get_raw).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CageOptions {
    strict: bool,
    keep_original: bool,
}

impl CageOptions {
    /// Strict ingestion, no raw access.
    pub fn new() -> Self {
        Self {
            strict: true,
            keep_original: false,
        }
    }

    /// Sets whether ingestion clears the caller's container.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether raw values stay retrievable.
    pub fn keep_original(mut self, keep_original: bool) -> Self {
        self.keep_original = keep_original;
        self
    }

    /// Returns true if ingestion clears the caller's container.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns true if raw values stay retrievable.
    pub fn keeps_original(&self) -> bool {
        self.keep_original
    }
}

impl Default for CageOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_depth(), Config::DEFAULT_MAX_DEPTH);
        assert_eq!(config.backend(), Backend::Native);
        assert_eq!(*config.locale(), NumericLocale::C);
    }

    #[test]
    fn c_locale_normalize_borrows() {
        let normalized = NumericLocale::C.normalize("1,234.5");
        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert_eq!(normalized, "1,234.5");
    }

    #[test]
    fn locale_normalize_swaps_separators() {
        let locale = NumericLocale::new(',', Some('.'));
        assert_eq!(locale.normalize("1.000.000,25"), "1000000.25");
        assert_eq!(locale.decimal_point(), ',');
        assert_eq!(locale.thousands_sep(), Some('.'));
    }

    #[test]
    fn cage_options_defaults() {
        let options = CageOptions::default();
        assert!(options.is_strict());
        assert!(!options.keeps_original());
    }

    #[test]
    fn cage_options_builder() {
        let options = CageOptions::new().strict(false).keep_original(true);
        assert!(!options.is_strict());
        assert!(options.keeps_original());
    }
}
