//! Configuration options for query-string decoding.
//!
//! This module provides the types that control how a query string is
//! decomposed:
//!
//! - [`ParseOptions`]: main configuration struct
//! - [`Delimiter`]: pair separator, either a literal string or a regex
//!
//! ## Examples
//!
//! ```rust
//! use nested_qs::{parse_with_options, Delimiter, ParseOptions};
//!
//! // Semicolon-separated pairs
//! let options = ParseOptions::new().with_delimiter(Delimiter::literal(";"));
//! let tree = parse_with_options("a=1;b=2", options).unwrap();
//! assert_eq!(tree.len(), 2);
//!
//! // Deeper nesting than the default cutoff of 5
//! let options = ParseOptions::new().with_depth(10);
//! let tree = parse_with_options("a[b][c][d][e][f][g]=x", options).unwrap();
//! assert!(tree.get("a").is_some());
//! ```

use regex::Regex;

/// Pair separator for the raw query text.
///
/// Most query strings use `&`, but alternative literals (`;`) and pattern
/// separators are supported.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_with_options, Delimiter, ParseOptions};
/// use regex::Regex;
///
/// let pattern = Regex::new(r"[;,] *").unwrap();
/// let options = ParseOptions::new().with_delimiter(Delimiter::Pattern(pattern));
/// let tree = parse_with_options("a=b; c=d", options).unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub enum Delimiter {
    /// Split on a literal string. An empty literal is not usable as a
    /// separator and falls back to the default `&`.
    Literal(String),
    /// Split on every match of a regular expression.
    Pattern(Regex),
}

impl Delimiter {
    /// Creates a literal delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Delimiter;
    ///
    /// let delimiter = Delimiter::literal(";");
    /// ```
    pub fn literal(separator: impl Into<String>) -> Self {
        Delimiter::Literal(separator.into())
    }

    /// Splits `input` into at most `limit` parts, left to right. Parts past
    /// the limit are dropped.
    pub(crate) fn split<'a>(&'a self, input: &'a str, limit: Option<usize>) -> Vec<&'a str> {
        let parts: Box<dyn Iterator<Item = &'a str> + 'a> = match self {
            Delimiter::Literal(separator) => {
                let separator = if separator.is_empty() {
                    "&"
                } else {
                    separator.as_str()
                };
                Box::new(input.split(separator))
            }
            Delimiter::Pattern(pattern) => Box::new(pattern.split(input)),
        };
        match limit {
            Some(count) => parts.take(count).collect(),
            None => parts.collect(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Literal("&".to_string())
    }
}

impl From<Regex> for Delimiter {
    fn from(pattern: Regex) -> Self {
        Delimiter::Pattern(pattern)
    }
}

/// Configuration for a single parse call.
///
/// All fields have conservative defaults; every call receives its own copy
/// and no state persists between calls.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_with_options, ParseOptions};
///
/// // Dot notation off by default
/// let tree = parse_with_options("a.b=c", ParseOptions::new()).unwrap();
/// assert!(tree.contains_key("a.b"));
///
/// let options = ParseOptions::new().with_allow_dots(true);
/// let tree = parse_with_options("a.b=c", options).unwrap();
/// let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
/// assert_eq!(a.get("b").and_then(|v| v.as_str()), Some("c"));
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Separator between raw pairs. Default `&`.
    pub delimiter: Delimiter,
    /// Maximum number of bracket groups decomposed per key; overflow past the
    /// cutoff collapses into one literal trailing key. Default 5.
    pub depth: usize,
    /// Ceiling on explicit array indices. An index above a non-negative
    /// ceiling is a fatal error; a negative ceiling disqualifies every index,
    /// so indexed keys build mappings instead. Default 20.
    pub array_limit: i64,
    /// Maximum number of pairs taken from the input; extras are silently
    /// dropped. `None` means unbounded. Default `Some(1000)`.
    pub parameter_limit: Option<usize>,
    /// Whether `[]` and numeric-index segments build arrays at all. When off,
    /// they build mappings keyed by the index text. Default true.
    pub parse_arrays: bool,
    /// Whether `.` outside brackets denotes nesting, so `a.b[c]` reads as
    /// `a[b][c]`. Default false.
    pub allow_dots: bool,
    /// Whether a bare key with no `=` decodes to null instead of the empty
    /// string. Default false.
    pub strict_null_handling: bool,
    /// Whether keys like `constructor` or `hasOwnProperty`, which collide
    /// with inherited object properties in loosely-typed consumers, may be
    /// stored. Default false: such keys are silently dropped.
    pub allow_prototypes: bool,
    /// Declares that result mappings carry no inherited-property surface, so
    /// reserved keys are safe to store. Always true of [`crate::QsMap`]; the
    /// flag's only observable effect is lifting the reserved-key guard, like
    /// [`ParseOptions::allow_prototypes`]. Default false.
    pub plain_objects: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            delimiter: Delimiter::default(),
            depth: 5,
            array_limit: 20,
            parameter_limit: Some(1000),
            parse_arrays: true,
            allow_dots: false,
            strict_null_handling: false,
            allow_prototypes: false,
            plain_objects: false,
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.depth, 5);
    /// assert_eq!(options.array_limit, 20);
    /// assert!(options.parse_arrays);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pair delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the nesting-depth cutoff.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::{parse_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_depth(1);
    /// let tree = parse_with_options("a[b][c]=d", options).unwrap();
    /// let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
    /// let b = a.get("b").and_then(|v| v.as_object()).unwrap();
    /// // Everything past the cutoff stays one literal key
    /// assert_eq!(b.get("[c]").and_then(|v| v.as_str()), Some("d"));
    /// ```
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the explicit-index ceiling for arrays.
    #[must_use]
    pub fn with_array_limit(mut self, array_limit: i64) -> Self {
        self.array_limit = array_limit;
        self
    }

    /// Sets the maximum pair count, or `None` for unbounded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::{parse_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_parameter_limit(Some(1));
    /// let tree = parse_with_options("a=b&c=d", options).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub fn with_parameter_limit(mut self, parameter_limit: Option<usize>) -> Self {
        self.parameter_limit = parameter_limit;
        self
    }

    /// Enables or disables array decoding.
    #[must_use]
    pub fn with_parse_arrays(mut self, parse_arrays: bool) -> Self {
        self.parse_arrays = parse_arrays;
        self
    }

    /// Enables or disables dot notation.
    #[must_use]
    pub fn with_allow_dots(mut self, allow_dots: bool) -> Self {
        self.allow_dots = allow_dots;
        self
    }

    /// Enables or disables strict null handling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::{parse_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_strict_null_handling(true);
    /// let tree = parse_with_options("flag", options).unwrap();
    /// assert!(tree.get("flag").unwrap().is_null());
    /// ```
    #[must_use]
    pub fn with_strict_null_handling(mut self, strict_null_handling: bool) -> Self {
        self.strict_null_handling = strict_null_handling;
        self
    }

    /// Allows reserved keys such as `constructor` to be stored.
    #[must_use]
    pub fn with_allow_prototypes(mut self, allow_prototypes: bool) -> Self {
        self.allow_prototypes = allow_prototypes;
        self
    }

    /// Declares prototype-free result mappings, lifting the reserved-key
    /// guard.
    #[must_use]
    pub fn with_plain_objects(mut self, plain_objects: bool) -> Self {
        self.plain_objects = plain_objects;
        self
    }

    /// True when reserved keys may be stored under these options.
    #[inline]
    pub(crate) fn prototypes_allowed(&self) -> bool {
        self.allow_prototypes || self.plain_objects
    }
}
