//! # nested_qs
//!
//! A query-string decoder that expands bracket and dot notation into nested
//! maps and arrays.
//!
//! ## Why nested keys?
//!
//! Plain query-string parsers stop at flat key/value pairs, so structured
//! form data like `user[name]=Alice&user[tags][]=admin` comes out as opaque
//! strings. This crate decomposes such keys into paths and assembles a full
//! tree: mappings for named keys, arrays for `[]` and numeric indices, with
//! pairs that address the same slot merged together.
//!
//! ## Key Features
//!
//! - **Bracket notation**: `a[b][c]=d` becomes `{a: {b: {c: "d"}}}`
//! - **Arrays**: `a[]=1&a[]=2` and `a[0]=1&a[1]=2` both become `{a: ["1", "2"]}`,
//!   including sparse and out-of-order indices
//! - **Dot notation**: opt in to `a.b=c` meaning `a[b]=c`
//! - **Safe by default**: keys that collide with inherited object properties
//!   (`__proto__`, `constructor`, ...) are dropped unless explicitly allowed,
//!   nesting depth and parameter count are bounded, and an oversized explicit
//!   array index is a hard error
//! - **Order preserving**: results are [`QsMap`]s that iterate in the order
//!   keys were first seen
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nested_qs = "0.1"
//! ```
//!
//! ### Basic Parsing
//!
//! ```rust
//! use nested_qs::parse;
//!
//! let tree = parse("user[name]=Alice&user[age]=30&tags[]=a&tags[]=b").unwrap();
//!
//! let user = tree.get("user").and_then(|v| v.as_object()).unwrap();
//! assert_eq!(user.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(user.get("age").and_then(|v| v.as_str()), Some("30"));
//!
//! let tags = tree.get("tags").and_then(|v| v.as_array()).unwrap();
//! assert_eq!(tags.len(), 2);
//! ```
//!
//! Text parsing never guesses at types: every value is a string (or null
//! under strict null handling). Interpreting `"30"` as a number is left to
//! the caller.
//!
//! ### Custom Options
//!
//! ```rust
//! use nested_qs::{parse_with_options, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .with_allow_dots(true)
//!     .with_depth(10);
//! let tree = parse_with_options("a.b.c=d", options).unwrap();
//!
//! let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
//! let b = a.get("b").and_then(|v| v.as_object()).unwrap();
//! assert_eq!(b.get("c").and_then(|v| v.as_str()), Some("d"));
//! ```
//!
//! ### Semi-Parsed Input
//!
//! Web frameworks often hand over form data as an already-split map whose
//! keys still carry bracket notation. [`parse_map`] tokenizes those keys the
//! same way but passes values through untouched, so non-string leaves such
//! as dates or binary blobs survive:
//!
//! ```rust
//! use nested_qs::{parse_map, QsMap, Value};
//!
//! let mut input = QsMap::new();
//! input.insert("user[name]".to_string(), Value::from("Alice"));
//! input.insert("user[age]".to_string(), Value::from(30));
//!
//! let tree = parse_map(input).unwrap();
//! let user = tree.get("user").and_then(|v| v.as_object()).unwrap();
//! assert_eq!(user.get("age").and_then(|v| v.as_i64()), Some(30));
//! ```
//!
//! ### Dynamic Values with the qs! Macro
//!
//! ```rust
//! use nested_qs::{qs, Value};
//!
//! let expected = qs!({
//!     "name": "Alice",
//!     "tags": ["rust", "web"]
//! });
//!
//! if let Value::Object(obj) = expected {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Decoding is tolerant by design: malformed percent-escapes pass through,
//! extra parameters past the limit are truncated, and reserved keys are
//! silently dropped. The one fatal condition is an explicit array index past
//! the configured ceiling:
//!
//! ```rust
//! use nested_qs::parse;
//!
//! assert!(parse("a[20]=x").is_ok());
//! assert!(parse("a[21]=x").is_err());
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All array indexing is bounds-checked
//! - Proper error propagation with `Result` types
//! - Parsing is stateless: each call gets its own options and shares nothing

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod value;

pub use de::percent_decode;
pub use error::{Error, Result};
pub use map::QsMap;
pub use options::{Delimiter, ParseOptions};
pub use value::{Number, Value};

/// Parse a query string into a nested tree with default options.
///
/// # Examples
///
/// ```rust
/// use nested_qs::parse;
///
/// let tree = parse("a[b]=c").unwrap();
/// let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
/// assert_eq!(a.get("b").and_then(|v| v.as_str()), Some("c"));
/// ```
///
/// # Errors
///
/// Returns an error if an explicit array index exceeds the configured
/// ceiling (20 by default).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<QsMap> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a query string into a nested tree with custom options.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_parse_arrays(false);
/// let tree = parse_with_options("a[0]=b", options).unwrap();
/// let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
/// assert_eq!(a.get("0").and_then(|v| v.as_str()), Some("b"));
/// ```
///
/// # Errors
///
/// Returns an error if an explicit array index exceeds `array_limit`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<QsMap> {
    de::decode_str(input, &options)
}

/// Parse a semi-parsed mapping into a nested tree with default options.
///
/// Keys are tokenized exactly like text keys; values pass through as opaque
/// leaves and are never re-tokenized, even when they are mappings whose own
/// keys contain brackets.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_map, QsMap, Value};
///
/// let mut input = QsMap::new();
/// input.insert("a[b]".to_string(), Value::from("c"));
///
/// let tree = parse_map(input).unwrap();
/// let a = tree.get("a").and_then(|v| v.as_object()).unwrap();
/// assert_eq!(a.get("b").and_then(|v| v.as_str()), Some("c"));
/// ```
///
/// # Errors
///
/// Returns an error if an explicit array index exceeds the configured
/// ceiling (20 by default).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_map(input: QsMap) -> Result<QsMap> {
    parse_map_with_options(input, ParseOptions::default())
}

/// Parse a semi-parsed mapping into a nested tree with custom options.
///
/// # Errors
///
/// Returns an error if an explicit array index exceeds `array_limit`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_map_with_options(input: QsMap, options: ParseOptions) -> Result<QsMap> {
    de::decode_map(input, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pair() {
        let tree = parse("a=b").unwrap();
        assert_eq!(tree.get("a"), Some(&Value::from("b")));
    }

    #[test]
    fn test_parse_nested_pair() {
        let tree = parse("a[b][c]=d").unwrap();
        let a = tree.get("a").and_then(Value::as_object).unwrap();
        let b = a.get("b").and_then(Value::as_object).unwrap();
        assert_eq!(b.get("c"), Some(&Value::from("d")));
    }

    #[test]
    fn test_parse_array() {
        let tree = parse("a[]=1&a[]=2").unwrap();
        assert_eq!(
            tree.get("a"),
            Some(&Value::Array(vec![Value::from("1"), Value::from("2")]))
        );
    }

    #[test]
    fn test_parse_map_roundtrips_plain_keys() {
        let mut input = QsMap::new();
        input.insert("plain".to_string(), Value::from(true));
        let tree = parse_map(input).unwrap();
        assert_eq!(tree.get("plain"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_parse_empty_input() {
        let tree = parse("").unwrap();
        assert!(tree.is_empty());
    }
}
