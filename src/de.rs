//! Decoding of query-string text into nested value trees.
//!
//! The pipeline has four stages, each building on the previous:
//!
//! 1. **Pair splitting**: the raw text is split on the delimiter, each part
//!    is split into key and value at the first meaningful `=`, and both
//!    halves are percent-decoded. Repeated keys group their values.
//! 2. **Key tokenization**: a decoded key like `a[b][0][]` is decomposed
//!    into path segments, honoring the depth cutoff, dot notation, and the
//!    reserved-key guard.
//! 3. **Branch building and merging**: each key path becomes a single-path
//!    branch carrying its value at the tip, merged into the accumulated root
//!    with array/object reconciliation.
//! 4. **Compaction**: placeholder holes left by out-of-order numeric indices
//!    are squeezed out of every array.
//!
//! Only [`percent_decode`] is public; the rest is wired up behind the parse
//! entry points in the crate root.

use crate::{Error, ParseOptions, QsMap, Result, Value};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Keys that collide with inherited object properties in loosely-typed
/// consumers of the decoded tree. Unless the options say otherwise, a pair
/// whose path contains one of these is partially or wholly dropped.
const RESERVED_KEYS: [&str; 13] = [
    "__proto__",
    "constructor",
    "prototype",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
];

#[inline]
fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Matches one bracket group with no nested brackets, e.g. `[b]` or `[]`.
fn bracket_group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[[^\[\]]*\]").expect("bracket group pattern is valid"))
}

/// One step in a decomposed key path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// A mapping key, including the empty append segment `[]`.
    Name(String),
    /// An explicit array index. Only canonical decimals qualify: `[07]` and
    /// `[1e2]` are names, not indices.
    Index(u64),
}

/// Decodes percent-escapes and `+` in a query-string component.
///
/// Decoding is byte-wise and tolerant: a `%` not followed by two hex digits
/// passes through verbatim. If the decoded bytes are not valid UTF-8 the
/// input is returned unchanged instead.
///
/// # Examples
///
/// ```rust
/// use nested_qs::percent_decode;
///
/// assert_eq!(percent_decode("a%5Bb%5D"), "a[b]");
/// assert_eq!(percent_decode("c++"), "c  ");
/// assert_eq!(percent_decode("100%"), "100%");
/// ```
#[must_use]
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'+' {
            out.push(b' ');
            i += 1;
        } else if byte == b'%' && i + 2 < bytes.len() {
            match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            }
        } else {
            out.push(byte);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| input.to_string())
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Splits raw query text into decoded key/value entries, in encounter order.
///
/// A part with no `=` yields null under strict null handling, otherwise the
/// empty string. The split point is the first `=` that directly follows a
/// `]`, or failing that the first `=` anywhere, so a literal `=` inside a
/// bracketed key (`a[<=>]==23`) stays in the key. Repeated keys group their
/// values into an array.
fn split_pairs(input: &str, options: &ParseOptions) -> IndexMap<String, Value> {
    let mut entries: IndexMap<String, Value> = IndexMap::new();
    for part in options.delimiter.split(input, options.parameter_limit) {
        if part.is_empty() {
            continue;
        }
        let split_at = match part.find("]=") {
            Some(pos) => Some(pos + 1),
            None => part.find('='),
        };
        let (key, value) = match split_at {
            Some(pos) => (
                percent_decode(&part[..pos]),
                Value::String(percent_decode(&part[pos + 1..])),
            ),
            None => (
                percent_decode(part),
                if options.strict_null_handling {
                    Value::Null
                } else {
                    Value::String(String::new())
                },
            ),
        };
        match entries.get_mut(&key) {
            Some(existing) => {
                let grouped = match std::mem::take(existing) {
                    Value::Array(mut items) => {
                        items.push(value);
                        Value::Array(items)
                    }
                    single => Value::Array(vec![single, value]),
                };
                *existing = grouped;
            }
            None => {
                entries.insert(key, value);
            }
        }
    }
    entries
}

/// Rewrites dot notation into bracket notation, so `a.b[c]` reads as
/// `a[b][c]`. Only dots outside brackets are rewritten, and a dot with no
/// name characters after it stays literal.
fn rewrite_dots(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 2);
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => {
                depth += 1;
                out.push('[');
                i += 1;
            }
            ']' => {
                depth = depth.saturating_sub(1);
                out.push(']');
                i += 1;
            }
            '.' if depth == 0 => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && !matches!(chars[end], '.' | '[' | ']') {
                    end += 1;
                }
                if end > start {
                    out.push('[');
                    out.extend(&chars[start..end]);
                    out.push(']');
                    i = end;
                } else {
                    out.push('.');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Parses a bracket-group body as a canonical decimal index.
fn parse_index(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

fn classify(inner: &str) -> PathSegment {
    match parse_index(inner) {
        Some(index) => PathSegment::Index(index),
        None => PathSegment::Name(inner.to_string()),
    }
}

/// Decomposes a decoded key into path segments.
///
/// The leading run of non-bracket characters is the root name; it is always
/// a mapping key, never an index. Bracket groups follow, up to the depth
/// cutoff; everything past the cutoff collapses into one literal trailing
/// key. Returns `None` when the root name is reserved and the whole pair
/// must be dropped; a reserved inner segment is skipped instead, splicing
/// the path around it.
fn tokenize(key: &str, options: &ParseOptions) -> Option<Vec<PathSegment>> {
    let parent_end = key.find(['[', ']']).unwrap_or(key.len());
    let parent = &key[..parent_end];
    let mut segments = Vec::new();
    if !parent.is_empty() {
        if is_reserved_key(parent) && !options.prototypes_allowed() {
            return None;
        }
        segments.push(PathSegment::Name(parent.to_string()));
    }
    let mut groups = 0;
    let mut overflow = None;
    for group in bracket_group_pattern().find_iter(&key[parent_end..]) {
        if groups >= options.depth {
            overflow = Some(parent_end + group.start());
            break;
        }
        groups += 1;
        let inner = &group.as_str()[1..group.as_str().len() - 1];
        if is_reserved_key(inner) && !options.prototypes_allowed() {
            continue;
        }
        segments.push(classify(inner));
    }
    if let Some(start) = overflow {
        segments.push(PathSegment::Name(key[start..].to_string()));
    }
    Some(segments)
}

/// Builds a single-path branch from segments, leaf outward.
///
/// Working from the innermost segment back to the root, each step wraps the
/// accumulated value in one more container. An append segment wraps in an
/// array (flattening an array leaf rather than nesting it); an index segment
/// wraps in an array padded with holes up to the index, or in a mapping
/// keyed by the index text when arrays are disabled; a name segment wraps in
/// a single-key mapping.
fn build_branch(segments: &[PathSegment], leaf: Value, options: &ParseOptions) -> Result<Value> {
    let mut value = leaf;
    for segment in segments.iter().rev() {
        value = match segment {
            PathSegment::Name(name) if name.is_empty() => {
                if !options.parse_arrays {
                    let mut map = QsMap::with_capacity(1);
                    map.insert("0".to_string(), value);
                    Value::Object(map)
                } else if let Value::Array(items) = value {
                    Value::Array(items)
                } else {
                    Value::Array(vec![value])
                }
            }
            PathSegment::Index(index) => {
                if !options.parse_arrays || options.array_limit < 0 {
                    let mut map = QsMap::with_capacity(1);
                    map.insert(index.to_string(), value);
                    Value::Object(map)
                } else if *index > options.array_limit as u64 {
                    return Err(Error::IndexLimitExceeded {
                        index: *index,
                        limit: options.array_limit,
                    });
                } else {
                    let mut items = Vec::with_capacity(*index as usize + 1);
                    items.resize_with(*index as usize, || Value::Hole);
                    items.push(value);
                    Value::Array(items)
                }
            }
            PathSegment::Name(name) => {
                let mut map = QsMap::with_capacity(1);
                map.insert(name.clone(), value);
                Value::Object(map)
            }
        };
    }
    Ok(value)
}

/// Reconciles a freshly built branch with what an earlier pair already put
/// in the same slot.
///
/// A falsy source never erases data. Container shapes are reconciled by
/// converting the array side to a mapping keyed by index text when the
/// shapes disagree; two arrays merge slot by slot; a scalar arriving where a
/// mapping sits becomes a `true`-valued sentinel key; a scalar arriving
/// where an array sits is appended; anything arriving on top of a scalar
/// lifts the scalar into an array first.
fn merge(target: Value, source: Value, options: &ParseOptions) -> Value {
    if source.is_falsy() {
        return target;
    }
    match (target, source) {
        (Value::Array(items), Value::Object(entries)) => {
            let mut map = array_to_object(items);
            for (key, value) in entries {
                merge_map_entry(&mut map, key, value, options);
            }
            Value::Object(map)
        }
        (Value::Array(mut items), Value::Array(incoming)) => {
            for (index, item) in incoming.into_iter().enumerate() {
                if matches!(item, Value::Hole) {
                    continue;
                }
                merge_array_slot(&mut items, index, item, options);
            }
            Value::Array(items)
        }
        (Value::Object(mut map), Value::Array(incoming)) => {
            for (index, item) in incoming.into_iter().enumerate() {
                if matches!(item, Value::Hole) {
                    continue;
                }
                merge_map_entry(&mut map, index.to_string(), item, options);
            }
            Value::Object(map)
        }
        (Value::Object(mut map), Value::Object(entries)) => {
            for (key, value) in entries {
                merge_map_entry(&mut map, key, value, options);
            }
            Value::Object(map)
        }
        (Value::Array(mut items), leaf) => {
            items.push(leaf);
            Value::Array(items)
        }
        (Value::Object(mut map), leaf) => {
            sentinel_insert(&mut map, leaf, options);
            Value::Object(map)
        }
        (leaf, Value::Array(incoming)) => {
            let mut items = vec![leaf];
            items.extend(incoming);
            Value::Array(items)
        }
        (leaf, source) => Value::Array(vec![leaf, source]),
    }
}

/// Merges `value` into `map` under `key`: a vacant or falsy slot takes the
/// value directly, an occupied one merges recursively.
fn merge_map_entry(map: &mut QsMap, key: String, value: Value, options: &ParseOptions) {
    match map.get_mut(&key) {
        Some(slot) if !slot.is_falsy() => {
            let existing = std::mem::take(slot);
            *slot = merge(existing, value, options);
        }
        Some(slot) => {
            *slot = value;
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Merges `value` into `items[index]`, padding with holes when the array is
/// too short.
fn merge_array_slot(items: &mut Vec<Value>, index: usize, value: Value, options: &ParseOptions) {
    if index >= items.len() {
        items.resize_with(index, || Value::Hole);
        items.push(value);
        return;
    }
    let slot = &mut items[index];
    if slot.is_falsy() {
        *slot = value;
    } else {
        let existing = std::mem::take(slot);
        *slot = merge(existing, value, options);
    }
}

/// Converts an array into a mapping keyed by each element's actual index.
/// Holes are dropped, not renumbered, so `[_, _, "x"]` becomes `{"2": "x"}`.
fn array_to_object(items: Vec<Value>) -> QsMap {
    let mut map = QsMap::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !matches!(item, Value::Hole) {
            map.insert(index.to_string(), item);
        }
    }
    map
}

/// Records a scalar that landed on a mapping as a `true`-valued key, so
/// `a[b]=c&a=d` yields `{a: {b: "c", d: true}}`. The reserved-key guard
/// applies here too.
fn sentinel_insert(map: &mut QsMap, leaf: Value, options: &ParseOptions) {
    let key = match leaf {
        Value::String(text) => text,
        other => other.to_string(),
    };
    if is_reserved_key(&key) && !options.prototypes_allowed() {
        return;
    }
    map.insert(key, Value::Bool(true));
}

/// Merges one branch into the root mapping. An array branch (from a key like
/// `[]` or `[3]`) lands under its index text; a scalar branch (from an empty
/// key with a value, `=x`) becomes a sentinel entry.
fn merge_branch(root: &mut QsMap, branch: Value, options: &ParseOptions) {
    if branch.is_falsy() {
        return;
    }
    match branch {
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                if matches!(item, Value::Hole) {
                    continue;
                }
                merge_map_entry(root, index.to_string(), item, options);
            }
        }
        Value::Object(entries) => {
            for (key, value) in entries {
                merge_map_entry(root, key, value, options);
            }
        }
        leaf => sentinel_insert(root, leaf, options),
    }
}

/// Removes every hole from every array in the tree. Nulls stay.
fn compact(value: &mut Value) {
    match value {
        Value::Array(items) => {
            items.retain(|item| !matches!(item, Value::Hole));
            for item in items {
                compact(item);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                compact(item);
            }
        }
        _ => {}
    }
}

/// Runs stages two through four over already-split entries.
fn assemble(entries: IndexMap<String, Value>, options: &ParseOptions) -> Result<QsMap> {
    let mut root = QsMap::new();
    for (raw_key, leaf) in entries {
        let key = if options.allow_dots {
            rewrite_dots(&raw_key)
        } else {
            raw_key
        };
        let Some(segments) = tokenize(&key, options) else {
            continue;
        };
        let branch = build_branch(&segments, leaf, options)?;
        merge_branch(&mut root, branch, options);
    }
    for (_, value) in root.iter_mut() {
        compact(value);
    }
    Ok(root)
}

/// Decodes raw query-string text.
pub(crate) fn decode_str(input: &str, options: &ParseOptions) -> Result<QsMap> {
    let entries = split_pairs(input, options);
    assemble(entries, options)
}

/// Decodes a semi-parsed mapping: keys are tokenized exactly like text keys,
/// but values pass through as opaque leaves and are never re-tokenized.
pub(crate) fn decode_map(input: QsMap, options: &ParseOptions) -> Result<QsMap> {
    let entries: IndexMap<String, Value> = input.into_iter().collect();
    assemble(entries, options)
}
