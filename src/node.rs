// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The document tree model (component A): [`Node`], [`SchemaTag`], and [`Value`].

use crate::ndarray::NDArrayData;
use std::fmt::{self, Display};

/// The well-known prefix that ASDF tag URIs are canonicalized against.
///
/// `tag:stsci.edu:asdf/core/ndarray-1.0.0` is stored, and re-emitted, as
/// `core/ndarray-1.0.0`; any other URI is kept exactly as received.
const STSCI_ASDF_PREFIX: &str = "tag:stsci.edu:asdf/";

/// A schema tag identifying the semantic type of a [`Node`].
///
/// Either absent, a short schema name (`core/ndarray-1.0.0`), or a fully
/// qualified URI that doesn't match the `tag:stsci.edu:asdf/` prefix rule.
/// The absent state is the identity element: two absent tags, or an absent
/// tag merged with nothing, always compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaTag(Option<String>);

impl SchemaTag {
    /// The absent tag.
    pub const fn none() -> Self {
        SchemaTag(None)
    }

    /// Parses a raw tag string (as it would appear on the wire) into its
    /// canonical in-memory form.
    ///
    /// Idempotent: canonicalizing an already-canonical tag is a no-op, which
    /// is what lets `decode(encode(tag)) == tag` hold (spec Invariant 3).
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(STSCI_ASDF_PREFIX) {
            Some(short) => SchemaTag(Some(short.to_owned())),
            None => SchemaTag(Some(raw.to_owned())),
        }
    }

    /// The canonical (storage) form of this tag, or `None` if absent.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Is this tag present at all?
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Does the canonical tag start with `prefix`?
    ///
    /// Per the spec's open question, only the prefix is checked — the
    /// `-1.0.0` version suffix on `core/ndarray-1.0.0` is *not* stripped
    /// before matching, so `core/ndarray-99.9.9` still matches the prefix
    /// `core/ndarray`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.as_deref().is_some_and(|s| s.starts_with(prefix))
    }

    /// Re-expands the canonical form back to the full wire URI, for emission
    /// as a `UriTag`.
    pub fn to_wire_string(&self) -> Option<String> {
        self.0.as_ref().map(|s| {
            if s.starts_with("tag:") || s.contains(':') {
                s.clone()
            } else {
                format!("{STSCI_ASDF_PREFIX}{s}")
            }
        })
    }
}

impl Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(tag) => f.write_str(tag),
            None => f.write_str("(untagged)"),
        }
    }
}

impl From<&str> for SchemaTag {
    fn from(raw: &str) -> Self {
        SchemaTag::parse(raw)
    }
}

/// A typed node in the document tree: a [`SchemaTag`] paired with a [`Value`].
///
/// Created by the decoder, or by application code building a tree to encode;
/// immutable thereafter.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    tag: SchemaTag,
    value: Value,
}

impl Node {
    /// Builds a node with an explicit tag.
    pub fn new(tag: SchemaTag, value: Value) -> Self {
        Node { tag, value }
    }

    /// Builds a node with no tag.
    pub fn untagged(value: Value) -> Self {
        Node {
            tag: SchemaTag::none(),
            value,
        }
    }

    /// This node's schema tag.
    pub fn tag(&self) -> &SchemaTag {
        &self.tag
    }

    /// This node's value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the node, returning its value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The complex-node predicate that drives block-vs-flow style selection:
    /// `Array`, `Object`, and `NDArray` are complex, everything else scalar.
    pub fn is_complex(&self) -> bool {
        self.value.is_complex()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::untagged(value)
    }
}

/// The tagged union of everything a [`Node`] can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The YAML/ASDF null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer. At least 64-bit signed range, per the spec's minimum.
    Integer(i64),
    /// An IEEE-754 double.
    Number(f64),
    /// UTF-8 text. The empty string is distinguished (see the event
    /// producer's scalar-style rule).
    String(String),
    /// An ordered sequence of nodes.
    Array(Vec<Node>),
    /// An ordered sequence of `(key, node)` pairs. Duplicate keys are kept
    /// (not deduplicated) and lookup takes the first match — spec Invariant 4.
    Object(Vec<(String, Node)>),
    /// An N-dimensional array backed by a block-store entry.
    NDArray(NDArrayData),
    /// A JSON-pointer-style reference within the current document.
    InternalRef(String),
    /// A reference into another document.
    ExternalRef(String),
}

impl Value {
    /// `Array`, `Object`, and `NDArray` are complex; everything else scalar.
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Object(_) | Value::NDArray(_)
        )
    }

    /// Returns the nodes of an `Array`, the key/value pairs of an `Object`
    /// also get an `Array`-style iteration, `Object(entries)` iterated in
    /// insertion order.
    pub fn as_object(&self) -> Option<&[(String, Node)]> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// First-match-wins lookup of `key` within an `Object`. Other variants
    /// return `None`.
    pub fn object_get(&self, key: &str) -> Option<&Node> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// The elements of an `Array`, or `None` for any other variant.
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// This value as a string slice, if it is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// This value as a bool, if it is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// This value as an `i64`, if it is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// This value as a `u64`, if it is a non-negative `Integer`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// This value as an `f64`. `Integer` values widen implicitly, matching
    /// how a numeric YAML scalar is compared regardless of which of the two
    /// numeric variants it decoded into.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

/// Generates `impl PartialEq<$ty> for Value` for a family of primitive
/// numeric types, comparing through the named accessor. Mirrors the
/// teacher's `partialeq_numeric!` macro in shape; kept local since nothing
/// outside this module needs it.
macro_rules! partialeq_numeric {
    ($([$($ty:ty)*], $conversion:ident, $base:ty)*) => {
        $($(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    self.$conversion().is_some_and(|i| i == *other as $base)
                }
            }
        )*)*
    }
}

partialeq_numeric! {
    [i8 i16 i32 i64 isize], as_i64, i64
    [u8 u16 u32 u64 usize], as_u64, u64
    [f32 f64], as_f64, f64
}

/// Generates `impl From<$ty> for Value::Integer` for a family of integer
/// types. Unlike the teacher's `from_number!` (which targets a single
/// `Number` variant covering both ints and floats), this crate keeps
/// `Integer` and `Number` distinct, so the macro widens through `i64` rather
/// than `f64`.
macro_rules! from_integer {
    ($($ty:ident)*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

from_integer! { i8 i16 i32 i64 u8 u16 u32 }

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Number(n as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_canonicalization_strips_stsci_prefix() {
        let tag = SchemaTag::parse("tag:stsci.edu:asdf/core/ndarray-1.0.0");
        assert_eq!(tag.as_str(), Some("core/ndarray-1.0.0"));
        assert_eq!(tag.to_wire_string().as_deref(), Some("tag:stsci.edu:asdf/core/ndarray-1.0.0"));
    }

    #[test]
    fn tag_canonicalization_is_idempotent() {
        let once = SchemaTag::parse("tag:stsci.edu:asdf/core/ndarray-1.0.0");
        let twice = SchemaTag::parse(once.as_str().unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn absent_tag_is_identity() {
        assert_eq!(SchemaTag::none(), SchemaTag::default());
        assert!(!SchemaTag::none().is_present());
    }

    #[test]
    fn ndarray_prefix_match_ignores_version_suffix() {
        let tag = SchemaTag::parse("core/ndarray-99.9.9");
        assert!(tag.starts_with("core/ndarray"));
    }

    #[test]
    fn object_lookup_is_first_match_and_keeps_duplicates() {
        let value = Value::Object(vec![
            ("a".to_owned(), Node::untagged(Value::Integer(1))),
            ("a".to_owned(), Node::untagged(Value::Integer(2))),
        ]);
        assert_eq!(value.as_object().unwrap().len(), 2);
        assert_eq!(value.object_get("a").unwrap().value(), &Value::Integer(1));
    }

    #[test]
    fn partial_eq_against_primitives() {
        assert_eq!(Value::Integer(42), 42);
        assert_eq!(Value::Number(1.5), 1.5_f64);
        assert_eq!(Value::Bool(true), true);
        assert_eq!(Value::String("hi".to_owned()), "hi");
    }

    #[test]
    fn complex_predicate() {
        assert!(!Node::untagged(Value::Integer(1)).is_complex());
        assert!(Node::untagged(Value::Array(Vec::new())).is_complex());
        assert!(Node::untagged(Value::Object(Vec::new())).is_complex());
    }
}
