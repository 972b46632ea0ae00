// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! Scalar tag dispatcher (component E): `(bytes, tag)` → typed [`Value`].

use crate::error::{Error, ErrorImpl, Result};
use crate::node::{Node, SchemaTag, Value};
use crate::number::looks_like_integer;
use crate::yaml::{Scalar, Tag};
use log::warn;

/// Dispatches a scalar event to a typed [`Node`] per §4.5's per-tag rules.
pub fn dispatch(scalar: &Scalar) -> Result<Node> {
    let bytes = scalar.value.as_str();
    match &scalar.tag {
        Tag::StrTag => Ok(Node::untagged(Value::String(bytes.to_owned()))),
        Tag::IntTag => parse_integer(bytes)
            .map(Value::Integer)
            .map(Node::untagged)
            .ok_or_else(|| invalid_scalar("Int", bytes)),
        Tag::FloatTag => parse_float(bytes)
            .map(Value::Number)
            .map(Node::untagged)
            .ok_or_else(|| invalid_scalar("Float", bytes)),
        Tag::BoolTag => parse_bool(bytes)
            .map(Value::Bool)
            .map(Node::untagged)
            .ok_or_else(|| invalid_scalar("Bool", bytes)),
        Tag::NullTag => Ok(Node::untagged(Value::Null)),
        Tag::UriTag(raw) => {
            let tag = SchemaTag::parse(raw);
            Ok(Node::new(tag, parse_untagged(bytes)))
        }
        Tag::NoTag => Ok(Node::untagged(parse_untagged(bytes))),
    }
}

fn invalid_scalar(expected_type: &'static str, value: &str) -> Error {
    Error::from(ErrorImpl::InvalidScalar {
        expected_type,
        value: value.to_owned(),
    })
}

fn parse_integer(bytes: &str) -> Option<i64> {
    if looks_like_integer(bytes) {
        bytes.parse().ok()
    } else {
        None
    }
}

fn parse_float(bytes: &str) -> Option<f64> {
    bytes.parse().ok()
}

fn parse_bool(bytes: &str) -> Option<bool> {
    match bytes {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// The untagged-scalar disambiguator: first alternative that succeeds wins.
///
/// Order matters — `"1"` must parse as `Integer(1)`, never fall through to
/// `String("1")` (spec Invariant 5 / Scenario S6).
pub fn parse_untagged(bytes: &str) -> Value {
    if let Some(i) = parse_integer(bytes) {
        return Value::Integer(i);
    }
    if let Some(f) = parse_float(bytes) {
        return Value::Number(f);
    }
    if let Some(b) = parse_bool(bytes) {
        return Value::Bool(b);
    }
    warn!("untagged scalar {bytes:?} did not match int/float/bool, falling back to string");
    Value::String(bytes.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_disambiguation_order() {
        assert_eq!(parse_untagged("123"), Value::Integer(123));
        assert_eq!(parse_untagged("1.5"), Value::Number(1.5));
        assert_eq!(parse_untagged("true"), Value::Bool(true));
        assert_eq!(parse_untagged("abc"), Value::String("abc".to_owned()));
    }

    #[test]
    fn int_tag_rejects_non_integer() {
        let scalar = Scalar {
            value: "abc".to_owned(),
            tag: Tag::IntTag,
            style: crate::yaml::ScalarStyle::Plain,
            anchor: None,
        };
        assert!(dispatch(&scalar).is_err());
    }

    #[test]
    fn null_tag_ignores_bytes() {
        let scalar = Scalar {
            value: "whatever".to_owned(),
            tag: Tag::NullTag,
            style: crate::yaml::ScalarStyle::Plain,
            anchor: None,
        };
        assert_eq!(dispatch(&scalar).unwrap().value(), &Value::Null);
    }
}
