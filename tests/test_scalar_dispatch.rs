// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

use anyhow::Result;
use asdf_fits_core::yaml::{Event, ScalarStyle, Tag};
use asdf_fits_core::{BlockStore, Value};

fn events(xs: Vec<Event>) -> Vec<Event> {
    let mut out = vec![Event::StreamStart, Event::DocumentStart, Event::MappingStart {
        tag: Tag::NoTag,
        style: asdf_fits_core::yaml::CollectionStyle::Block,
        anchor: None,
    }];
    out.extend(xs);
    out.push(Event::MappingEnd);
    out.push(Event::DocumentEnd);
    out.push(Event::StreamEnd);
    out
}

#[test]
fn untagged_scalar_disambiguation_invariant_5() -> Result<()> {
    let blocks = BlockStore::new();
    let cases = [
        ("123", Value::Integer(123)),
        ("1.5", Value::Number(1.5)),
        ("true", Value::Bool(true)),
        ("abc", Value::String("abc".to_owned())),
    ];
    for (text, expected) in cases {
        let doc = events(vec![Event::plain_scalar("only"), Event::plain_scalar(text)]);
        let tree = asdf_fits_core::decode_document(doc, &blocks)?;
        assert_eq!(tree[0].1.value(), &expected, "parse_untagged({text:?})");
    }
    Ok(())
}

#[test]
fn s6_untagged_mixed_is_integer_not_string() -> Result<()> {
    let blocks = BlockStore::new();
    let doc = events(vec![Event::plain_scalar("n"), Event::plain_scalar("42")]);
    let tree = asdf_fits_core::decode_document(doc, &blocks)?;
    assert_eq!(tree[0].1.value(), &Value::Integer(42));
    Ok(())
}

#[test]
fn str_tag_always_succeeds_even_on_numeric_bytes() -> Result<()> {
    let blocks = BlockStore::new();
    let doc = events(vec![
        Event::plain_scalar("n"),
        Event::Scalar(asdf_fits_core::yaml::Scalar {
            value: "007".to_owned(),
            tag: Tag::StrTag,
            style: ScalarStyle::Plain,
            anchor: None,
        }),
    ]);
    let tree = asdf_fits_core::decode_document(doc, &blocks)?;
    assert_eq!(tree[0].1.value(), &Value::String("007".to_owned()));
    Ok(())
}

#[test]
fn bool_tag_rejects_non_boolean_bytes() {
    let blocks = BlockStore::new();
    let doc = events(vec![
        Event::plain_scalar("n"),
        Event::Scalar(asdf_fits_core::yaml::Scalar {
            value: "yes".to_owned(),
            tag: Tag::BoolTag,
            style: ScalarStyle::Plain,
            anchor: None,
        }),
    ]);
    assert!(asdf_fits_core::decode_document(doc, &blocks).is_err());
}
