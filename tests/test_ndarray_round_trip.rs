// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

use anyhow::Result;
use asdf_fits_core::yaml::{CollectionStyle, Event, Tag};
use asdf_fits_core::{ByteOrder, DataType, Node, NDArrayData, SchemaTag, Value};

#[test]
fn s1_ndarray_round_trip_event_shape() -> Result<()> {
    let data = NDArrayData {
        bytes: vec![0x01, 0x02, 0x03, 0x04],
        datatype: DataType::Int32,
        byteorder: ByteOrder::Big,
        shape: vec![1],
    };
    let tree = vec![("x".to_owned(), Node::untagged(Value::NDArray(data.clone())))];

    let mut blocks = asdf_fits_core::BlockStore::new();
    let events = asdf_fits_core::encode_document(&tree, &mut blocks)?;

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks.get(0)?, &[0x01, 0x02, 0x03, 0x04]);

    let scalar_values: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            Event::Scalar(s) => Some(s.value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        scalar_values,
        vec!["x", "source", "0", "datatype", "int32", "shape", "1", "byteorder", "big"]
    );

    let mapping_starts: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::MappingStart { .. }))
        .collect();
    assert_eq!(mapping_starts.len(), 2);

    let decoded = asdf_fits_core::decode_document(events, &blocks)?;
    assert_eq!(decoded[0].1.value(), &Value::NDArray(data));
    Ok(())
}

#[test]
fn ndarray_tag_recognition_ignores_version_suffix() -> Result<()> {
    let data = NDArrayData {
        bytes: vec![0xAA, 0xBB],
        datatype: DataType::Uint8,
        byteorder: ByteOrder::Little,
        shape: vec![2],
    };
    let node = Node::new(SchemaTag::parse("core/ndarray-99.9.9"), Value::NDArray(data.clone()));
    let mut blocks = asdf_fits_core::BlockStore::new();
    let events = asdf_fits_core::encode_document(&[("y".to_owned(), node)], &mut blocks)?;
    let decoded = asdf_fits_core::decode_document(events, &blocks)?;
    assert_eq!(decoded[0].1.value(), &Value::NDArray(data));
    Ok(())
}

#[test]
fn missing_block_fails_on_decode() {
    let blocks = asdf_fits_core::BlockStore::new();
    let doc = vec![
        Event::StreamStart,
        Event::DocumentStart,
        Event::MappingStart {
            tag: Tag::NoTag,
            style: CollectionStyle::Block,
            anchor: None,
        },
        Event::plain_scalar("x"),
        Event::MappingStart {
            tag: Tag::UriTag("tag:stsci.edu:asdf/core/ndarray-1.0.0".to_owned()),
            style: CollectionStyle::Flow,
            anchor: None,
        },
        Event::plain_scalar("source"),
        Event::plain_scalar("0"),
        Event::plain_scalar("datatype"),
        Event::plain_scalar("int8"),
        Event::plain_scalar("shape"),
        Event::SequenceStart {
            tag: Tag::NoTag,
            style: CollectionStyle::Flow,
            anchor: None,
        },
        Event::plain_scalar("1"),
        Event::SequenceEnd,
        Event::plain_scalar("byteorder"),
        Event::plain_scalar("little"),
        Event::MappingEnd,
        Event::MappingEnd,
        Event::DocumentEnd,
        Event::StreamEnd,
    ];
    assert!(asdf_fits_core::decode_document(doc, &blocks).is_err());
}
