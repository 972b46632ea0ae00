// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! Event producer (component C): walks a [`Node`] tree, emitting YAML events
//! and side-effecting block appends.

use crate::block::BlockStore;
use crate::error::Result;
use crate::ndarray::NDArrayData;
use crate::node::{Node, SchemaTag, Value};
use crate::number::{format_float, format_integer};
use crate::yaml::{CollectionStyle, Event, Scalar, ScalarStyle, Tag};
use log::trace;

/// Walks `node`, producing its pre-order event sequence and appending any
/// `NDArray` bytes encountered to `blocks`.
///
/// Event emission cannot fail intrinsically (§4.3); the `Result` exists only
/// because a future block-store backend may reject an oversized append.
pub fn encode(node: &Node, blocks: &mut BlockStore) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    emit_node(node, blocks, &mut events)?;
    Ok(events)
}

fn tag_event(tag: &SchemaTag) -> Tag {
    match tag.to_wire_string() {
        Some(uri) => Tag::UriTag(uri),
        None => Tag::NoTag,
    }
}

fn emit_node(node: &Node, blocks: &mut BlockStore, events: &mut Vec<Event>) -> Result<()> {
    match node.value() {
        Value::NDArray(data) => emit_ndarray(node.tag(), data, blocks, events),
        Value::Array(items) => emit_array(node.tag(), items, blocks, events),
        Value::Object(entries) => emit_object(node.tag(), entries, blocks, events),
        Value::InternalRef(s) | Value::ExternalRef(s) => emit_reference(node.tag(), s, events),
        scalar => {
            emit_scalar(node.tag(), scalar, events);
            Ok(())
        }
    }
}

/// `$ref` nodes round-trip through the same mapping shape the consumer's
/// reference recognizer expects back (§4.4.2): a one-entry object whose sole
/// key is `$ref`.
fn emit_reference(tag: &SchemaTag, target: &str, events: &mut Vec<Event>) -> Result<()> {
    events.push(Event::MappingStart {
        tag: tag_event(tag),
        style: CollectionStyle::Flow,
        anchor: None,
    });
    events.push(Event::plain_scalar("$ref"));
    events.push(Event::plain_scalar(target.to_owned()));
    events.push(Event::MappingEnd);
    Ok(())
}

fn emit_scalar(tag: &SchemaTag, value: &Value, events: &mut Vec<Event>) {
    let tag_event = tag_event(tag);
    let (text, style) = match value {
        Value::Null => ("~".to_owned(), ScalarStyle::Plain),
        Value::Bool(true) => ("true".to_owned(), ScalarStyle::Plain),
        Value::Bool(false) => ("false".to_owned(), ScalarStyle::Plain),
        Value::Integer(i) => (format_integer(*i), ScalarStyle::Plain),
        Value::Number(f) => (format_float(*f), ScalarStyle::Plain),
        Value::String(s) if s.is_empty() => (String::new(), ScalarStyle::SingleQuoted),
        Value::String(s) => (s.clone(), ScalarStyle::Plain),
        Value::InternalRef(_) | Value::ExternalRef(_) | Value::Array(_) | Value::Object(_) | Value::NDArray(_) => {
            unreachable!("emit_node dispatches these variants before reaching emit_scalar")
        }
    };
    events.push(Event::Scalar(Scalar {
        value: text,
        tag: tag_event,
        style,
        anchor: None,
    }));
}

fn emit_array(tag: &SchemaTag, items: &[Node], blocks: &mut BlockStore, events: &mut Vec<Event>) -> Result<()> {
    let style = if items.iter().any(Node::is_complex) {
        CollectionStyle::Block
    } else {
        CollectionStyle::Flow
    };
    events.push(Event::SequenceStart {
        tag: tag_event(tag),
        style,
        anchor: None,
    });
    for item in items {
        emit_node(item, blocks, events)?;
    }
    events.push(Event::SequenceEnd);
    Ok(())
}

fn emit_object(
    tag: &SchemaTag,
    entries: &[(String, Node)],
    blocks: &mut BlockStore,
    events: &mut Vec<Event>,
) -> Result<()> {
    let style = if entries.iter().any(|(_, node)| node.is_complex()) {
        CollectionStyle::Block
    } else {
        CollectionStyle::Flow
    };
    events.push(Event::MappingStart {
        tag: tag_event(tag),
        style,
        anchor: None,
    });
    for (key, value) in entries {
        events.push(Event::plain_scalar(key.clone()));
        emit_node(value, blocks, events)?;
    }
    events.push(Event::MappingEnd);
    Ok(())
}

/// Emits the fixed-shape flow mapping for an `!core/ndarray` node and
/// appends its bytes to the block store.
///
/// Key order is exactly `source, datatype, shape, byteorder`, per §4.3 — no
/// other keys, regardless of what the surrounding node's tag claims.
fn emit_ndarray(
    tag: &SchemaTag,
    data: &NDArrayData,
    blocks: &mut BlockStore,
    events: &mut Vec<Event>,
) -> Result<()> {
    let index = blocks.append(data.bytes.clone());
    trace!("ndarray: appended block {index}, shape {:?}", data.shape);

    events.push(Event::MappingStart {
        tag: tag_event(tag),
        style: CollectionStyle::Flow,
        anchor: None,
    });

    events.push(Event::plain_scalar("source"));
    events.push(Event::plain_scalar(format_integer(index as i64)));

    events.push(Event::plain_scalar("datatype"));
    emit_datatype(data, events);

    events.push(Event::plain_scalar("shape"));
    events.push(Event::SequenceStart {
        tag: Tag::NoTag,
        style: CollectionStyle::Flow,
        anchor: None,
    });
    for axis in &data.shape {
        events.push(Event::plain_scalar(format_integer(*axis as i64)));
    }
    events.push(Event::SequenceEnd);

    events.push(Event::plain_scalar("byteorder"));
    events.push(Event::plain_scalar(data.byteorder.as_str()));

    events.push(Event::MappingEnd);
    Ok(())
}

fn emit_datatype(data: &NDArrayData, events: &mut Vec<Event>) {
    match data.datatype.scalar_name() {
        Some(name) => events.push(Event::plain_scalar(name)),
        None => {
            let crate::ndarray::DataType::Ucs4(n) = data.datatype else {
                unreachable!("scalar_name() is None only for Ucs4");
            };
            events.push(Event::MappingStart {
                tag: Tag::NoTag,
                style: CollectionStyle::Flow,
                anchor: None,
            });
            events.push(Event::plain_scalar("ucs4"));
            events.push(Event::plain_scalar(format_integer(i64::from(n))));
            events.push(Event::MappingEnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndarray::{ByteOrder, DataType};

    #[test]
    fn s1_ndarray_round_trip_events() {
        let data = NDArrayData {
            bytes: vec![0x01, 0x02, 0x03, 0x04],
            datatype: DataType::Int32,
            byteorder: ByteOrder::Big,
            shape: vec![1],
        };
        let tree = Node::untagged(Value::Object(vec![(
            "x".to_owned(),
            Node::untagged(Value::NDArray(data)),
        )]));
        let mut blocks = BlockStore::new();
        let events = encode(&tree, &mut blocks).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get(0).unwrap(), &[0x01, 0x02, 0x03, 0x04]);

        assert!(matches!(events.first(), Some(Event::MappingStart { .. })));
        assert!(matches!(events.last(), Some(Event::MappingEnd)));
        assert_eq!(events[1], Event::plain_scalar("x"));
    }

    #[test]
    fn s2_empty_string_is_single_quoted() {
        let node = Node::untagged(Value::String(String::new()));
        let mut blocks = BlockStore::new();
        let events = encode(&node, &mut blocks).unwrap();
        match &events[0] {
            Event::Scalar(scalar) => {
                assert_eq!(scalar.style, ScalarStyle::SingleQuoted);
                assert_eq!(scalar.value, "");
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }
}
