// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! Event consumer (component D): reconstructs a [`Node`] tree from a
//! peekable YAML event stream, recognizing `!core/ndarray` and `$ref`.

use crate::asdf::scalar;
use crate::asdf::Recognition;
use crate::block::BlockStore;
use crate::error::{Error, ErrorImpl, Result};
use crate::ndarray::{ByteOrder, DataType, NDArrayData};
use crate::node::{Node, SchemaTag, Value};
use crate::path::Path;
use crate::yaml::{CollectionStyle, Event, Tag};
use log::debug;
use std::iter::Peekable;

const NDARRAY_TAG_PREFIX: &str = "core/ndarray";

/// The top-level entry point: expects `StreamStart, DocumentStart`, parses
/// one `Object`-shaped node, and returns its entries.
///
/// Maximum recursion depth while descending is bounded by
/// [`crate::MAX_RECURSION_DEPTH`]; exceeding it fails with
/// [`ErrorImpl::RecursionLimitExceeded`].
pub fn sink_tree<I>(events: &mut Peekable<I>, blocks: &BlockStore) -> Result<Vec<(String, Node)>>
where
    I: Iterator<Item = Event>,
{
    expect(events, |e| matches!(e, Event::StreamStart), "StreamStart")?;
    expect(events, |e| matches!(e, Event::DocumentStart), "DocumentStart")?;

    let node = parse_node(events, blocks, &Path::Root, 0)?;
    match node.into_value() {
        Value::Object(entries) => Ok(entries),
        other => Err(Error::from(ErrorImpl::InvalidTree {
            reason: "document root is not a mapping",
            value: format!("{other:?}"),
        })),
    }
}

fn expect<I>(events: &mut Peekable<I>, predicate: impl FnOnce(&Event) -> bool, expected: &'static str) -> Result<Event>
where
    I: Iterator<Item = Event>,
{
    match events.next() {
        Some(event) if predicate(&event) => Ok(event),
        Some(other) => Err(Error::from(ErrorImpl::ExpectedEvent {
            expected,
            actual: format!("{other:?}"),
        })),
        None => Err(Error::from(ErrorImpl::NoInput)),
    }
}

/// The `sinkWhile` primitive (§4.4.1): collect elements while `p` holds on
/// the next peeked event, then consume (drop) the terminator exactly once.
fn sink_while<I, T>(
    events: &mut Peekable<I>,
    p: impl Fn(&Event) -> bool,
    mut parse: impl FnMut(&mut Peekable<I>) -> Result<T>,
) -> Result<Vec<T>>
where
    I: Iterator<Item = Event>,
{
    let mut out = Vec::new();
    loop {
        match events.peek() {
            Some(event) if p(event) => out.push(parse(events)?),
            Some(_) => {
                events.next();
                break;
            }
            None => return Err(Error::from(ErrorImpl::NoInput)),
        }
    }
    Ok(out)
}

fn is_end(event: &Event) -> bool {
    matches!(event, Event::MappingEnd | Event::SequenceEnd)
}

fn parse_node<I>(events: &mut Peekable<I>, blocks: &BlockStore, path: &Path<'_>, depth: usize) -> Result<Node>
where
    I: Iterator<Item = Event>,
{
    if depth > crate::MAX_RECURSION_DEPTH {
        return Err(Error::from(ErrorImpl::RecursionLimitExceeded));
    }
    match events.next() {
        Some(Event::Scalar(s)) => scalar::dispatch(&s).map_err(|e| e.with_path(path)),
        Some(Event::MappingStart { tag, .. }) => parse_mapping(events, blocks, tag, path, depth),
        Some(Event::SequenceStart { tag, .. }) => parse_sequence(events, blocks, tag, path, depth),
        Some(other) => Err(Error::from(ErrorImpl::ExpectedEvent {
            expected: "Scalar, MappingStart, or SequenceStart",
            actual: format!("{other:?}"),
        })),
        None => Err(Error::from(ErrorImpl::NoInput)),
    }
}

fn parse_sequence<I>(
    events: &mut Peekable<I>,
    blocks: &BlockStore,
    tag: Tag,
    path: &Path<'_>,
    depth: usize,
) -> Result<Node>
where
    I: Iterator<Item = Event>,
{
    let mut index = 0;
    let items = sink_while(events, |e| !is_end(e), |events| {
        let child_path = Path::Seq { parent: path, index };
        let node = parse_node(events, blocks, &child_path, depth + 1);
        index += 1;
        node
    })?;
    Ok(Node::new(tag_to_schema(&tag), Value::Array(items)))
}

fn parse_mapping<I>(
    events: &mut Peekable<I>,
    blocks: &BlockStore,
    tag: Tag,
    path: &Path<'_>,
    depth: usize,
) -> Result<Node>
where
    I: Iterator<Item = Event>,
{
    let schema_tag = tag_to_schema(&tag);
    let mut entries = Vec::new();
    sink_while(
        events,
        |e| !is_end(e),
        |events| {
            let key = match events.next() {
                Some(Event::Scalar(s)) => s.value,
                Some(other) => {
                    return Err(Error::from(ErrorImpl::ExpectedEvent {
                        expected: "mapping key scalar",
                        actual: format!("{other:?}"),
                    }))
                }
                None => return Err(Error::from(ErrorImpl::NoInput)),
            };
            let child_path = Path::Map { parent: path, key: &key };
            let value = parse_node(events, blocks, &child_path, depth + 1)?;
            entries.push((key, value));
            Ok(())
        },
    )?;

    resolve_mapping(&schema_tag, entries, blocks, path)
}

/// §4.4.2 — ordered alternatives: NDArray, then Reference, then generic
/// Object fallback.
fn resolve_mapping(
    tag: &SchemaTag,
    entries: Vec<(String, Node)>,
    blocks: &BlockStore,
    path: &Path<'_>,
) -> Result<Node> {
    match recognize_ndarray(tag, &entries, blocks) {
        Recognition::Matched(data) => return Ok(Node::new(tag.clone(), Value::NDArray(data))),
        Recognition::HardError(e) => return Err(e.with_path(path)),
        Recognition::NotApplicable => {}
    }

    match recognize_reference(&entries) {
        Recognition::Matched(value) => return Ok(Node::new(tag.clone(), value)),
        Recognition::HardError(e) => return Err(e.with_path(path)),
        Recognition::NotApplicable => {}
    }

    Ok(Node::new(tag.clone(), Value::Object(entries)))
}

fn recognize_ndarray(tag: &SchemaTag, entries: &[(String, Node)], blocks: &BlockStore) -> Recognition<NDArrayData> {
    if !tag.starts_with(NDARRAY_TAG_PREFIX) {
        return Recognition::NotApplicable;
    }
    debug!("ndarray tag recognized ({tag}), decoding NDArrayData");
    match extract_ndarray(entries, blocks) {
        Ok(data) => Recognition::Matched(data),
        Err(e) => Recognition::HardError(e),
    }
}

fn find<'a>(entries: &'a [(String, Node)], key: &str) -> Option<&'a Node> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// §4.4.3 — required keys `source`, `datatype`, `byteorder`, `shape`.
fn extract_ndarray(entries: &[(String, Node)], blocks: &BlockStore) -> Result<NDArrayData> {
    let source = find(entries, "source").ok_or(ErrorImpl::NDArrayMissingKey("source"))?;
    let index = source
        .value()
        .as_u64()
        .ok_or_else(|| ErrorImpl::NDArrayExpected {
            field: "source",
            value: format!("{:?}", source.value()),
        })? as usize;
    let bytes = blocks.get(index)?.to_vec();

    let datatype_node = find(entries, "datatype").ok_or(ErrorImpl::NDArrayMissingKey("datatype"))?;
    let datatype = parse_datatype(datatype_node.value())?;

    let byteorder_node = find(entries, "byteorder").ok_or(ErrorImpl::NDArrayMissingKey("byteorder"))?;
    let byteorder = byteorder_node
        .value()
        .as_str()
        .and_then(ByteOrder::parse)
        .ok_or_else(|| ErrorImpl::NDArrayExpected {
            field: "byteorder",
            value: format!("{:?}", byteorder_node.value()),
        })?;

    let shape_node = find(entries, "shape").ok_or(ErrorImpl::NDArrayMissingKey("shape"))?;
    let shape = shape_node
        .value()
        .as_array()
        .and_then(|items| items.iter().map(|n| n.value().as_u64()).collect::<Option<Vec<_>>>())
        .ok_or_else(|| ErrorImpl::NDArrayExpected {
            field: "shape",
            value: format!("{:?}", shape_node.value()),
        })?;

    Ok(NDArrayData {
        bytes,
        datatype,
        byteorder,
        shape,
    })
}

fn parse_datatype(value: &Value) -> Result<DataType> {
    if let Some(name) = value.as_str() {
        if let Some(dt) = DataType::parse_scalar(name) {
            return Ok(dt);
        }
    }
    if let Some(entries) = value.as_object() {
        if let Some((_, n)) = entries.iter().find(|(k, _)| k == "ucs4") {
            if let Some(n) = n.value().as_u64() {
                return Ok(DataType::Ucs4(n as u32));
            }
        }
    }
    Err(Error::from(ErrorImpl::NDArrayExpected {
        field: "datatype",
        value: format!("{value:?}"),
    }))
}

/// §4.4.2 rule 2 — a `$ref` key whose value is a string is either an
/// internal (pure-fragment) or external reference; a non-string value is a
/// hard error, not a fallthrough.
fn recognize_reference(entries: &[(String, Node)]) -> Recognition<Value> {
    let Some(node) = find(entries, "$ref") else {
        return Recognition::NotApplicable;
    };
    match node.value().as_str() {
        Some(s) if is_internal_pointer(s) => Recognition::Matched(Value::InternalRef(s.to_owned())),
        Some(s) => Recognition::Matched(Value::ExternalRef(s.to_owned())),
        None => Recognition::HardError(Error::from(ErrorImpl::InvalidReference(format!(
            "{:?}",
            node.value()
        )))),
    }
}

/// A pure fragment reference (`#/foo/bar`) stays within the current document.
fn is_internal_pointer(s: &str) -> bool {
    s.starts_with('#')
}

fn tag_to_schema(tag: &Tag) -> SchemaTag {
    match tag {
        Tag::UriTag(raw) => SchemaTag::parse(raw),
        _ => SchemaTag::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_event(value: &str) -> Event {
        Event::plain_scalar(value)
    }

    fn reference_mapping(target: &str) -> Vec<Event> {
        vec![
            Event::MappingStart {
                tag: Tag::NoTag,
                style: CollectionStyle::Flow,
                anchor: None,
            },
            scalar_event("$ref"),
            scalar_event(target),
            Event::MappingEnd,
        ]
    }

    #[test]
    fn s3_internal_reference() {
        let blocks = BlockStore::new();
        let mut it = reference_mapping("#/foo/bar").into_iter().peekable();
        let node = parse_node(&mut it, &blocks, &Path::Root, 0).unwrap();
        assert_eq!(node.value(), &Value::InternalRef("#/foo/bar".to_owned()));
    }

    #[test]
    fn s3_external_reference() {
        let blocks = BlockStore::new();
        let mut it = reference_mapping("other.asdf#/x").into_iter().peekable();
        let node = parse_node(&mut it, &blocks, &Path::Root, 0).unwrap();
        assert_eq!(node.value(), &Value::ExternalRef("other.asdf#/x".to_owned()));
    }

    #[test]
    fn s6_untagged_scalar_is_integer() {
        let blocks = BlockStore::new();
        let mut it = vec![scalar_event("42")].into_iter().peekable();
        let node = parse_node(&mut it, &blocks, &Path::Root, 0).unwrap();
        assert_eq!(node.value(), &Value::Integer(42));
    }
}
