// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! # asdf-fits-core
//!
//! Core codecs for the two container formats astronomy pipelines pass
//! around most: [ASDF][asdf] (a YAML document tree plus a list of binary
//! blocks) and [FITS][fits] (block-aligned ASCII headers plus binary data
//! units).
//!
//! This crate owns the two hard, bit-exact translation layers and leaves
//! everything either side of them — the actual YAML tokenizer/emitter, the
//! FITS header tokenizer, file I/O, and N-dimensional array byte marshalling
//! — to external collaborators. See the module docs on [`yaml`] and
//! [`fits::hdu`] for the exact interfaces those collaborators are expected
//! to satisfy.
//!
//! ## Layout
//!
//! - [`node`] — the document tree model ([`Node`], [`SchemaTag`], [`Value`]).
//! - [`ndarray`] — typed `!core/ndarray` metadata.
//! - [`block`] — the binary block store shared by the ASDF encode/decode path.
//! - [`yaml`] — the YAML event vocabulary exchanged with the external parser/emitter.
//! - [`asdf`] — the streaming ASDF codec: event producer, event consumer, scalar
//!   dispatcher, block-index sink.
//! - [`fits`] — the FITS header renderer and HDU classifier.
//!
//! ## Logging
//!
//! Calls into [`log`] at `trace`/`debug`/`warn` levels at points callers
//! debugging a malformed document are likely to care about (block appends,
//! tag-recognition fallthrough, the CHECKSUM two-pass patch, untagged-scalar
//! fallback to string). This crate never initializes a logger itself —
//! wire up `env_logger` (or any other `log`-compatible backend) in the
//! application embedding it.
//!
//! [asdf]: https://asdf-standard.readthedocs.io/
//! [fits]: https://fits.gsfc.nasa.gov/fits_standard.html

#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/asdf-fits-core")]

/// The streaming ASDF codec: components C through F.
pub mod asdf;
/// The binary block store (component B).
pub mod block;
/// The error taxonomy shared by both codecs.
pub mod error;
/// The FITS header renderer and HDU classifier: components G and H.
pub mod fits;
/// Typed `!core/ndarray` metadata.
pub mod ndarray;
mod node;
mod number;
mod path;
/// The YAML event vocabulary exchanged with the external parser/emitter.
pub mod yaml;

pub use crate::block::BlockStore;
pub use crate::error::{Error, Result};
pub use crate::ndarray::{ByteOrder, DataType, NDArrayData};
pub use crate::node::{Node, SchemaTag, Value};

use crate::yaml::Event;
use std::iter::Peekable;

/// The recursion-depth ceiling enforced by both the event producer's tree
/// walk and the event consumer's tree descent.
///
/// There is no outer configuration surface for this (no CLI, no config
/// file — see the crate's non-goals); it exists purely to turn a
/// pathologically deep or cyclic input into a clean
/// [`error::ErrorImpl::RecursionLimitExceeded`] instead of a stack overflow.
pub const MAX_RECURSION_DEPTH: usize = 256;

/// Encodes a document tree (the entries of its root mapping) into the full
/// framed ASDF event sequence — `StreamStart`/`DocumentStart` through
/// `DocumentEnd`/`StreamEnd` — appending every `!core/ndarray` node's bytes
/// to `blocks` as it is encountered.
///
/// Block store append order equals the document pre-order sequence of
/// `NDArray` nodes (spec Invariant 6); `blocks` should be freshly empty for
/// a self-contained single-document encode, but this function does not
/// require that — it only ever appends.
pub fn encode_document(tree: &[(String, Node)], blocks: &mut BlockStore) -> Result<Vec<Event>> {
    let root = Node::untagged(Value::Object(tree.to_vec()));
    let mut events = vec![Event::StreamStart, Event::DocumentStart];
    events.extend(asdf::producer::encode(&root, blocks)?);
    events.push(Event::DocumentEnd);
    events.push(Event::StreamEnd);
    Ok(events)
}

/// Decodes a full framed ASDF event sequence back into the entries of its
/// root mapping, resolving `!core/ndarray`/`$ref` nodes against `blocks`.
///
/// `blocks` must already hold every block the document's `source` indices
/// refer to — this crate does not read the binary block section itself,
/// that framing is an external collaborator's job (§6).
pub fn decode_document<I>(events: I, blocks: &BlockStore) -> Result<Vec<(String, Node)>>
where
    I: IntoIterator<Item = Event>,
{
    let mut peekable: Peekable<_> = events.into_iter().peekable();
    let tree = asdf::consumer::sink_tree(&mut peekable, blocks)?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndarray::{ByteOrder, DataType};

    #[test]
    fn s1_ndarray_round_trip_through_full_document_framing() {
        let data = NDArrayData {
            bytes: vec![0x01, 0x02, 0x03, 0x04],
            datatype: DataType::Int32,
            byteorder: ByteOrder::Big,
            shape: vec![1],
        };
        let tree = vec![("x".to_owned(), Node::untagged(Value::NDArray(data.clone())))];

        let mut blocks = BlockStore::new();
        let events = encode_document(&tree, &mut blocks).unwrap();

        let decoded = decode_document(events, &blocks).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "x");
        match decoded[0].1.value() {
            Value::NDArray(got) => assert_eq!(got, &data),
            other => panic!("expected NDArray, got {other:?}"),
        }
    }

    #[test]
    fn invariant_1_decode_encode_round_trip_scalars() {
        let tree = vec![
            ("a".to_owned(), Node::untagged(Value::Integer(1))),
            ("b".to_owned(), Node::untagged(Value::String("hi".to_owned()))),
            ("c".to_owned(), Node::untagged(Value::Bool(false))),
        ];
        let mut blocks = BlockStore::new();
        let events = encode_document(&tree, &mut blocks).unwrap();
        let decoded = decode_document(events, &blocks).unwrap();
        assert_eq!(decoded, tree);
    }
}
