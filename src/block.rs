// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The binary block store (component B).
//!
//! An ASDF file's tree refers to binary payloads by position (`source: N`)
//! rather than by value; [`BlockStore`] is that positional table, shared by
//! the event producer (which appends blocks as `!core/ndarray` nodes are
//! encoded) and the event consumer (which resolves `source` indices back to
//! bytes).

use crate::error::{Error, ErrorImpl};
use log::trace;

/// An ordered collection of binary blocks, indexed by append order.
///
/// Blocks are never removed or reordered once appended — the index handed
/// back by [`BlockStore::append`] is stable for the store's lifetime, which
/// is what lets an `!core/ndarray` node's `source` field be a plain `usize`.
#[derive(Clone, Debug, Default)]
pub struct BlockStore {
    blocks: Vec<Vec<u8>>,
}

impl BlockStore {
    /// An empty store.
    pub fn new() -> Self {
        BlockStore::default()
    }

    /// Appends a block, returning the index it can be retrieved by.
    pub fn append(&mut self, bytes: Vec<u8>) -> usize {
        let index = self.blocks.len();
        trace!("block store: appended block {index} ({} bytes)", bytes.len());
        self.blocks.push(bytes);
        index
    }

    /// Retrieves the block at `index`.
    pub fn get(&self, index: usize) -> Result<&[u8], Error> {
        self.blocks
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::from(ErrorImpl::NDArrayMissingBlock(index)))
    }

    /// The number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Is this store empty?
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over the stored blocks in append order, the order component F
    /// writes the block-index trailer in.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.blocks.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_stable_indices() {
        let mut store = BlockStore::new();
        assert_eq!(store.append(vec![1, 2, 3]), 0);
        assert_eq!(store.append(vec![4, 5]), 1);
        assert_eq!(store.get(0).unwrap(), &[1, 2, 3]);
        assert_eq!(store.get(1).unwrap(), &[4, 5]);
    }

    #[test]
    fn missing_block_is_an_error() {
        let store = BlockStore::new();
        assert!(store.get(0).is_err());
    }
}
