// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The FITS header renderer and HDU classifier: components G and H.

/// DATASUM/CHECKSUM computation.
pub mod checksum;
/// The HDU classifier (component H).
pub mod hdu;
/// The header renderer (component G).
pub mod header;
/// The FITS keyword value type.
pub mod value;

/// FITS blocks (header and data sections alike) are padded to multiples of
/// this many bytes.
pub const BLOCK_SIZE: usize = 2880;

/// The fixed width of a FITS header keyword record.
pub const RECORD_WIDTH: usize = 80;

/// Pads `len` up to the next multiple of [`BLOCK_SIZE`].
pub(crate) fn padded_len(len: usize) -> usize {
    let remainder = len % BLOCK_SIZE;
    if remainder == 0 {
        len
    } else {
        len + (BLOCK_SIZE - remainder)
    }
}
