// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! N-dimensional array metadata attached to `!core/ndarray` nodes.
//!
//! Marshalling the raw bytes themselves (endian-aware encode/decode of the
//! element type) is an external collaborator per the spec; this module only
//! owns the typed metadata (`datatype`, `byteorder`, `shape`) and the block
//! reference.

use std::fmt::{self, Display};

/// Axis lengths in outermost-first (row-major) order.
pub type RowMajorAxes = Vec<u64>;

/// The fixed, closed set of element types an `!core/ndarray` block may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// 8-bit signed integer.
    Int8,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit signed integer.
    Int16,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit unsigned integer.
    Uint64,
    /// IEEE-754 single precision float.
    Float32,
    /// IEEE-754 double precision float.
    Float64,
    /// A fixed-width UTF-32 string of `n` code units.
    Ucs4(u32),
}

impl DataType {
    /// The byte width of a single element.
    pub fn width(&self) -> u64 {
        match self {
            DataType::Int8 | DataType::Uint8 => 1,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::Uint64 | DataType::Float64 => 8,
            DataType::Ucs4(n) => u64::from(*n) * 4,
        }
    }

    /// The plain-scalar spelling used for every variant except `Ucs4`, which
    /// is instead emitted as a one-entry mapping (`{ucs4: n}`) since its
    /// width is parametric.
    pub fn scalar_name(&self) -> Option<&'static str> {
        match self {
            DataType::Int8 => Some("int8"),
            DataType::Uint8 => Some("uint8"),
            DataType::Int16 => Some("int16"),
            DataType::Uint16 => Some("uint16"),
            DataType::Int32 => Some("int32"),
            DataType::Uint32 => Some("uint32"),
            DataType::Int64 => Some("int64"),
            DataType::Uint64 => Some("uint64"),
            DataType::Float32 => Some("float32"),
            DataType::Float64 => Some("float64"),
            DataType::Ucs4(_) => None,
        }
    }

    /// Parses one of the fixed-width scalar spellings. `Ucs4` is not
    /// reachable through this path; see `Ucs4` parsing in `asdf::consumer`.
    pub fn parse_scalar(name: &str) -> Option<DataType> {
        Some(match name {
            "int8" => DataType::Int8,
            "uint8" => DataType::Uint8,
            "int16" => DataType::Int16,
            "uint16" => DataType::Uint16,
            "int32" => DataType::Int32,
            "uint32" => DataType::Uint32,
            "int64" => DataType::Int64,
            "uint64" => DataType::Uint64,
            "float32" => DataType::Float32,
            "float64" => DataType::Float64,
            _ => return None,
        })
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scalar_name() {
            Some(name) => f.write_str(name),
            None => {
                if let DataType::Ucs4(n) = self {
                    write!(f, "ucs4({n})")
                } else {
                    unreachable!()
                }
            }
        }
    }
}

/// Element byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian.
    Little,
    /// Big-endian.
    Big,
}

impl ByteOrder {
    /// The wire spelling (`"little"` / `"big"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
        }
    }

    /// Parses `"little"`/`"big"`.
    pub fn parse(s: &str) -> Option<ByteOrder> {
        match s {
            "little" => Some(ByteOrder::Little),
            "big" => Some(ByteOrder::Big),
            _ => None,
        }
    }
}

/// The typed metadata of an `!core/ndarray` node.
///
/// `bytes` is owned by the block store the node was decoded from (or will be
/// encoded into); this struct holds a copy so a `Node` remains self-contained
/// after the block store that produced it goes out of scope.
#[derive(Clone, Debug, PartialEq)]
pub struct NDArrayData {
    /// The raw element bytes, in `byteorder` order.
    pub bytes: Vec<u8>,
    /// The element type.
    pub datatype: DataType,
    /// The element byte order.
    pub byteorder: ByteOrder,
    /// Axis lengths, outermost first.
    pub shape: RowMajorAxes,
}

impl NDArrayData {
    /// The number of elements implied by `shape` (the product of its axes,
    /// or 1 for a 0-dimensional/scalar array).
    pub fn element_count(&self) -> u64 {
        self.shape.iter().product()
    }

    /// Spec Invariant 2: `shape` entries are non-negative and their product
    /// times the element width equals `bytes.len()`.
    pub fn is_consistent(&self) -> bool {
        match self.element_count().checked_mul(self.datatype.width()) {
            Some(expected) => expected == self.bytes.len() as u64,
            None => false,
        }
    }
}
