// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! FITS HDU classifier (component H).
//!
//! The low-level FITS parser is an external collaborator (§6): it hands us
//! a flat sequence of already-tokenized [`HeaderDataUnit`] records. This
//! module classifies that sequence — first must be Primary — and reshapes
//! each into a [`DataArray`] with axes reinterpreted column-major.

use crate::error::{Error, ErrorImpl, Result};

/// The BITPIX values a FITS data unit may declare, as produced by the
/// external parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceBitpix {
    /// 8-bit integer samples.
    EightBitInt,
    /// 16-bit integer samples.
    SixteenBitInt,
    /// 32-bit integer samples.
    ThirtyTwoBitInt,
    /// 64-bit integer samples.
    SixtyFourBitInt,
    /// 32-bit float samples.
    ThirtyTwoBitFloat,
    /// 64-bit float samples.
    SixtyFourBitFloat,
}

/// This crate's own BITPIX enum, mapped 1:1 from [`SourceBitpix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bitpix {
    /// BITPIX = 8.
    BPInt8,
    /// BITPIX = 16.
    BPInt16,
    /// BITPIX = 32.
    BPInt32,
    /// BITPIX = 64.
    BPInt64,
    /// BITPIX = -32.
    BPFloat,
    /// BITPIX = -64.
    BPDouble,
}

impl Bitpix {
    /// The numeric BITPIX value written to a keyword record.
    pub fn code(&self) -> i64 {
        match self {
            Bitpix::BPInt8 => 8,
            Bitpix::BPInt16 => 16,
            Bitpix::BPInt32 => 32,
            Bitpix::BPInt64 => 64,
            Bitpix::BPFloat => -32,
            Bitpix::BPDouble => -64,
        }
    }

    /// The byte width of one sample.
    pub fn sample_width(&self) -> usize {
        match self {
            Bitpix::BPInt8 => 1,
            Bitpix::BPInt16 => 2,
            Bitpix::BPInt32 | Bitpix::BPFloat => 4,
            Bitpix::BPInt64 | Bitpix::BPDouble => 8,
        }
    }
}

impl From<SourceBitpix> for Bitpix {
    fn from(value: SourceBitpix) -> Self {
        match value {
            SourceBitpix::EightBitInt => Bitpix::BPInt8,
            SourceBitpix::SixteenBitInt => Bitpix::BPInt16,
            SourceBitpix::ThirtyTwoBitInt => Bitpix::BPInt32,
            SourceBitpix::SixtyFourBitInt => Bitpix::BPInt64,
            SourceBitpix::ThirtyTwoBitFloat => Bitpix::BPFloat,
            SourceBitpix::SixtyFourBitFloat => Bitpix::BPDouble,
        }
    }
}

/// The dimensions section of an external parser's [`HeaderDataUnit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Dimensions {
    /// The unit's declared sample type.
    pub bitpix: SourceBitpix,
    /// Axis lengths as the external parser read them (row-major, the order
    /// FITS keywords are written in: `NAXIS1` varies fastest).
    pub axes: Vec<u64>,
}

/// What kind of extension an HDU beyond the first is.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionKind {
    /// An `IMAGE` extension.
    Image,
    /// A `BINTABLE` extension, with its heap parameters.
    BinTable {
        /// The `PCOUNT` heap-area byte count.
        pcount: u64,
        /// The raw heap bytes following the table data.
        heap: Vec<u8>,
    },
}

/// One header-data unit as produced by the external FITS parser, before
/// classification.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderDataUnit {
    /// The raw header keyword records, already tokenized.
    pub header: Vec<(String, String)>,
    /// The declared shape and sample type.
    pub dimensions: Dimensions,
    /// The unit's raw data bytes.
    pub main_data: Vec<u8>,
    /// `None` for the first (Primary) unit; `Some` for every other.
    pub extension: Option<ExtensionKind>,
}

/// A classified HDU's reshaped payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    /// The sample type.
    pub bitpix: Bitpix,
    /// Axis lengths, reinterpreted column-major (outermost-last, the
    /// reverse of the order `NAXISn` keywords declare them in).
    pub axes: Vec<u64>,
    /// The unit's raw data bytes, unchanged.
    pub raw_data: Vec<u8>,
}

/// A classified HDU.
#[derive(Clone, Debug, PartialEq)]
pub enum Hdu {
    /// The mandatory first HDU.
    Primary(DataArray),
    /// An `IMAGE` extension.
    Image(DataArray),
    /// A `BINTABLE` extension.
    BinTable {
        /// The reshaped sample data.
        data: DataArray,
        /// The `PCOUNT` heap-area byte count.
        pcount: u64,
        /// The raw heap bytes.
        heap: Vec<u8>,
    },
}

/// Classifies a sequence of parser-level HDUs (§4.8).
///
/// The first unit must be `Primary` (`extension.is_none()`); any other kind
/// in position 0 is an error, and an empty sequence is `MissingPrimary`.
pub fn classify(units: Vec<HeaderDataUnit>) -> Result<Vec<Hdu>> {
    let mut units = units.into_iter();
    let first = units.next().ok_or_else(|| Error::from(ErrorImpl::MissingPrimary))?;
    if first.extension.is_some() {
        return Err(Error::from(ErrorImpl::InvalidExtension(
            "Primary, expected as the first header-data unit".to_owned(),
        )));
    }

    let mut hdus = vec![Hdu::Primary(to_data_array(&first))];
    for unit in units {
        hdus.push(classify_extension(unit)?);
    }
    Ok(hdus)
}

fn classify_extension(unit: HeaderDataUnit) -> Result<Hdu> {
    let data = to_data_array(&unit);
    match unit.extension {
        Some(ExtensionKind::Image) => Ok(Hdu::Image(data)),
        Some(ExtensionKind::BinTable { pcount, heap }) => Ok(Hdu::BinTable { data, pcount, heap }),
        None => Err(Error::from(ErrorImpl::InvalidExtension(
            "non-Primary header-data unit carried no extension kind".to_owned(),
        ))),
    }
}

fn to_data_array(unit: &HeaderDataUnit) -> DataArray {
    let mut axes = unit.dimensions.axes.clone();
    axes.reverse();
    DataArray {
        bitpix: Bitpix::from(unit.dimensions.bitpix),
        axes,
        raw_data: unit.main_data.clone(),
    }
}
