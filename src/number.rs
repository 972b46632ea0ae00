// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! Scalar text formatting shared by the ASDF event producer and the FITS
//! header renderer.
//!
//! Both need the same two things from a number: the shortest round-trippable
//! decimal text, and (for FITS) that text with an uppercase exponent letter.
//! `itoa`/`ryu` give the first for free; the second is a one-line transform
//! on top, kept here rather than duplicated in both renderers.

/// Formats an `i64` the way the ASDF scalar producer and the FITS keyword
/// renderer both want it: plain decimal, no leading zeros, no thousands
/// separators.
pub(crate) fn format_integer(value: i64) -> String {
    let mut buf = itoa::Buffer::new();
    buf.format(value).to_owned()
}

/// Formats an `f64` with `ryu`'s shortest round-trippable representation.
///
/// `ryu` always emits a decimal point and, for values needing one, a
/// lowercase `e` exponent; FITS keyword values require an uppercase `E`
/// (§4.6 of the header grammar), so callers writing a FITS header should use
/// [`format_float_fits`] instead.
pub(crate) fn format_float(value: f64) -> String {
    let mut buf = ryu::Buffer::new();
    buf.format(value).to_owned()
}

/// Formats an `f64` for a FITS keyword value: same digits as
/// [`format_float`], with the exponent marker (if any) uppercased.
pub(crate) fn format_float_fits(value: f64) -> String {
    format_float(value).replace('e', "E")
}

/// Recognizes the closed set of spellings the untagged-scalar disambiguator
/// accepts as an integer, matching what `itoa`/`format_integer` can
/// round-trip: an optional sign followed by one or more ASCII digits, no
/// leading zero unless the value itself is zero.
pub(crate) fn looks_like_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits.len() == 1 || !digits.starts_with('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_roundtrip() {
        assert_eq!(format_integer(-42), "-42");
        assert_eq!(format_integer(0), "0");
    }

    #[test]
    fn float_fits_uppercases_exponent() {
        assert_eq!(format_float_fits(1.5e10), format_float(1.5e10).replace('e', "E"));
    }

    #[test]
    fn integer_lexeme_rejects_leading_zero() {
        assert!(looks_like_integer("42"));
        assert!(looks_like_integer("-1"));
        assert!(looks_like_integer("0"));
        assert!(!looks_like_integer("007"));
        assert!(!looks_like_integer("1.0"));
        assert!(!looks_like_integer(""));
    }
}
