// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! FITS DATASUM/CHECKSUM computation.
//!
//! This is a fixed, nonstandard algorithm specific to the FITS checksum
//! convention (Seaman 1995) — not a generic CRC, so it is hand-implemented
//! rather than pulled from a crc crate.

/// The 16 ASCII bytes excluded from the encoded checksum string, so it never
/// contains characters with special meaning in a FITS header value field.
const EXCLUDE: [u8; 13] = [
    0x3a, 0x3b, 0x3c, 0x3d, 0x3e, 0x3f, 0x40, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f, 0x60,
];

/// Computes the 32-bit one's-complement sum of `bytes`, treated as
/// big-endian 32-bit words (zero-padded if `bytes.len()` isn't a multiple of
/// 4), with end-around carry.
pub fn sum32(bytes: &[u8]) -> u32 {
    let mut acc: u64 = 0;
    for chunk in bytes.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        acc += u64::from(u32::from_be_bytes(word));
        if acc > 0xFFFF_FFFF {
            acc -= 0xFFFF_FFFF;
        }
    }
    acc as u32
}

/// Encodes a 32-bit checksum into the 16-character printable ASCII string
/// that goes in the `CHECKSUM` keyword's value field.
pub fn encode(sum: u32) -> String {
    let bytes = sum.to_be_bytes();
    let mut ch = [[0u8; 4]; 4];
    for (i, &byte) in bytes.iter().enumerate() {
        let quotient = byte / 4;
        let remainder = (byte % 4) as usize;
        for row in ch.iter_mut() {
            row[i] = quotient + 0x30;
        }
        ch[remainder][i] += 1;
    }

    loop {
        let mut fixed_any = false;
        for i in 0..4 {
            for j in 0..4 {
                if EXCLUDE.contains(&ch[j][i]) {
                    ch[j][i] += 1;
                    ch[(j + 1) % 4][i] -= 1;
                    fixed_any = true;
                }
            }
        }
        if !fixed_any {
            break;
        }
    }

    let mut out = Vec::with_capacity(16);
    for row in &ch {
        for &byte in row {
            out.push(byte);
        }
    }
    out.rotate_right(1);
    String::from_utf8(out).expect("checksum encoding only produces ASCII bytes")
}

/// Computes `DATASUM`: the one's-complement sum over the raw data bytes,
/// rendered as a plain decimal string (not the 16-character encoding used by
/// `CHECKSUM`).
pub fn datasum(data: &[u8]) -> u32 {
    sum32(data)
}

/// Computes the `CHECKSUM` string for a complete HDU (header + data), where
/// the `CHECKSUM` keyword's own value field is still the placeholder
/// `'0000000000000000'` at the time `hdu_bytes` was rendered.
pub fn checksum(hdu_bytes: &[u8]) -> String {
    encode(sum32(hdu_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_always_16_printable_ascii_bytes() {
        for sum in [0u32, 1, 0xFFFF_FFFF, 0x1234_5678, 0xDEAD_BEEF] {
            let encoded = encode(sum);
            assert_eq!(encoded.len(), 16);
            assert!(encoded.bytes().all(|b| b.is_ascii_graphic()));
            assert!(!encoded.bytes().any(|b| EXCLUDE.contains(&b)));
        }
    }

    #[test]
    fn sum32_is_stable_for_empty_input() {
        assert_eq!(sum32(&[]), 0);
    }
}
