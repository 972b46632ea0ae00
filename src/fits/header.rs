// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! FITS header renderer (component G): byte-exact 80-column records,
//! block-aligned to 2880 bytes.

use crate::fits::hdu::Bitpix;
use crate::fits::value::Value;
use crate::fits::{padded_len, BLOCK_SIZE, RECORD_WIDTH};
use log::trace;

/// The placeholder `CHECKSUM` value written on the first rendering pass,
/// before the real checksum is known.
const CHECKSUM_PLACEHOLDER: &str = "0000000000000000";

/// A user-supplied header record, in addition to the required system
/// keywords component G inserts automatically.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// A `NAME = value / comment` keyword line.
    Keyword {
        /// The keyword name (case-insensitive on input; rendered uppercase).
        name: String,
        /// The keyword's value.
        value: Value,
        /// An optional trailing comment.
        comment: Option<String>,
    },
    /// A `COMMENT <text>` line.
    Comment(String),
    /// An 80-space blank line.
    Blank,
}

/// Keyword names reserved for the system section; any user [`Record::Keyword`]
/// with one of these names is dropped rather than duplicated (§4.7).
fn is_system_keyword(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    matches!(upper.as_str(), "BITPIX" | "EXTEND" | "DATASUM" | "CHECKSUM") || upper.starts_with("NAXIS")
}

/// Renders one keyword-value-comment record as an exact 80-byte line.
pub fn render_keyword_line(name: &str, value: &Value, comment: Option<&str>) -> [u8; RECORD_WIDTH] {
    let mut line = vec![b' '; RECORD_WIDTH];

    let name_upper = name.to_ascii_uppercase();
    let name_bytes = name_upper.as_bytes();
    let name_len = name_bytes.len().min(8);
    line[..name_len].copy_from_slice(&name_bytes[..name_len]);

    line[8] = b'=';
    line[9] = b' ';

    let field = value.field_text();
    let mut cursor = if value.is_string() {
        let field_bytes = field.as_bytes();
        let end = (10 + field_bytes.len()).min(RECORD_WIDTH);
        let take = end - 10;
        line[10..end].copy_from_slice(&field_bytes[..take]);
        end
    } else {
        let field_bytes = field.as_bytes();
        let width = 20;
        let start = if field_bytes.len() >= width {
            10
        } else {
            10 + (width - field_bytes.len())
        };
        let end = (start + field_bytes.len()).min(RECORD_WIDTH);
        let take = end - start;
        line[start..end].copy_from_slice(&field_bytes[..take]);
        10 + width
    };
    cursor = cursor.min(RECORD_WIDTH);

    if let Some(comment) = comment {
        if cursor < RECORD_WIDTH {
            let suffix = format!(" / {comment}");
            let suffix_bytes = suffix.as_bytes();
            let end = (cursor + suffix_bytes.len()).min(RECORD_WIDTH);
            let take = end - cursor;
            line[cursor..end].copy_from_slice(&suffix_bytes[..take]);
        }
    }

    let mut out = [b' '; RECORD_WIDTH];
    out.copy_from_slice(&line);
    out
}

fn render_record(record: &Record) -> [u8; RECORD_WIDTH] {
    match record {
        Record::Keyword { name, value, comment } => render_keyword_line(name, value, comment.as_deref()),
        Record::Comment(text) => {
            let mut line = vec![b' '; RECORD_WIDTH];
            line[..7].copy_from_slice(b"COMMENT");
            let body = format!(" {text}");
            let body_bytes = body.as_bytes();
            let end = (8 + body_bytes.len()).min(RECORD_WIDTH);
            let take = end - 8;
            line[8..end].copy_from_slice(&body_bytes[..take]);
            let mut out = [b' '; RECORD_WIDTH];
            out.copy_from_slice(&line);
            out
        }
        Record::Blank => [b' '; RECORD_WIDTH],
    }
}

/// Which kind of HDU a header is being rendered for — drives the
/// required-keyword ordering (§4.7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HduKind {
    /// The mandatory first HDU.
    Primary,
    /// An `IMAGE` extension.
    Image,
}

/// Renders the full, checksum-patched byte sequence of a header followed by
/// its data section, both block-aligned to 2880 bytes.
///
/// `datasum` is precomputed over `data` before this call, per §4.7's
/// two-pass note; the `CHECKSUM` field itself is rendered as zeros, the
/// whole HDU is assembled, the real checksum is computed over those bytes,
/// and the `CHECKSUM` line is patched in place.
pub fn render_hdu(kind: HduKind, bitpix: Bitpix, axes: &[u64], user_records: &[Record], data: &[u8]) -> Vec<u8> {
    let datasum = crate::fits::checksum::datasum(data);
    let mut header = render_header_unpatched(kind, bitpix, axes, user_records, datasum);
    pad_with(&mut header, b' ');

    let mut padded_data = data.to_vec();
    pad_with(&mut padded_data, 0);

    let mut hdu = header;
    hdu.extend_from_slice(&padded_data);

    let checksum = crate::fits::checksum::checksum(&hdu);
    patch_checksum_line(&mut hdu, &checksum);
    trace!("rendered HDU: {} header bytes, {} data bytes", hdu.len() - padded_data.len(), padded_data.len());
    hdu
}

fn render_header_unpatched(kind: HduKind, bitpix: Bitpix, axes: &[u64], user_records: &[Record], datasum: u32) -> Vec<u8> {
    let mut records = Vec::new();

    match kind {
        HduKind::Primary => {
            records.push(Record::Keyword {
                name: "SIMPLE".to_owned(),
                value: Value::Logic(true),
                comment: Some("Conforms to the FITS standard".to_owned()),
            });
            push_common_axes(&mut records, bitpix, axes);
            records.push(Record::Keyword {
                name: "EXTEND".to_owned(),
                value: Value::Logic(true),
                comment: None,
            });
        }
        HduKind::Image => {
            records.push(Record::Keyword {
                name: "XTENSION".to_owned(),
                value: Value::String("IMAGE".to_owned()),
                comment: None,
            });
            push_common_axes(&mut records, bitpix, axes);
            records.push(Record::Keyword {
                name: "PCOUNT".to_owned(),
                value: Value::Integer(0),
                comment: None,
            });
            records.push(Record::Keyword {
                name: "GCOUNT".to_owned(),
                value: Value::Integer(1),
                comment: None,
            });
        }
    }

    records.push(Record::Keyword {
        name: "DATASUM".to_owned(),
        value: Value::String(datasum.to_string()),
        comment: None,
    });
    records.push(Record::Keyword {
        name: "CHECKSUM".to_owned(),
        value: Value::String(CHECKSUM_PLACEHOLDER.to_owned()),
        comment: None,
    });

    for record in user_records {
        if let Record::Keyword { name, .. } = record {
            if is_system_keyword(name) {
                continue;
            }
        }
        records.push(record.clone());
    }

    records.push(Record::Keyword {
        name: "END".to_owned(),
        value: Value::Logic(true),
        comment: None,
    });

    let mut bytes = Vec::with_capacity(records.len() * RECORD_WIDTH);
    for record in &records {
        bytes.extend_from_slice(&render_record(record));
    }
    bytes
}

fn push_common_axes(records: &mut Vec<Record>, bitpix: Bitpix, axes: &[u64]) {
    records.push(Record::Keyword {
        name: "BITPIX".to_owned(),
        value: Value::Integer(bitpix.code()),
        comment: None,
    });
    records.push(Record::Keyword {
        name: "NAXIS".to_owned(),
        value: Value::Integer(axes.len() as i64),
        comment: None,
    });
    for (i, axis) in axes.iter().enumerate() {
        records.push(Record::Keyword {
            name: format!("NAXIS{}", i + 1),
            value: Value::Integer(*axis as i64),
            comment: None,
        });
    }
}

/// Pads `buf` with `fill` bytes up to the next multiple of [`BLOCK_SIZE`].
pub fn pad_with(buf: &mut Vec<u8>, fill: u8) {
    let target = padded_len(buf.len());
    buf.resize(target, fill);
}

fn patch_checksum_line(hdu: &mut [u8], checksum: &str) {
    let placeholder_field = format!("'{CHECKSUM_PLACEHOLDER}'");
    for chunk in hdu.chunks_mut(RECORD_WIDTH) {
        if chunk.starts_with(b"CHECKSUM") {
            let line = String::from_utf8_lossy(chunk);
            if line.contains(&placeholder_field) {
                let patched = render_keyword_line("CHECKSUM", &Value::String(checksum.to_owned()), None);
                chunk.copy_from_slice(&patched);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s4_simple_keyword_line() {
        let line = render_keyword_line("SIMPLE", &Value::Logic(true), Some("Conforms to the FITS standard"));
        let text = String::from_utf8(line.to_vec()).unwrap();
        let mut expected = String::from("SIMPLE  = ");
        expected.push_str(&" ".repeat(19));
        expected.push('T');
        expected.push_str(" / Conforms to the FITS standard");
        expected.push_str(&" ".repeat(80 - expected.len()));
        assert_eq!(text, expected);
        assert_eq!(text.len(), 80);
    }

    #[test]
    fn s5_fill_block_padding() {
        let mut empty = Vec::new();
        pad_with(&mut empty, 0);
        assert_eq!(empty.len(), 0);

        let mut some_data = b"asdf".to_vec();
        pad_with(&mut some_data, 0);
        assert_eq!(some_data.len(), BLOCK_SIZE);
        assert!(some_data[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn header_length_is_block_aligned() {
        let hdu = render_hdu(HduKind::Primary, Bitpix::BPFloat, &[10, 10], &[], &[0; 400]);
        assert_eq!(hdu.len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn system_keywords_are_filtered_from_user_section() {
        let user = vec![Record::Keyword {
            name: "BITPIX".to_owned(),
            value: Value::Integer(99),
            comment: None,
        }];
        let header = render_header_unpatched(HduKind::Primary, Bitpix::BPInt8, &[1], &user, 0);
        let text = String::from_utf8_lossy(&header);
        assert_eq!(text.matches("BITPIX").count(), 1);
    }
}
