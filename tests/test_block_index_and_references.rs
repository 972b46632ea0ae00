// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

use anyhow::Result;
use asdf_fits_core::asdf::block_index;
use asdf_fits_core::yaml::Event;

#[test]
fn block_index_round_trips_through_full_framing() -> Result<()> {
    let offsets = vec![0u64, 2880, 8640, 11520];
    let events = block_index::encode(&offsets);

    assert!(matches!(events.first(), Some(Event::StreamStart)));
    assert!(matches!(events.last(), Some(Event::StreamEnd)));

    let mut it = events.into_iter().peekable();
    let decoded = block_index::decode(&mut it)?;
    assert_eq!(decoded, offsets);
    Ok(())
}

#[test]
fn block_index_of_empty_store_is_empty_sequence() -> Result<()> {
    let events = block_index::encode(&[]);
    let mut it = events.into_iter().peekable();
    assert_eq!(block_index::decode(&mut it)?, Vec::<u64>::new());
    Ok(())
}

#[test]
fn malformed_ref_value_is_hard_error() {
    use asdf_fits_core::yaml::{CollectionStyle, Scalar, ScalarStyle, Tag};

    let blocks = asdf_fits_core::BlockStore::new();
    let doc = vec![
        Event::StreamStart,
        Event::DocumentStart,
        Event::MappingStart {
            tag: Tag::NoTag,
            style: CollectionStyle::Block,
            anchor: None,
        },
        Event::plain_scalar("x"),
        Event::MappingStart {
            tag: Tag::NoTag,
            style: CollectionStyle::Flow,
            anchor: None,
        },
        Event::plain_scalar("$ref"),
        Event::Scalar(Scalar {
            value: "42".to_owned(),
            tag: Tag::IntTag,
            style: ScalarStyle::Plain,
            anchor: None,
        }),
        Event::MappingEnd,
        Event::MappingEnd,
        Event::DocumentEnd,
        Event::StreamEnd,
    ];
    assert!(asdf_fits_core::decode_document(doc, &blocks).is_err());
}
