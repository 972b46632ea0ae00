// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! Block-index sink (component F): the trailing YAML document whose root is
//! a flat sequence of integer byte offsets, one per block.

use crate::error::{Error, ErrorImpl, Result};
use crate::number::{format_integer, looks_like_integer};
use crate::yaml::{CollectionStyle, Event, Tag};
use std::iter::Peekable;

/// Renders a list of byte offsets as the block-index event sequence.
pub fn encode(offsets: &[u64]) -> Vec<Event> {
    let mut events = vec![
        Event::StreamStart,
        Event::DocumentStart,
        Event::SequenceStart {
            tag: Tag::NoTag,
            style: CollectionStyle::Block,
            anchor: None,
        },
    ];
    for offset in offsets {
        events.push(Event::plain_scalar(format_integer(*offset as i64)));
    }
    events.push(Event::SequenceEnd);
    events.push(Event::DocumentEnd);
    events.push(Event::StreamEnd);
    events
}

/// Reads `StreamStart, DocumentStart, SequenceStart, scalar*, SequenceEnd,
/// DocumentEnd, StreamEnd`, collecting each scalar as an integer offset.
pub fn decode<I>(events: &mut Peekable<I>) -> Result<Vec<u64>>
where
    I: Iterator<Item = Event>,
{
    expect(events, |e| matches!(e, Event::StreamStart))?;
    expect(events, |e| matches!(e, Event::DocumentStart))?;
    expect(events, |e| matches!(e, Event::SequenceStart { .. }))?;

    let mut offsets = Vec::new();
    loop {
        match events.next() {
            Some(Event::SequenceEnd) => break,
            Some(Event::Scalar(scalar)) => {
                if !looks_like_integer(&scalar.value) {
                    return Err(Error::from(ErrorImpl::InvalidScalar {
                        expected_type: "Int Index Entry",
                        value: scalar.value,
                    }));
                }
                let offset: u64 = scalar.value.parse().map_err(|_| {
                    Error::from(ErrorImpl::InvalidScalar {
                        expected_type: "Int Index Entry",
                        value: scalar.value.clone(),
                    })
                })?;
                offsets.push(offset);
            }
            Some(other) => {
                return Err(Error::from(ErrorImpl::ExpectedEvent {
                    expected: "Scalar or SequenceEnd",
                    actual: format!("{other:?}"),
                }))
            }
            None => return Err(Error::from(ErrorImpl::NoInput)),
        }
    }

    expect(events, |e| matches!(e, Event::DocumentEnd))?;
    expect(events, |e| matches!(e, Event::StreamEnd))?;
    Ok(offsets)
}

fn expect<I>(events: &mut Peekable<I>, predicate: impl FnOnce(&Event) -> bool) -> Result<()>
where
    I: Iterator<Item = Event>,
{
    match events.next() {
        Some(event) if predicate(&event) => Ok(()),
        Some(other) => Err(Error::from(ErrorImpl::ExpectedEvent {
            expected: "block index framing event",
            actual: format!("{other:?}"),
        })),
        None => Err(Error::from(ErrorImpl::NoInput)),
    }
}
