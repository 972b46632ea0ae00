// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The event vocabulary exchanged with the external YAML collaborator.

/// A YAML tag as it appears on an event, before scalar dispatch (§4.5)
/// interprets it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// `tag:yaml.org,2002:str`.
    StrTag,
    /// `tag:yaml.org,2002:int`.
    IntTag,
    /// `tag:yaml.org,2002:float`.
    FloatTag,
    /// `tag:yaml.org,2002:bool`.
    BoolTag,
    /// `tag:yaml.org,2002:null`.
    NullTag,
    /// Any other URI, including `tag:stsci.edu:asdf/...` schema tags.
    UriTag(String),
    /// No tag was present on this event.
    NoTag,
}

/// The presentation style of a scalar event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Unquoted.
    Plain,
    /// `'...'`.
    SingleQuoted,
    /// `"..."`.
    DoubleQuoted,
    /// `|`-block.
    Literal,
    /// `>`-block.
    Folded,
}

/// A scalar's tag, bytes, style, and optional anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar {
    /// The scalar's raw text.
    pub value: String,
    /// The scalar's tag.
    pub tag: Tag,
    /// The scalar's presentation style.
    pub style: ScalarStyle,
    /// An anchor name, if this scalar is aliased elsewhere in the document.
    pub anchor: Option<String>,
}

/// The presentation style of a mapping or sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionStyle {
    /// One entry per line, indentation-delimited.
    Block,
    /// `{...}` / `[...]`.
    Flow,
}

/// One event in the stream exchanged between this crate and the external
/// YAML parser/emitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The start of the event stream.
    StreamStart,
    /// The end of the event stream.
    StreamEnd,
    /// The start of a document.
    DocumentStart,
    /// The end of a document.
    DocumentEnd,
    /// A scalar value.
    Scalar(Scalar),
    /// The start of a mapping.
    MappingStart {
        /// The mapping's tag, if any.
        tag: Tag,
        /// The mapping's presentation style.
        style: CollectionStyle,
        /// An anchor name, if this mapping is aliased elsewhere.
        anchor: Option<String>,
    },
    /// The end of a mapping.
    MappingEnd,
    /// The start of a sequence.
    SequenceStart {
        /// The sequence's tag, if any.
        tag: Tag,
        /// The sequence's presentation style.
        style: CollectionStyle,
        /// An anchor name, if this sequence is aliased elsewhere.
        anchor: Option<String>,
    },
    /// The end of a sequence.
    SequenceEnd,
}

impl Event {
    /// A convenience constructor for a plain, untagged, unanchored scalar —
    /// the overwhelmingly common case the event producer emits.
    pub fn plain_scalar(value: impl Into<String>) -> Event {
        Event::Scalar(Scalar {
            value: value.into(),
            tag: Tag::NoTag,
            style: ScalarStyle::Plain,
            anchor: None,
        })
    }
}
