// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The external YAML event collaborator interface.
//!
//! This crate does not parse or emit YAML text itself — the spec treats a
//! low-level event producer/consumer (tokenizing/serializing YAML 1.1) as an
//! external collaborator. What lives here is the shared vocabulary: the
//! [`Event`] stream shape that component C writes into and component D reads
//! from. Wiring a real parser/emitter underneath these events (the teacher
//! crate's own `libyaml`/FFI layer is one candidate) is left to the
//! application embedding this crate.

mod event;

pub use event::{CollectionStyle, Event, Scalar, ScalarStyle, Tag};
