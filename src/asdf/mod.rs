// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The ASDF streaming codec: components C through F.

/// The block-index sink (component F).
pub mod block_index;
/// The event consumer (component D).
pub mod consumer;
/// The event producer (component C).
pub mod producer;
/// The scalar tag dispatcher (component E).
pub mod scalar;

use crate::error::Error;

/// The result of one recognizer in an ordered-alternatives chain (§9,
/// "Ordered alternatives with recovery").
///
/// A recognizer that doesn't apply to its input yields [`Recognition::NotApplicable`]
/// and the dispatcher falls through to the next alternative; one that applies
/// but is malformed yields [`Recognition::HardError`], which propagates
/// unconditionally; one that both applies and succeeds yields
/// [`Recognition::Matched`], which commits.
pub(crate) enum Recognition<T> {
    /// The recognizer applied and produced a value.
    Matched(T),
    /// The recognizer does not apply to this input; try the next alternative.
    NotApplicable,
    /// The recognizer applied but the input was malformed; propagate.
    HardError(Error),
}
