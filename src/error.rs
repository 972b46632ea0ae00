// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The error taxonomy shared by the ASDF codec and the FITS renderer/classifier.
//!
//! The public [`Error`] type hides its internal representation behind a boxed
//! enum, following the same shape as a typical hand-rolled Serde-adjacent
//! error type: cheap to move around, `Display`/`Debug` driven off one match,
//! and carrying an optional [`Path`] breadcrumb for structural failures.

use crate::path::Path;
use std::{
    error::Error as StdError,
    fmt::{self, Debug, Display},
    result,
};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = result::Result<T, Error>;

/// An error that happened while encoding, decoding, or rendering a document.
pub struct Error {
    kind: Box<ErrorImpl>,
    /// Where in the tree the error occurred, e.g. `.frames[2].wcs`.
    ///
    /// Filled in by [`Error::with_path`] as the error unwinds out of the
    /// event consumer's recursive descent (see `asdf::consumer`); `None` for
    /// errors raised outside tree traversal (the FITS renderer, the
    /// top-level stream framing checks).
    path: Option<String>,
}

/// The internal representation of an error.
///
/// One flat enum covers both the ASDF taxonomy (§7 of the spec) and the FITS
/// taxonomy, the same way the teacher crate keeps one `ErrorImpl` for its
/// whole (larger) error surface rather than one type per module.
#[derive(Debug)]
pub enum ErrorImpl {
    /// The event stream ended where a value was expected.
    NoInput,
    /// An event of a different kind than expected was encountered.
    ExpectedEvent {
        /// What the caller expected to see.
        expected: &'static str,
        /// A debug rendering of what was actually seen.
        actual: String,
    },
    /// A scalar committed to a tag (`int`, `float`, `bool`) failed to parse as that type.
    InvalidScalar {
        /// The type the tag committed to (`"Int"`, `"Float"`, `"Bool"`, …).
        expected_type: &'static str,
        /// The scalar bytes, rendered lossily for display.
        value: String,
    },
    /// A scalar carried a tag this dispatcher does not recognize.
    InvalidScalarTag {
        /// The unrecognized tag.
        tag: String,
        /// The scalar bytes, rendered lossily for display.
        value: String,
    },
    /// A node occupied a tree position where it is not a valid shape.
    InvalidTree {
        /// Why the tree is invalid.
        reason: &'static str,
        /// A debug rendering of the offending value.
        value: String,
    },
    /// An `!core/ndarray` mapping was missing a required key.
    NDArrayMissingKey(&'static str),
    /// An `!core/ndarray` mapping's `source` index has no matching block.
    NDArrayMissingBlock(usize),
    /// An `!core/ndarray` field had the wrong shape.
    NDArrayExpected {
        /// The field name (`"DataType"`, `"Shape"`, …).
        field: &'static str,
        /// A debug rendering of the offending value.
        value: String,
    },
    /// A `$ref` key was present but its value was not a string.
    InvalidReference(String),
    /// The encoder or decoder recursed past [`crate::MAX_RECURSION_DEPTH`].
    RecursionLimitExceeded,
    /// A FITS extension HDU was not a recognized kind, or appeared out of order.
    InvalidExtension(String),
    /// A FITS HDU sequence did not begin with a Primary HDU.
    MissingPrimary,
    /// An error from the external FITS parser/array codec collaborator.
    FormatError(String),
    /// A generic message, used by `From`/custom-error constructors.
    Message(String),
}

impl Error {
    pub(crate) fn new(inner: ErrorImpl) -> Self {
        Error {
            kind: Box::new(inner),
            path: None,
        }
    }

    /// Attaches a tree-path breadcrumb to this error, if it doesn't have one yet.
    ///
    /// Structural errors are raised deep in recursive descent; the path is
    /// threaded back out on the way up (one frame at a time) so the final
    /// `Display` shows where in the document the failure occurred.
    pub(crate) fn with_path(mut self, path: &Path<'_>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.to_string());
        }
        self
    }

    /// Returns the inner [`ErrorImpl`], for callers that want to match on the
    /// specific failure kind instead of only the `Display` text.
    pub fn kind(&self) -> &ErrorImpl {
        &self.kind
    }
}

impl From<ErrorImpl> for Error {
    fn from(inner: ErrorImpl) -> Self {
        Error::new(inner)
    }
}

impl StdError for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.kind, f)?;
        if let Some(path) = &self.path {
            if path != "." {
                write!(f, " at {path}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error({})", self)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorImpl::NoInput => {
                f.write_str("event stream exhausted unexpectedly")
            }
            ErrorImpl::ExpectedEvent { expected, actual } => {
                write!(f, "expected {expected}, found {actual}")
            }
            ErrorImpl::InvalidScalar {
                expected_type,
                value,
            } => {
                write!(f, "invalid {expected_type} scalar: {value:?}")
            }
            ErrorImpl::InvalidScalarTag { tag, value } => {
                write!(f, "unrecognized scalar tag {tag:?} on {value:?}")
            }
            ErrorImpl::InvalidTree { reason, value } => {
                write!(f, "{reason}: {value}")
            }
            ErrorImpl::NDArrayMissingKey(key) => {
                write!(f, "ndarray mapping missing required key {key:?}")
            }
            ErrorImpl::NDArrayMissingBlock(index) => {
                write!(f, "ndarray source index {index} has no matching block")
            }
            ErrorImpl::NDArrayExpected { field, value } => {
                write!(f, "ndarray field {field} has unexpected value {value}")
            }
            ErrorImpl::InvalidReference(value) => {
                write!(f, "$ref value is not a string: {value}")
            }
            ErrorImpl::RecursionLimitExceeded => {
                f.write_str("recursion limit exceeded")
            }
            ErrorImpl::InvalidExtension(reason) => {
                write!(f, "invalid FITS extension: {reason}")
            }
            ErrorImpl::MissingPrimary => {
                f.write_str("FITS HDU sequence did not start with a Primary HDU")
            }
            ErrorImpl::FormatError(inner) => {
                write!(f, "FITS format error: {inner}")
            }
            ErrorImpl::Message(msg) => f.write_str(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_not_rendered() {
        let error = Error::from(ErrorImpl::NoInput).with_path(&Path::Root);
        assert_eq!(error.to_string(), "event stream exhausted unexpectedly");
    }

    #[test]
    fn non_root_path_is_appended() {
        let root = Path::Root;
        let frame = Path::Map { parent: &root, key: "wcs" };
        let error = Error::from(ErrorImpl::NoInput).with_path(&frame);
        assert_eq!(error.to_string(), "event stream exhausted unexpectedly at .wcs");
    }

    #[test]
    fn first_path_attached_wins() {
        let root = Path::Root;
        let outer = Path::Map { parent: &root, key: "outer" };
        let inner = Path::Map { parent: &outer, key: "inner" };
        let error = Error::from(ErrorImpl::NoInput).with_path(&inner).with_path(&root);
        assert_eq!(error.to_string(), "event stream exhausted unexpectedly at .outer.inner");
    }
}
