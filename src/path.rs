// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

use std::fmt::{self, Display};

/// A breadcrumb trail to the current position in the tree being decoded,
/// e.g. `.frames[2].wcs`. Borrowed, `Copy` linked list — each recursive call
/// pushes one frame on the stack rather than allocating.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Path<'a> {
    /// The root of the document.
    Root,
    /// An element of a sequence.
    Seq {
        /// The enclosing path.
        parent: &'a Path<'a>,
        /// The element's index.
        index: usize,
    },
    /// A value in a mapping.
    Map {
        /// The enclosing path.
        parent: &'a Path<'a>,
        /// The value's key.
        key: &'a str,
    },
}

impl Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Parent<'a>(&'a Path<'a>);

        impl Display for Parent<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Path::Root => Ok(()),
                    path => write!(f, "{path}."),
                }
            }
        }

        match self {
            Path::Root => f.write_str("."),
            Path::Seq { parent, index } => {
                write!(f, "{}[{}]", Parent(parent), index)
            }
            Path::Map { parent, key } => {
                write!(f, "{}{}", Parent(parent), key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_dot() {
        assert_eq!(Path::Root.to_string(), ".");
    }

    #[test]
    fn nested_path_renders_breadcrumb() {
        let root = Path::Root;
        let frames = Path::Map { parent: &root, key: "frames" };
        let index = Path::Seq { parent: &frames, index: 2 };
        let wcs = Path::Map { parent: &index, key: "wcs" };
        assert_eq!(wcs.to_string(), ".frames[2].wcs");
    }
}
