// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 ASDF-FITS Core Contributors. All rights reserved.

//! The value a FITS keyword record can carry.

use crate::number::{format_float_fits, format_integer};

/// A FITS keyword's value, per §4.7's formatting table.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `T` or `F`.
    Logic(bool),
    /// A decimal integer.
    Integer(i64),
    /// A float, rendered with an uppercase exponent marker.
    Float(f64),
    /// A quoted string.
    String(String),
}

impl Value {
    /// Is this a string value? Strings are left-justified and unquoted
    /// widths differ from the numeric/logical right-justify rule.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// The unjustified field text — `T`/`F`, the decimal integer, the
    /// uppercase-exponent float, or the quoted string body.
    pub fn field_text(&self) -> String {
        match self {
            Value::Logic(true) => "T".to_owned(),
            Value::Logic(false) => "F".to_owned(),
            Value::Integer(i) => format_integer(*i),
            Value::Float(f) => format_float_fits(*f),
            Value::String(s) => format!("'{s}'"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logic(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}
