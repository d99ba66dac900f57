// SPDX-License-Identifier: Apache-2.0

//! Parse error taxonomy.

/// Error kinds reported through the error hook.
///
/// The set is closed. Every kind carries a stable human-readable label
/// suitable for logs; the same label is passed to the error hook alongside
/// the kind itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No error. Never passed to the error hook.
    None,
    /// A stray byte arrived in the idle state (reported only with the
    /// `strict-discard` feature; otherwise such bytes are dropped).
    Discard,
    /// A member name outgrew its buffer.
    NameTooLong,
    /// A string or number literal outgrew its buffer.
    ValueTooLong,
    /// Unexpected character inside an object.
    ParseObject,
    /// Unexpected character where a member name should start.
    ParseName,
    /// Invalid character inside a member name.
    IllegalNameChar,
    /// Unexpected character where `:` was expected.
    ParseAssignment,
    /// Unexpected character where a value should start, or a number
    /// literal that does not convert.
    ParseValue,
    /// Unexpected character inside an array.
    ParseArray,
    /// Saved-state or nesting stack over/underflow, or a defensive branch.
    Internal,
}

impl ErrorKind {
    /// Stable human-readable label for this kind.
    pub const fn label(&self) -> &'static str {
        match self {
            ErrorKind::None => "none",
            ErrorKind::Discard => "discard",
            ErrorKind::NameTooLong => "name too long",
            ErrorKind::ValueTooLong => "value too long",
            ErrorKind::ParseObject => "parsing object",
            ErrorKind::ParseName => "parsing name",
            ErrorKind::IllegalNameChar => "illegal name char",
            ErrorKind::ParseAssignment => "parsing assignment",
            ErrorKind::ParseValue => "parsing value",
            ErrorKind::ParseArray => "parsing array",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
