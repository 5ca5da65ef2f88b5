//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use crate::tag::Tag;
use super::source::Pos;


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// Decoding is all or nothing: if any part of the input violates the
/// encoding rules, the whole operation fails with an error of this type and
/// no partially decoded value is produced.
///
/// The error carries the [kind][ErrorKind] of the violation as well as the
/// position where it was detected. The position is relative to the start of
/// the octets handed to the decoder that failed. For elements of a
/// SEQUENCE, this is the start of the SEQUENCE’s content.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind} at position {pos}")]
pub struct DecodeError {
    kind: ErrorKind,
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error of the given kind at the given position.
    pub fn new(kind: ErrorKind, pos: impl Into<Pos>) -> Self {
        DecodeError { kind, pos: pos.into() }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the position where the error was detected.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Returns the error with the position moved forward by `offset`.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        DecodeError { kind: self.kind, pos: self.pos + Pos::from(offset) }
    }
}


//------------ ErrorKind -----------------------------------------------------

/// The kind of a decoding error.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// The data ended before a declared length or continuation was satisfied.
    #[error("unexpected end of data")]
    TruncatedInput,

    /// The identifier octets are structurally invalid.
    #[error("malformed identifier octets")]
    MalformedTag,

    /// The length octets are structurally invalid or not supported.
    #[error("malformed length octets: {0}")]
    MalformedLength(&'static str),

    /// The content octets violate the rules of the value’s type.
    #[error("malformed {tag} content: {reason}")]
    MalformedValue {
        tag: Tag,
        reason: &'static str,
    },

    /// There is no decoder for the tag.
    #[error("no decoder registered for {0}")]
    UnknownTag(Tag),

    /// A specific type was requested but the value has a different tag.
    #[error("expected {expected}, found {found}")]
    TagMismatch {
        expected: Tag,
        found: Tag,
    },

    /// The elements of a SEQUENCE OF have different tags.
    #[error("SEQUENCE OF element with tag {found}, expected {expected}")]
    HeterogeneousSequenceOf {
        expected: Tag,
        found: Tag,
    },

    /// There is data left after a complete value.
    #[error("trailing data")]
    TrailingData,
}

impl ErrorKind {
    /// Creates a malformed value error for the given tag.
    pub(crate) fn malformed(tag: Tag, reason: &'static str) -> Self {
        ErrorKind::MalformedValue { tag, reason }
    }
}


//============ Tests =========================================================
