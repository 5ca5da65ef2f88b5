//! The source of data to decode.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{fmt, ops};
use bytes::Bytes;
use crate::mode::Mode;
use super::error::{DecodeError, ErrorKind};


//------------ Source --------------------------------------------------------

/// A cursor over encoded data that is completely in memory.
///
/// The source keeps the data as a [`Bytes`] value so that the content of
/// decoded values can be split off without copying. It also carries the
/// [`Mode`] the data is decoded in so that the individual codecs can apply
/// the stricter DER rules where necessary.
#[derive(Clone, Debug)]
pub struct Source {
    /// The data that hasn’t been consumed yet.
    data: Bytes,

    /// The number of octets consumed so far.
    pos: usize,

    /// The decoding mode.
    mode: Mode,
}

impl Source {
    /// Creates a new source atop the given data.
    pub fn new(data: Bytes, mode: Mode) -> Self {
        Source { data, pos: 0, mode }
    }

    /// Returns the decoding mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current position.
    pub fn pos(&self) -> Pos {
        self.pos.into()
    }

    /// Returns the remaining data.
    pub fn remaining(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Returns whether all data has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the next octet without consuming it.
    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        match self.data.first() {
            Some(&value) => Ok(value),
            None => Err(self.err(ErrorKind::TruncatedInput))
        }
    }

    /// Takes a single octet from the source.
    ///
    /// If there aren’t any more octets available from the source, returns
    /// a truncated input error.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        let res = self.peek_u8()?;
        self.advance(1);
        Ok(res)
    }

    /// Takes exactly `len` octets from the source.
    pub fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.data.len() < len {
            return Err(self.err(ErrorKind::TruncatedInput))
        }
        let res = self.data.split_to(len);
        self.pos += len;
        Ok(res)
    }

    /// Returns an error if there is data left in the source.
    pub fn check_exhausted(&self) -> Result<(), DecodeError> {
        if self.is_exhausted() {
            Ok(())
        }
        else {
            Err(self.err(ErrorKind::TrailingData))
        }
    }

    /// Returns an error of the given kind at the current position.
    pub fn err(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos)
    }

    fn advance(&mut self, len: usize) {
        let _ = self.data.split_to(len);
        self.pos += len;
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type can only be used for diagnostics. They can not be used
/// to determine how far a source has been advanced since it was created. This
/// is why we used a newtype.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pos(usize);

impl Pos {
    /// Returns the position as a plain offset.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl ops::Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Pos(self.0 + rhs.0)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//============ Tests =========================================================
