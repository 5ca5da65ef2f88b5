//! BER encoded integers.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind};
use crate::encode::Target;
use crate::mode::Mode;
use crate::number::Number;
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::Universal;


//------------ Integer -------------------------------------------------------

/// A BER encoded integer.
///
/// As integers are variable length in BER, this type is just a simple wrapper
/// atop a `Bytes` value containing the content octets. A value of this type
/// is a signed integer of arbitrary width.
///
/// The octets are always kept in their shortest form, i.e., the first nine
/// bits of a multi-octet integer are never all the same. This makes it
/// possible to compare integers by comparing their octets and means that
/// encoding is always DER.
///
/// Conversions from all built-in integer types are available via `From`.
/// Conversions into `i32`, `i64` and `i128` are available via `TryFrom` and
/// fail if the value is too large.
///
/// # BER Encoding
///
/// In BER, an INTEGER is encoded as a primitive value with the content octets
/// providing a variable-length, big-endian, two‘s complement byte sequence of
/// that integer. Thus, the most-significant bit of the first octet serves as
/// the sign bit. There must be at least one content octet.
///
/// DER additionally requires the shortest encoding. When decoding in BER
/// mode, superfluous leading octets are dropped.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Creates an integer from big-endian two’s complement octets.
    ///
    /// The octets don’t need to be minimal. An empty slice is zero.
    pub fn from_signed_bytes(octets: &[u8]) -> Self {
        if octets.is_empty() {
            return Integer(Bytes::from_static(b"\x00"))
        }
        Integer(Bytes::copy_from_slice(&octets[Self::redundant(octets)..]))
    }

    /// Returns the minimal two’s complement octets of the integer.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns whether the integer is less than zero.
    pub fn is_negative(&self) -> bool {
        self.0.first().map(|x| x & 0x80 != 0).unwrap_or(false)
    }

    /// Returns whether the integer is zero.
    pub fn is_zero(&self) -> bool {
        self.0.as_ref() == b"\x00"
    }

    /// Returns the absolute value of the integer as an unsigned number.
    pub fn magnitude(&self) -> Number {
        if !self.is_negative() {
            return Number::from_be_bytes(self.as_slice())
        }

        // Negate: invert and add one.
        let mut octets: Vec<u8> = self.0.iter().map(|x| !x).collect();
        for octet in octets.iter_mut().rev() {
            let (res, carry) = octet.overflowing_add(1);
            *octet = res;
            if !carry {
                break
            }
        }
        Number::from_be_bytes(&octets)
    }

    /// Returns the number of leading octets that can be dropped.
    fn redundant(octets: &[u8]) -> usize {
        octets.windows(2).take_while(|pair| {
            (pair[0] == 0 && pair[1] & 0x80 == 0)
            || (pair[0] == 0xFF && pair[1] & 0x80 != 0)
        }).count()
    }

    /// Decodes the content octets of an INTEGER or ENUMERATED.
    ///
    /// The `tag` is only used for error reporting.
    fn decode_content(
        content: &Bytes, tag: Tag, mode: Mode
    ) -> Result<Self, DecodeError> {
        if content.is_empty() {
            return Err(DecodeError::new(
                ErrorKind::malformed(tag, "empty content"), 0usize
            ))
        }
        let redundant = Self::redundant(content);
        if redundant > 0 && mode.is_restricted() {
            return Err(DecodeError::new(
                ErrorKind::malformed(tag, "non-minimal integer in DER"),
                0usize
            ))
        }
        Ok(Integer(content.slice(redundant..)))
    }
}


//--- Universal

impl Universal for Integer {
    const TAG: Tag = Tag::INTEGER;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        Self::decode_content(triplet.value(), Self::TAG, mode)
    }

    fn content_len(&self) -> usize {
        self.0.len()
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(self.as_slice())
    }
}


//--- From and TryFrom

macro_rules! from_builtin {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Integer {
                fn from(value: $type) -> Self {
                    Integer::from_signed_bytes(&value.to_be_bytes())
                }
            }
        )*
    }
}

macro_rules! from_unsigned_builtin {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Integer {
                fn from(value: $type) -> Self {
                    // Prepend a zero octet so the sign bit is clear.
                    let mut octets = [0u8; std::mem::size_of::<$type>() + 1];
                    octets[1..].copy_from_slice(&value.to_be_bytes());
                    Integer::from_signed_bytes(&octets)
                }
            }
        )*
    }
}

from_builtin!(i8, i16, i32, i64, i128, isize);
from_unsigned_builtin!(u8, u16, u32, u64, u128, usize);

macro_rules! try_into_builtin {
    ( $( $type:ident ),* ) => {
        $(
            impl TryFrom<&Integer> for $type {
                type Error = OverflowError;

                fn try_from(value: &Integer) -> Result<Self, Self::Error> {
                    const LEN: usize = std::mem::size_of::<$type>();
                    let octets = value.as_slice();
                    if octets.len() > LEN {
                        return Err(OverflowError)
                    }
                    let mut res = if value.is_negative() {
                        [0xFFu8; LEN]
                    }
                    else {
                        [0u8; LEN]
                    };
                    res[LEN - octets.len()..].copy_from_slice(octets);
                    Ok($type::from_be_bytes(res))
                }
            }
        )*
    }
}

try_into_builtin!(i32, i64, i128);


//--- Display and Debug

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        fmt::Display::fmt(&self.magnitude(), f)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}


//------------ Enumerated ----------------------------------------------------

/// A BER encoded ENUMERATED value.
///
/// Enumerated values are encoded exactly like integers and only differ in
/// their tag. The type therefore simply wraps an [`Integer`].
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Enumerated(Integer);

impl Enumerated {
    /// Creates a new value from an integer.
    pub fn new(value: Integer) -> Self {
        Enumerated(value)
    }

    /// Returns a reference to the integer value.
    pub fn as_integer(&self) -> &Integer {
        &self.0
    }

    /// Converts the value into its integer.
    pub fn into_integer(self) -> Integer {
        self.0
    }
}

impl Universal for Enumerated {
    const TAG: Tag = Tag::ENUMERATED;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        Integer::decode_content(triplet.value(), Self::TAG, mode).map(
            Enumerated
        )
    }

    fn content_len(&self) -> usize {
        self.0.content_len()
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        self.0.write_content(target)
    }
}

impl From<Integer> for Enumerated {
    fn from(value: Integer) -> Self {
        Enumerated(value)
    }
}

impl From<Enumerated> for Integer {
    fn from(value: Enumerated) -> Self {
        value.0
    }
}

impl From<i32> for Enumerated {
    fn from(value: i32) -> Self {
        Enumerated(value.into())
    }
}

impl From<u32> for Enumerated {
    fn from(value: u32) -> Self {
        Enumerated(value.into())
    }
}

impl fmt::Display for Enumerated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Enumerated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Enumerated({})", self.0)
    }
}


//------------ OverflowError -------------------------------------------------

/// An integer was too large for the requested built-in type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, thiserror::Error)]
#[error("integer out of range")]
pub struct OverflowError;


//============ Tests =========================================================
