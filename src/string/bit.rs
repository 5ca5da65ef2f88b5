//! BER-encoded bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::decode::{DecodeError, ErrorKind};
use crate::encode::Target;
use crate::mode::Mode;
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::Universal;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// Bit strings are a sequence of bits. Unlike
/// [`OctetString`][crate::string::OctetString]s, they do not need to contain
/// a multiple of eight bits.
///
/// The bits are kept left-aligned: the first bit is the most significant
/// bit of the first octet. Trailing zero bits are not significant. Trailing
/// zero octets are dropped when a value is created and the number of unused
/// bits in the last octet is derived from its trailing zero bits. Thus,
/// a bit string doesn’t remember an explicit length. Interior zero octets
/// are kept, of course.
///
/// The octets are not shifted right by the number of unused bits. The
/// content `03 A8` therefore results in the octet 0xA8 rather than 0x15.
///
/// There are two types of methods for accessing the data in a bit string.
/// Methods starting with `bit` operate on the individual bits while those
/// prefixed with `octet` access entire octets.
///
/// # BER Encoding
///
/// Bit strings are encoded as a primitive value. The first octet of the
/// content contains the number of unused bits in the last octet and the
/// following octets contain the bits with the first bit in the most
/// significant bit of the octet. The number of unused bits must be between
/// 0 and 7 and must be 0 if there are no further octets.
///
/// In BER, the unused bits can have any value. In DER they must be zero.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct BitString {
    /// The bits of the bit string.
    ///
    /// The last octet, if any, is never zero.
    bits: Bytes,
}

impl BitString {
    /// Creates a new bit string from the left-aligned bits.
    ///
    /// Trailing zero octets are removed.
    pub fn new(bits: Bytes) -> Self {
        let len = bits.iter().rposition(|&x| x != 0).map_or(0, |x| x + 1);
        BitString { bits: bits.slice(..len) }
    }

    /// Returns the value of the given bit.
    ///
    /// Bits past the end of the bit string are zero.
    pub fn bit(&self, bit: usize) -> bool {
        match self.bits.get(bit >> 3) {
            Some(octet) => octet & (0x80 >> (bit & 7)) != 0,
            None => false
        }
    }

    /// Returns the number of significant bits in the bit string.
    pub fn bit_len(&self) -> usize {
        (self.bits.len() << 3) - usize::from(self.unused())
    }

    /// Returns the number of unused bits in the last octet.
    pub fn unused(&self) -> u8 {
        match self.bits.last() {
            Some(last) => last.trailing_zeros() as u8,
            None => 0
        }
    }

    /// Returns the number of octets in the bit string.
    pub fn octet_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns a slice of the octets in the bit string.
    pub fn octets(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Returns a bytes value of the octets of the bit string.
    pub fn octet_bytes(&self) -> Bytes {
        self.bits.clone()
    }

    /// Decodes the content octets of a bit string.
    fn from_content(
        content: &Bytes, mode: Mode
    ) -> Result<Self, DecodeError> {
        let Some(&unused) = content.first() else {
            return Err(Self::malformed("empty content", 0))
        };
        if unused > 7 {
            return Err(Self::malformed("unused bits above 7", 0))
        }
        let Some(&last) = content.last().filter(|_| content.len() > 1) else {
            if unused != 0 {
                return Err(Self::malformed("unused bits without content", 0))
            }
            return Ok(BitString::default())
        };

        let mask = (1u8 << unused) - 1;
        if last & mask == 0 {
            return Ok(BitString::new(content.slice(1..)))
        }
        if mode.is_restricted() {
            return Err(Self::malformed(
                "non-zero padding bits in DER", content.len() - 1
            ))
        }
        let mut bits = content[1..].to_vec();
        if let Some(last) = bits.last_mut() {
            *last &= !mask
        }
        Ok(BitString::new(bits.into()))
    }

    fn malformed(reason: &'static str, pos: usize) -> DecodeError {
        DecodeError::new(ErrorKind::malformed(Tag::BIT_STRING, reason), pos)
    }
}


//--- Universal

impl Universal for BitString {
    const TAG: Tag = Tag::BIT_STRING;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        Self::from_content(triplet.value(), mode)
    }

    fn content_len(&self) -> usize {
        self.bits.len() + 1
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&[self.unused()])?;
        target.write_all(self.bits.as_ref())
    }
}


//--- From

impl From<Bytes> for BitString {
    fn from(bits: Bytes) -> Self {
        Self::new(bits)
    }
}

impl From<&'static [u8]> for BitString {
    fn from(bits: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(bits))
    }
}


//============ Tests =========================================================
