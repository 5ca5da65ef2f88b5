//! Everything related to the `Values` trait.
//!
//! This is an internal module. The relevant items are re-exported by the
//! parent.

use bytes::{Bytes, BytesMut};
use crate::length::Length;
use crate::tag::Tag;
use super::target::{Target, infallible};


//------------ Values --------------------------------------------------------

/// A type that is a value encoder.
///
/// Value encoders know how to encode themselves into a sequence of complete
/// BER encoded values, i.e., identifier, length, and content octets each.
/// Since encoding always happens in DER, the encoded length is known
/// up front which allows writing the length octets of an enclosing value
/// before its content.
pub trait Values {
    /// Returns the length of the encoded values.
    fn encoded_len(&self) -> usize;

    /// Encodes the values and writes them to `target`.
    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error>;


    //--- Provided methods

    /// Writes the encoded values into a new vec.
    fn to_vec(&self) -> Vec<u8> {
        let mut target = Vec::with_capacity(self.encoded_len());
        infallible(self.write_encoded(&mut target));
        target
    }

    /// Writes the encoded values into a new bytes value.
    fn to_bytes(&self) -> Bytes {
        let mut target = BytesMut::with_capacity(self.encoded_len());
        infallible(self.write_encoded(&mut target));
        target.freeze()
    }
}


//--- Blanket impls

impl<V: Values + ?Sized> Values for &'_ V {
    fn encoded_len(&self) -> usize {
        (*self).encoded_len()
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        (*self).write_encoded(target)
    }
}

impl<V: Values> Values for [V] {
    fn encoded_len(&self) -> usize {
        self.iter().map(Values::encoded_len).sum()
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        self.iter().try_for_each(|value| value.write_encoded(target))
    }
}


//============ Helper functions ==============================================

/// Returns the length of a value with the given tag and content length.
pub fn total_encoded_len(tag: &Tag, content_len: usize) -> usize {
    tag.encoded_len() + Length::new(content_len).encoded_len() + content_len
}

/// Writes the identifier and length octets for a value.
pub fn write_header<T: Target>(
    target: &mut T, tag: &Tag, content_len: usize
) -> Result<(), T::Error> {
    tag.write_encoded(target)?;
    Length::new(content_len).write_encoded(target)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::triplet::Triplet;

    #[test]
    fn header() {
        let mut target = Vec::new();
        infallible(write_header(&mut target, &Tag::OCTET_STRING, 200));
        assert_eq!(target, b"\x04\x81\xC8");
        assert_eq!(total_encoded_len(&Tag::OCTET_STRING, 200), 203);
        assert_eq!(total_encoded_len(&Tag::SEQUENCE, 0), 2);
    }

    #[test]
    fn slices_concatenate() {
        let values = [
            Triplet::new(Tag::BOOLEAN, Bytes::from_static(b"\xFF")),
            Triplet::new(Tag::INTEGER, Bytes::from_static(b"\x05")),
        ];
        let values = &values[..];
        assert_eq!(Values::encoded_len(values), 6);
        assert_eq!(Values::to_vec(values), b"\x01\x01\xFF\x02\x01\x05");
        assert_eq!(
            values.to_bytes().as_ref(), b"\x01\x01\xFF\x02\x01\x05"
        );
    }
}
