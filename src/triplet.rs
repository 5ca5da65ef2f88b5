//! A single encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use log::trace;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::encode::{Target, Values, total_encoded_len, write_header};
use crate::length::Length;
use crate::mode::Mode;
use crate::registry::Registry;
use crate::tag::Tag;
use crate::value::{Universal, Value};


//------------ Triplet -------------------------------------------------------

/// The tag and content octets of an encoded value.
///
/// A triplet is what is left of a value after the identifier and length
/// octets have been parsed: the [`Tag`] and the raw content. The length is
/// implied by the content.
///
/// Triplets are the intermediate step between encoded data and the typed
/// universal values. They can be decoded further via [`decode`] which looks
/// up the decoder for the tag in the [`Registry`] or, if the expected type
/// is known, via [`decode_as`].
///
/// [`decode`]: Triplet::decode
/// [`decode_as`]: Triplet::decode_as
#[derive(Clone, Eq, PartialEq)]
pub struct Triplet {
    tag: Tag,
    value: Bytes,
}

impl Triplet {
    /// Creates a new triplet from a tag and content octets.
    pub fn new(tag: Tag, value: Bytes) -> Self {
        Triplet { tag, value }
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the content octets of the value.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Converts the triplet into its tag and content octets.
    pub fn into_parts(self) -> (Tag, Bytes) {
        (self.tag, self.value)
    }

    /// Takes a single triplet from the beginning of a source.
    ///
    /// If the length octets claim more content than is left in the
    /// source, returns a truncated input error.
    pub fn take_from(source: &mut Source) -> Result<Self, DecodeError> {
        let tag = Tag::take_from(source)?;
        let len = Length::take_from(source)?.to_usize();
        let value = source.take_bytes(len)?;
        Ok(Triplet { tag, value })
    }

    /// Parses a triplet from the beginning of some data.
    ///
    /// Returns the triplet and the number of octets it occupied. Any data
    /// after it is left alone.
    pub fn from_bytes(
        data: Bytes, mode: Mode
    ) -> Result<(Self, usize), DecodeError> {
        let mut source = Source::new(data, mode);
        let res = Self::take_from(&mut source)?;
        Ok((res, source.pos().as_usize()))
    }

    /// Decodes the content with the decoder registered for the tag.
    ///
    /// Returns an unknown tag error if there is no such decoder.
    pub fn decode(&self, mode: Mode) -> Result<Value, DecodeError> {
        let decoder = match Registry::global().get(&self.tag) {
            Some(decoder) => decoder,
            None => {
                trace!("no decoder for tag {}", self.tag);
                return Err(DecodeError::new(
                    ErrorKind::UnknownTag(self.tag.clone()), 0usize
                ))
            }
        };
        decoder(self, mode)
    }

    /// Decodes the content as a value of the given type.
    ///
    /// The tag must be the type’s canonical tag. Otherwise, a tag mismatch
    /// error is returned.
    pub fn decode_as<U: Universal>(
        &self, mode: Mode
    ) -> Result<U, DecodeError> {
        if self.tag != U::TAG {
            return Err(DecodeError::new(
                ErrorKind::TagMismatch {
                    expected: U::TAG,
                    found: self.tag.clone(),
                },
                0usize
            ))
        }
        U::decode_value(self, mode)
    }

    /// Returns the length of the complete encoding of the triplet.
    pub fn encoded_len(&self) -> usize {
        total_encoded_len(&self.tag, self.value.len())
    }
}


//--- Values

impl Values for Triplet {
    fn encoded_len(&self) -> usize {
        Triplet::encoded_len(self)
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, &self.tag, self.value.len())?;
        target.write_all(self.value.as_ref())
    }
}


//--- Debug

impl fmt::Debug for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Triplet")
            .field("tag", &self.tag)
            .field("value", &self.value.as_ref())
            .finish()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::int::Integer;
    use crate::tag::{Class, Form};

    #[test]
    fn from_bytes() {
        let (triplet, len) = Triplet::from_bytes(
            Bytes::from_static(b"\x02\x01\x05\x01\x01\xFF"), Mode::Ber
        ).unwrap();
        assert_eq!(len, 3);
        assert_eq!(triplet.tag(), &Tag::INTEGER);
        assert_eq!(triplet.value().as_ref(), b"\x05");
        assert_eq!(triplet.to_vec(), b"\x02\x01\x05");
        assert_eq!(triplet.encoded_len(), 3);
    }

    #[test]
    fn long_tags_and_lengths() {
        let mut data = b"\x9F\x81\x00\x81\xC8".to_vec();
        data.extend_from_slice(&[0xAB; 200]);
        let (triplet, len) = Triplet::from_bytes(
            Bytes::from(data.clone()), Mode::Der
        ).unwrap();
        assert_eq!(len, 205);
        assert_eq!(
            triplet.tag(),
            &Tag::new(Class::Context, Form::Primitive, 128)
        );
        assert_eq!(triplet.value().len(), 200);
        assert_eq!(triplet.to_vec(), data);
    }

    #[test]
    fn truncated_content() {
        let err = Triplet::from_bytes(
            Bytes::from_static(b"\x04\x05\x01\x02"), Mode::Ber
        ).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput);
        assert_eq!(err.pos().as_usize(), 2);
    }

    #[test]
    fn decode() {
        let triplet = Triplet::new(Tag::INTEGER, Bytes::from_static(b"\x05"));
        assert_eq!(
            triplet.decode(Mode::Ber).unwrap(),
            Value::Integer(Integer::from(5))
        );
        assert_eq!(
            triplet.decode_as::<Integer>(Mode::Der).unwrap(),
            Integer::from(5)
        );
        assert_eq!(
            triplet.decode_as::<bool>(Mode::Ber).unwrap_err().kind(),
            &ErrorKind::TagMismatch {
                expected: Tag::BOOLEAN, found: Tag::INTEGER
            }
        );

        let unknown = Triplet::new(Tag::ctx(0), Bytes::new());
        assert_eq!(
            unknown.decode(Mode::Ber).unwrap_err().kind(),
            &ErrorKind::UnknownTag(Tag::ctx(0))
        );
    }
}
