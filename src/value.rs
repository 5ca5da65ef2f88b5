//! Universal types and decoded values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::decode::{DecodeError, ErrorKind};
use crate::encode::{Encoder, Target, Values, infallible};
use crate::int::{Enumerated, Integer};
use crate::mode::Mode;
use crate::oid::Oid;
use crate::sequence::{Sequence, SequenceOf};
use crate::string::{BitString, OctetString};
use crate::tag::Tag;
use crate::triplet::Triplet;


//------------ Universal -----------------------------------------------------

/// A type with a canonical universal tag.
///
/// Types implementing this trait know their tag and how to convert between
/// themselves and the content octets of a value with that tag. The
/// identifier and length octets are dealt with generically by
/// [`Triplet`] and [`Encoder`].
pub trait Universal: Sized {
    /// The canonical tag of the type.
    const TAG: Tag;

    /// Decodes a value from the content of a triplet.
    ///
    /// The tag of the triplet is not checked. Error positions are relative
    /// to the start of the content octets.
    fn decode_value(triplet: &Triplet, mode: Mode) -> Result<Self, DecodeError>;

    /// Returns the number of content octets of the value.
    fn content_len(&self) -> usize;

    /// Writes the content octets of the value to a target.
    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error>;


    //--- Provided methods

    /// Returns an encoder for the complete value.
    fn encode(&self) -> Encoder<'_, Self> {
        Encoder::new(self)
    }

    /// Converts the value into a triplet with the canonical tag.
    fn to_triplet(&self) -> Triplet {
        let mut content = Vec::with_capacity(self.content_len());
        infallible(self.write_content(&mut content));
        Triplet::new(Self::TAG, content.into())
    }

    /// Returns the complete encoding of the value.
    fn to_vec(&self) -> Vec<u8> {
        Values::to_vec(&self.encode())
    }
}


//------------ bool ----------------------------------------------------------

/// BOOLEAN values.
///
/// The content is a single octet. Zero is false, anything else true. DER
/// only allows 0xFF for true. That is also what is produced when encoding.
impl Universal for bool {
    const TAG: Tag = Tag::BOOLEAN;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        let &[octet] = &triplet.value()[..] else {
            return Err(DecodeError::new(
                ErrorKind::malformed(Tag::BOOLEAN, "content is not one octet"),
                0usize
            ))
        };
        match octet {
            0 => Ok(false),
            0xFF => Ok(true),
            _ if mode.is_restricted() => {
                Err(DecodeError::new(
                    ErrorKind::malformed(
                        Tag::BOOLEAN, "true must be 0xFF in DER"
                    ),
                    0usize
                ))
            }
            _ => Ok(true)
        }
    }

    fn content_len(&self) -> usize {
        1
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(if *self { b"\xFF" } else { b"\x00" })
    }
}


//------------ Value ---------------------------------------------------------

/// A decoded value of any of the supported universal types.
///
/// This is what [`decode_any`][crate::decode_any] returns. Each variant
/// carries the typed payload and implies the tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(Integer),
    Enumerated(Enumerated),
    OctetString(OctetString),
    BitString(BitString),
    ObjectIdentifier(Oid),
    Sequence(Sequence),
    SequenceOf(SequenceOf),
}

impl Value {
    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Boolean(_) => bool::TAG,
            Value::Integer(_) => Integer::TAG,
            Value::Enumerated(_) => Enumerated::TAG,
            Value::OctetString(_) => OctetString::TAG,
            Value::BitString(_) => BitString::TAG,
            Value::ObjectIdentifier(_) => Oid::TAG,
            Value::Sequence(_) => Sequence::TAG,
            Value::SequenceOf(_) => SequenceOf::TAG,
        }
    }

    /// Converts the value into a triplet.
    pub fn to_triplet(&self) -> Triplet {
        match self {
            Value::Boolean(inner) => inner.to_triplet(),
            Value::Integer(inner) => inner.to_triplet(),
            Value::Enumerated(inner) => inner.to_triplet(),
            Value::OctetString(inner) => inner.to_triplet(),
            Value::BitString(inner) => inner.to_triplet(),
            Value::ObjectIdentifier(inner) => inner.to_triplet(),
            Value::Sequence(inner) => inner.to_triplet(),
            Value::SequenceOf(inner) => inner.to_triplet(),
        }
    }
}


//--- From

macro_rules! from_payload {
    ( $( $variant:ident($type:ty), )* ) => {
        $(
            impl From<$type> for Value {
                fn from(src: $type) -> Self {
                    Value::$variant(src)
                }
            }
        )*
    }
}

from_payload! {
    Boolean(bool),
    Integer(Integer),
    Enumerated(Enumerated),
    OctetString(OctetString),
    BitString(BitString),
    ObjectIdentifier(Oid),
    Sequence(Sequence),
    SequenceOf(SequenceOf),
}


//--- Values

impl Values for Value {
    fn encoded_len(&self) -> usize {
        match self {
            Value::Boolean(inner) => inner.encode().encoded_len(),
            Value::Integer(inner) => inner.encode().encoded_len(),
            Value::Enumerated(inner) => inner.encode().encoded_len(),
            Value::OctetString(inner) => inner.encode().encoded_len(),
            Value::BitString(inner) => inner.encode().encoded_len(),
            Value::ObjectIdentifier(inner) => inner.encode().encoded_len(),
            Value::Sequence(inner) => inner.encode().encoded_len(),
            Value::SequenceOf(inner) => inner.encode().encoded_len(),
        }
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        match self {
            Value::Boolean(inner) => inner.encode().write_encoded(target),
            Value::Integer(inner) => inner.encode().write_encoded(target),
            Value::Enumerated(inner) => inner.encode().write_encoded(target),
            Value::OctetString(inner) => inner.encode().write_encoded(target),
            Value::BitString(inner) => inner.encode().write_encoded(target),
            Value::ObjectIdentifier(inner) => {
                inner.encode().write_encoded(target)
            }
            Value::Sequence(inner) => inner.encode().write_encoded(target),
            Value::SequenceOf(inner) => inner.encode().write_encoded(target),
        }
    }
}


//============ Tests =========================================================
