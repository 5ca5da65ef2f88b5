//! A BER-encoded OCTET STRING.
//!
//! This is an internal module. It’s public types are re-exported by the
//! parent.

use std::ops;
use bytes::Bytes;
use crate::decode::DecodeError;
use crate::encode::Target;
use crate::mode::Mode;
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::Universal;


//------------ OctetString ---------------------------------------------------

/// An octet string value.
///
/// An octet string is a sequence of octets, i.e., a glorified `[u8]`. The
/// type wraps a `Bytes` value so that decoding an octet string doesn’t need
/// to copy the content.
///
/// Octet strings are sometimes used to store BER encoded data. The octets
/// can be handed to [`decode_any`][crate::decode_any] for that.
///
/// # BER Encoding
///
/// Octet strings are encoded as a primitive value with the content octets
/// being the string’s octets. The constructed form BER allows for large
/// strings is not supported. Its tag differs in the form, so such a value
/// is reported as an unknown tag.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct OctetString(Bytes);

impl OctetString {
    /// Creates an octet string from a Bytes value.
    pub fn new(bytes: Bytes) -> Self {
        OctetString(bytes)
    }

    /// Returns a slice of the octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns a reference to the underlying bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Converts the octet string into the underlying bytes value.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the number of octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the octet string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}


//--- Universal

impl Universal for OctetString {
    const TAG: Tag = Tag::OCTET_STRING;

    fn decode_value(
        triplet: &Triplet, _mode: Mode
    ) -> Result<Self, DecodeError> {
        Ok(OctetString(triplet.value().clone()))
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


//--- From, Deref, AsRef

impl From<Bytes> for OctetString {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(vec: Vec<u8>) -> Self {
        Self::new(vec.into())
    }
}

impl From<&'static [u8]> for OctetString {
    fn from(slice: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(slice))
    }
}

impl ops::Deref for OctetString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//============ Tests =========================================================
