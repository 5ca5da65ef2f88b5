//! The decoding mode.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use log::debug;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::triplet::Triplet;
use crate::value::{Universal, Value};


//------------ Mode ----------------------------------------------------------

/// The encoding rules to apply when decoding.
///
/// Basic Encoding Rules allow a sender some freedom in how a value is
/// encoded. Distinguished Encoding Rules remove all of it so that each
/// value has exactly one encoding. When decoding, the mode decides whether
/// the additional DER restrictions are enforced.
///
/// Encoding always produces DER, which is also valid BER.
///
/// Indefinite length values, and thus CER, are not supported in either
/// mode.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Basic Encoding Rules.
    ///
    /// Non-minimal length octets and integers are accepted, any non-zero
    /// octet is a true BOOLEAN, and padding bits of a BIT STRING are
    /// ignored.
    #[default]
    Ber,

    /// Distinguished Encoding Rules.
    ///
    /// Lengths, tags, and integers must be encoded in the minimum number of
    /// octets, BOOLEAN values must be 0x00 or 0xFF, and padding bits of a
    /// BIT STRING must be zero.
    Der,
}

impl Mode {
    /// Returns whether the DER restrictions apply.
    pub fn is_restricted(self) -> bool {
        matches!(self, Mode::Der)
    }

    /// Decodes the value at the start of the data as any registered type.
    ///
    /// The tag of the first value in the data is looked up in the
    /// [registry][crate::Registry] and the value handed to the decoder found
    /// there. Octets following the value are ignored. Use
    /// [`decode_any_exact`][Self::decode_any_exact] to reject them.
    pub fn decode_any(
        self, data: impl AsRef<[u8]>
    ) -> Result<Value, DecodeError> {
        let triplet = self.take_first(data.as_ref(), false)?;
        self.dispatch(triplet)
    }

    /// Decodes the value at the start of the data as type `U`.
    ///
    /// The value must have the canonical tag of `U`. A value with any other
    /// tag results in a tag mismatch error even if it could be decoded as
    /// some other type. Octets following the value are ignored. Use
    /// [`decode_exact`][Self::decode_exact] to reject them.
    pub fn decode_as<U: Universal>(
        self, data: impl AsRef<[u8]>
    ) -> Result<U, DecodeError> {
        let triplet = self.take_first(data.as_ref(), false)?;
        self.decode_triplet(triplet)
    }

    /// Decodes data holding exactly one value of any registered type.
    ///
    /// Like [`decode_any`][Self::decode_any] but fails with a trailing data
    /// error if anything follows the value.
    pub fn decode_any_exact(
        self, data: impl AsRef<[u8]>
    ) -> Result<Value, DecodeError> {
        let triplet = self.take_first(data.as_ref(), true)?;
        self.dispatch(triplet)
    }

    /// Decodes data holding exactly one value of type `U`.
    ///
    /// Like [`decode_as`][Self::decode_as] but fails with a trailing data
    /// error if anything follows the value.
    pub fn decode_exact<U: Universal>(
        self, data: impl AsRef<[u8]>
    ) -> Result<U, DecodeError> {
        let triplet = self.take_first(data.as_ref(), true)?;
        self.decode_triplet(triplet)
    }

    fn dispatch(self, triplet: Triplet) -> Result<Value, DecodeError> {
        triplet.decode(self).map_err(|err| {
            debug!("failed to decode value: {}", err);
            err
        })
    }

    fn decode_triplet<U: Universal>(
        self, triplet: Triplet
    ) -> Result<U, DecodeError> {
        triplet.decode_as(self).map_err(|err| {
            debug!("failed to decode {}: {}", U::TAG, err);
            err
        })
    }

    /// Parses the first triplet from the data.
    ///
    /// If `exact` is true, the triplet must cover all of the data.
    fn take_first(
        self, data: &[u8], exact: bool
    ) -> Result<Triplet, DecodeError> {
        let mut source = Source::new(Bytes::copy_from_slice(data), self);
        let triplet = Triplet::take_from(&mut source)?;
        if !source.is_exhausted() {
            debug!(
                "{} octets of trailing data after {} value",
                source.remaining().len(), triplet.tag()
            );
            if exact {
                return Err(source.err(ErrorKind::TrailingData))
            }
        }
        Ok(triplet)
    }
}


//------------ decode_any, decode_as -----------------------------------------

/// Decodes the value at the start of the data in BER mode.
///
/// This is a shortcut for `Mode::Ber.decode_any(data)`.
pub fn decode_any(data: impl AsRef<[u8]>) -> Result<Value, DecodeError> {
    Mode::Ber.decode_any(data)
}

/// Decodes the value at the start of the data as type `U` in BER mode.
///
/// This is a shortcut for `Mode::Ber.decode_as::<U>(data)`.
pub fn decode_as<U: Universal>(
    data: impl AsRef<[u8]>
) -> Result<U, DecodeError> {
    Mode::Ber.decode_as(data)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::int::Integer;
    use crate::tag::Tag;
    use crate::test::assert_kind;

    #[test]
    fn trailing_data() {
        // Whatever follows the first value is ignored.
        assert_eq!(
            Mode::Ber.decode_any(b"\x01\x01\xFF\x00").unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            Mode::Der.decode_as::<Integer>(b"\x02\x01\x05\x00").unwrap(),
            Integer::from(5)
        );
        assert_eq!(
            crate::decode_as::<Integer>(b"\x02\x01\x05\x02\x01").unwrap(),
            Integer::from(5)
        );

        // Unless asked for exactly one value.
        let err = Mode::Ber.decode_any_exact(b"\x01\x01\xFF\x00").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TrailingData);
        assert_eq!(err.pos().as_usize(), 3);
        assert_kind(
            Mode::Der.decode_exact::<Integer>(b"\x02\x01\x05\x00"),
            ErrorKind::TrailingData
        );
        assert_eq!(
            Mode::Der.decode_exact::<Integer>(b"\x02\x01\x05").unwrap(),
            Integer::from(5)
        );
    }

    #[test]
    fn empty_input() {
        assert_kind(Mode::Ber.decode_any(b""), ErrorKind::TruncatedInput);
    }

    #[test]
    fn restrictions_depend_on_mode() {
        // Non-minimal length octets.
        assert_eq!(
            Mode::Ber.decode_as::<Integer>(b"\x02\x81\x01\x05").unwrap(),
            Integer::from(5)
        );
        assert_kind(
            Mode::Der.decode_as::<Integer>(b"\x02\x81\x01\x05"),
            ErrorKind::MalformedLength("non-minimal length in DER")
        );

        // Non-minimal integer.
        assert_eq!(
            Mode::Ber.decode_as::<Integer>(b"\x02\x02\x00\x05").unwrap(),
            Integer::from(5)
        );
        assert_kind(
            Mode::Der.decode_as::<Integer>(b"\x02\x02\x00\x05"),
            ErrorKind::malformed(Tag::INTEGER, "non-minimal integer in DER")
        );
    }

    #[test]
    fn default_is_ber() {
        assert_eq!(Mode::default(), Mode::Ber);
        assert!(!Mode::Ber.is_restricted());
        assert!(Mode::Der.is_restricted());
    }
}
