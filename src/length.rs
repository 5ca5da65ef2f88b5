//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is not
//! publicly exposed.

use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::encode::Target;


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// Only definite lengths are supported, so a length is simply the number of
/// content octets.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the length. Thus, if the first octet is less than
/// 128, it provides the length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length in big-endian order. A first octet of 0x80 signals the indefinite
/// form which we reject. A first octet of 0xFF is reserved.
///
/// Under DER rules, the length must be encoded in the minimum number of
/// octets. Encoding always produces this form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Length(usize);

impl Length {
    /// The number of octets of a `usize`.
    const USIZE_LEN: usize = usize::BITS as usize / 8;

    /// Creates a new length.
    pub fn new(len: usize) -> Self {
        Length(len)
    }

    /// Returns the length as a `usize`.
    pub fn to_usize(self) -> usize {
        self.0
    }

    /// Takes the length octets from the beginning of a source.
    pub fn take_from(source: &mut Source) -> Result<Self, DecodeError> {
        let pos = source.pos();
        let first = source.peek_u8()?;
        let count = match first {
            n if n & 0x80 == 0 => {
                source.take_u8()?;
                return Ok(Length(usize::from(n)))
            }
            0x80 => {
                return Err(source.err(ErrorKind::MalformedLength(
                    "indefinite length not supported"
                )))
            }
            0xFF => {
                return Err(source.err(ErrorKind::MalformedLength(
                    "reserved length octet"
                )))
            }
            n => usize::from(n & 0x7F)
        };

        let octets = source.remaining();
        let Some(octets) = octets.get(1..count + 1) else {
            return Err(DecodeError::new(
                ErrorKind::TruncatedInput, pos.as_usize() + octets.len()
            ))
        };
        if source.mode().is_restricted() {
            // The first subsequent octet can’t be zero and it can’t be less
            // than 0x80 if it is the only one as there would be a shorter
            // encoding in both cases.
            if octets[0] == 0 || (count == 1 && octets[0] < 0x80) {
                return Err(source.err(ErrorKind::MalformedLength(
                    "non-minimal length in DER"
                )))
            }
        }

        let start = octets.iter().position(|&x| x != 0).unwrap_or(count);
        let significant = &octets[start..];
        if significant.len() > Self::USIZE_LEN {
            return Err(source.err(
                ErrorKind::MalformedLength("excessive length")
            ))
        }
        let res = significant.iter().fold(0usize, |res, &octet| {
            res << 8 | usize::from(octet)
        });
        source.take_bytes(count + 1)?;
        Ok(Length(res))
    }

    /// Returns the length of the encoded representation of the value.
    pub fn encoded_len(self) -> usize {
        if self.0 > 0x7F {
            self.significant_len() + 1
        }
        else {
            1
        }
    }

    /// Returns the length octets.
    pub fn to_encoded(self) -> SmallVec<[u8; 9]> {
        let mut res = SmallVec::new();
        if self.0 > 0x7F {
            let len = self.significant_len();

            // A usize has far less than 127 octets so this fits.
            res.push(len as u8 | 0x80);
            res.extend_from_slice(
                &self.0.to_be_bytes()[Self::USIZE_LEN - len..]
            );
        }
        else {
            res.push(self.0 as u8)
        }
        res
    }

    /// Writes the encoded length to the target.
    pub fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&self.to_encoded())
    }

    /// Returns the number of octets without leading zeros.
    fn significant_len(self) -> usize {
        Self::USIZE_LEN - (self.0.leading_zeros() / 8) as usize
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> usize {
        len.0
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use bytes::Bytes;
    use crate::mode::Mode;
    use super::*;

    fn take_from(
        src: &[u8], mode: Mode
    ) -> Result<usize, DecodeError> {
        let mut source = Source::new(Bytes::copy_from_slice(src), mode);
        let res = Length::take_from(&mut source)?;
        source.check_exhausted()?;
        Ok(res.to_usize())
    }

    fn malformed(src: &[u8], mode: Mode) -> bool {
        matches!(
            take_from(src, mode).unwrap_err().kind(),
            ErrorKind::MalformedLength(_)
        )
    }

    #[test]
    fn ber_take_from() {
        assert_eq!(take_from(b"\x00", Mode::Ber).unwrap(), 0x00);
        assert_eq!(take_from(b"\x12", Mode::Ber).unwrap(), 0x12);
        assert_eq!(take_from(b"\x7f", Mode::Ber).unwrap(), 0x7f);
        assert_eq!(take_from(b"\x81\x00", Mode::Ber).unwrap(), 0);
        assert_eq!(take_from(b"\x81\x05", Mode::Ber).unwrap(), 5);
        assert_eq!(take_from(b"\x81\xF0", Mode::Ber).unwrap(), 0xF0);
        assert_eq!(take_from(b"\x82\x00\x00", Mode::Ber).unwrap(), 0);
        assert_eq!(take_from(b"\x82\xF0\x0E", Mode::Ber).unwrap(), 0xF00E);
        assert_eq!(take_from(b"\x82\x00\x0E", Mode::Ber).unwrap(), 0x0E);
        assert_eq!(
            take_from(
                b"\x8A\x00\x00\x00\x00\x00\x00\x00\x00\x01\x00", Mode::Ber
            ).unwrap(),
            0x100
        );
        assert!(malformed(b"\x80", Mode::Ber));
        assert!(malformed(b"\xFF", Mode::Ber));
    }

    #[test]
    fn der_take_from() {
        assert_eq!(take_from(b"\x00", Mode::Der).unwrap(), 0x00);
        assert_eq!(take_from(b"\x12", Mode::Der).unwrap(), 0x12);
        assert_eq!(take_from(b"\x7f", Mode::Der).unwrap(), 0x7f);
        assert!(malformed(b"\x80", Mode::Der));
        assert!(malformed(b"\x81\x00", Mode::Der));
        assert!(malformed(b"\x81\x7f", Mode::Der));
        assert_eq!(take_from(b"\x81\x80", Mode::Der).unwrap(), 0x80);
        assert_eq!(take_from(b"\x81\xF0", Mode::Der).unwrap(), 0xF0);
        assert!(malformed(b"\x82\x00\x00", Mode::Der));
        assert_eq!(take_from(b"\x82\xF0\x0E", Mode::Der).unwrap(), 0xF00E);
        assert!(malformed(b"\x82\x00\x0E", Mode::Der));
        assert!(malformed(b"\xFF", Mode::Der));
    }

    #[test]
    fn excessive() {
        assert_eq!(
            take_from(
                b"\x89\x01\x00\x00\x00\x00\x00\x00\x00\x00", Mode::Ber
            ).unwrap_err().kind(),
            &ErrorKind::MalformedLength("excessive length")
        );
    }

    #[test]
    fn truncated() {
        let err = take_from(b"\x82\x01", Mode::Ber).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput);
        assert_eq!(err.pos().as_usize(), 2);
        assert_eq!(
            take_from(b"", Mode::Ber).unwrap_err().kind(),
            &ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn encode() {
        fn step(len: usize, encoded: &[u8]) {
            let len = Length::new(len);
            assert_eq!(len.to_encoded().as_slice(), encoded);
            assert_eq!(len.encoded_len(), encoded.len());
            let mut target = Vec::new();
            crate::encode::infallible(len.write_encoded(&mut target));
            assert_eq!(target, encoded);
            assert_eq!(
                take_from(encoded, Mode::Der).unwrap(), len.to_usize(),
                "decoding {:?}", encoded
            );
            assert_eq!(take_from(encoded, Mode::Ber).unwrap(), len.to_usize());
        }

        step(0, b"\x00");
        step(127, b"\x7F");
        step(128, b"\x81\x80");
        step(200, b"\x81\xC8");
        step(255, b"\x81\xFF");
        step(256, b"\x82\x01\x00");
        step(65535, b"\x82\xFF\xFF");
        step(65536, b"\x83\x01\x00\x00");
    }
}
