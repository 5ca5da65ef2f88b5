//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ANS.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{fmt, str};
use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind};
use crate::encode::Target;
use crate::mode::Mode;
use crate::number::Number;
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::Universal;
use crate::varint;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.3.6.1.5.5.7.1’. These
/// integers are called arcs.
///
/// Values of this type keep the arcs. There are at least two of them, the
/// first one is 0, 1, or 2, and if it is 0 or 1, the second one is less than
/// 40. Arcs can be arbitrarily large.
///
/// An object identifier can be created from its arcs via [`new`] or
/// [`from_u32s`], or parsed from the dotted notation via `FromStr`.
/// `Display` produces the dotted notation.
///
/// [`new`]: Oid::new
/// [`from_u32s`]: Oid::from_u32s
///
/// # BER Encoding
///
/// Object identifiers are encoded as a primitive value. The content is a
/// sequence of subidentifiers, each encoded in base 128 with as few digits
/// as possible and bit 8 set in all but the last octet. The first two arcs
/// are combined into the first subidentifier as `40 * first + second`. This
/// is unambiguous: a first subidentifier of 80 or more always means a first
/// arc of 2.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Oid {
    arcs: Vec<Number>,
}

impl Oid {
    /// Creates an object identifier from its arcs.
    pub fn new(arcs: Vec<Number>) -> Result<Self, InvalidOid> {
        let [first, second, ..] = arcs.as_slice() else {
            return Err(InvalidOid::TooFewArcs)
        };
        match first.to_u32() {
            Some(0) | Some(1) => {
                if *second >= Number::from(40u8) {
                    return Err(InvalidOid::SecondArcOutOfRange)
                }
            }
            Some(2) => { }
            _ => return Err(InvalidOid::FirstArcOutOfRange)
        }
        Ok(Oid { arcs })
    }

    /// Creates an object identifier from arcs given as `u32`s.
    pub fn from_u32s(arcs: &[u32]) -> Result<Self, InvalidOid> {
        Self::new(arcs.iter().copied().map(Number::from).collect())
    }

    /// Returns the arcs of the object identifier.
    pub fn arcs(&self) -> &[Number] {
        &self.arcs
    }

    /// Parses the content octets of an object identifier value.
    ///
    /// Error positions are relative to the start of `content`.
    pub fn from_content(content: &[u8]) -> Result<Self, DecodeError> {
        if content.is_empty() {
            return Err(DecodeError::new(
                ErrorKind::malformed(Tag::OID, "empty content"), 0usize
            ))
        }
        let mut arcs = Vec::new();
        let mut pos = 0;
        while pos < content.len() {
            // X.690, 8.19.2: subidentifiers use the minimum number of octets.
            if content[pos] == 0x80 {
                return Err(DecodeError::new(
                    ErrorKind::malformed(Tag::OID, "non-minimal subidentifier"),
                    pos
                ))
            }
            let (arc, len) = varint::decode(&content[pos..]).map_err(|err| {
                err.offset_by(pos)
            })?;
            if arcs.is_empty() {
                let (first, second) = Self::split_first(arc);
                arcs.push(first);
                arcs.push(second);
            }
            else {
                arcs.push(arc);
            }
            pos += len;
        }
        Ok(Oid { arcs })
    }

    /// Returns the content octets of an object identifier value.
    pub fn to_content(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.content_len());
        for arc in self.subidentifiers() {
            res.extend_from_slice(&varint::encode(&arc));
        }
        res
    }

    /// Splits the first subidentifier into the first two arcs.
    fn split_first(subid: Number) -> (Number, Number) {
        match subid.checked_sub(80) {
            Some(second) => (Number::from(2u8), second),
            None => match subid.checked_sub(40) {
                Some(second) => (Number::from(1u8), second),
                None => (Number::ZERO, subid),
            }
        }
    }

    /// Returns an iterator over the subidentifiers.
    fn subidentifiers(&self) -> impl Iterator<Item = Number> + '_ {
        // new guarantees at least two arcs and that the first is small.
        let first = self.arcs[0].to_u32().unwrap_or(2);
        let combined = self.arcs[1].mul_add(1, 40 * first);
        std::iter::once(combined).chain(self.arcs[2..].iter().cloned())
    }
}


//--- Universal

impl Universal for Oid {
    const TAG: Tag = Tag::OID;

    fn decode_value(
        triplet: &Triplet, _mode: Mode
    ) -> Result<Self, DecodeError> {
        Self::from_content(triplet.value())
    }

    fn content_len(&self) -> usize {
        self.subidentifiers().map(|arc| varint::encoded_len(&arc)).sum()
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        self.subidentifiers().try_for_each(|arc| {
            varint::write_encoded(&arc, target)
        })
    }
}


//--- FromStr

impl str::FromStr for Oid {
    type Err = InvalidOid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s.split('.').map(|arc| {
            arc.parse::<Number>().map_err(|_| InvalidOid::InvalidArc)
        }).collect::<Result<SmallVec<[Number; 12]>, _>>()?;
        Self::new(arcs.into_vec())
    }
}


//--- Display and Debug

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
        }
        for arc in arcs {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}


//------------ InvalidOid ----------------------------------------------------

/// An object identifier could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidOid {
    #[error("object identifier needs at least two arcs")]
    TooFewArcs,

    #[error("invalid arc in object identifier")]
    InvalidArc,

    #[error("first arc of object identifier must be 0, 1, or 2")]
    FirstArcOutOfRange,

    #[error("second arc of object identifier must be less than 40")]
    SecondArcOutOfRange,
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use crate::test::assert_kind;

    #[test]
    fn encode_decode() {
        fn step(s: &str, encoded: &[u8]) {
            let oid = Oid::from_str(s).unwrap();
            assert_eq!(oid.to_string(), s);
            assert_eq!(oid.to_vec(), encoded, "encoding {}", s);
            assert_eq!(oid.to_content().as_slice(), &encoded[2..]);
            let decoded = Mode::Der.decode_as::<Oid>(encoded).unwrap();
            assert_eq!(decoded, oid);
            assert_eq!(decoded.to_string(), s);
        }

        step("2.999.3", b"\x06\x03\x88\x37\x03");
        step(
            "1.2.840.113549.1.1.11",
            b"\x06\x09\x2A\x86\x48\x86\xF7\x0D\x01\x01\x0B"
        );
        step("0.0", b"\x06\x01\x00");
        step("0.39", b"\x06\x01\x27");
        step("1.0", b"\x06\x01\x28");
        step("2.0", b"\x06\x01\x50");
        step("2.47", b"\x06\x01\x7F");
        step("2.48", b"\x06\x02\x81\x00");
        step(
            "2.25.329800735698586629295641978511506172918",
            b"\x06\x14\x69\x83\xF0\x9D\xA7\xEB\xCF\xDE\xE0\xC7\
              \xA1\xA7\xB2\xC0\x94\x8C\xC8\xF9\xD7\x76"
        );
    }

    #[test]
    fn arcs() {
        let oid = Oid::from_u32s(&[1, 3, 6, 1, 5, 5, 7, 1]).unwrap();
        assert_eq!(oid.arcs().len(), 8);
        assert_eq!(oid.arcs()[2], Number::from(6u8));
        assert_eq!(oid, "1.3.6.1.5.5.7.1".parse().unwrap());
        assert_eq!(format!("{:?}", oid), "Oid(1.3.6.1.5.5.7.1)");
    }

    #[test]
    fn invalid() {
        assert_eq!(Oid::from_str("1"), Err(InvalidOid::TooFewArcs));
        assert_eq!(Oid::from_str(""), Err(InvalidOid::InvalidArc));
        assert_eq!(Oid::from_str("1..2"), Err(InvalidOid::InvalidArc));
        assert_eq!(Oid::from_str("1.2.x"), Err(InvalidOid::InvalidArc));
        assert_eq!(Oid::from_str("1.-2"), Err(InvalidOid::InvalidArc));
        assert_eq!(Oid::from_str("3.1"), Err(InvalidOid::FirstArcOutOfRange));
        assert_eq!(
            Oid::from_str("1.40"), Err(InvalidOid::SecondArcOutOfRange)
        );
        assert!(Oid::from_str("2.40").is_ok());
        assert_eq!(Oid::from_u32s(&[]), Err(InvalidOid::TooFewArcs));
    }

    #[test]
    fn long_subidentifier() {
        let mut encoded = vec![0x06, 0x82, 0x9C, 0x41, 0x2A];
        encoded.extend(std::iter::repeat(0xFF).take(39_999));
        encoded.push(0x7F);
        let oid = Mode::Der.decode_as::<Oid>(&encoded).unwrap();
        assert_eq!(oid.arcs().len(), 3);
        assert_eq!(&oid.arcs()[..2], &[Number::from(1u8), Number::from(2u8)]);
        assert_eq!(oid.arcs()[2].bit_len(), 280_000);
        assert_eq!(oid.to_vec(), encoded);
    }

    #[test]
    fn malformed() {
        assert_kind(
            Mode::Ber.decode_as::<Oid>(b"\x06\x00"),
            ErrorKind::malformed(Tag::OID, "empty content")
        );
        assert_kind(
            Mode::Ber.decode_as::<Oid>(b"\x06\x03\x2A\x80\x01"),
            ErrorKind::malformed(Tag::OID, "non-minimal subidentifier")
        );
        let err = Mode::Ber.decode_as::<Oid>(b"\x06\x02\x2A\x86").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput);
        assert_eq!(err.pos().as_usize(), 2);
    }
}
