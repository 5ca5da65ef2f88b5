//! The identifier octets of a BER encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::encode::Target;
use crate::number::Number;
use crate::varint;


//------------ Tag -----------------------------------------------------------

/// The tag of a BER encoded value.
///
/// Each BER encoded value starts with a sequence of one or more octets called
/// the _identifier octets._ They encode the class of the tag, whether the
/// value uses primitive or constructed encoding, and the tag number. Unlike
/// some other implementations, the `Tag` type captures all three. Two tags
/// that only differ in their form are different tags.
///
/// # BER Encoding
///
/// Bits 8 and 7 of the first octet specify the class and bit 6 indicates
/// whether the encoding is constructed. For tag numbers between 0 and 30,
/// bits 5 to 1 give the tag number and the identifier consists of this one
/// octet only.
///
/// For tag numbers 31 and greater, bits 5 to 1 of the first octet are all
/// set and the tag number follows in base 128, most significant digit first,
/// with as few digits as possible and bit 8 of each octet except the last
/// set. The tag number is unbounded.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Tag {
    class: Class,
    form: Form,
    number: Number,
}

/// # Constants for the Universal Tags
///
/// See clause 8.4 of ITU Recommendation X.690.
///
impl Tag {
    /// The mask for checking the class.
    const CLASS_MASK: u8 = 0xc0;

    /// The mask for checking whether the value is constructed.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the tag number in the first octet.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The largest tag number that fits into the first octet.
    const MAX_SINGLEBYTE: u64 = 0x1e;

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::new(Class::Universal, Form::Primitive, 1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::new(Class::Universal, Form::Primitive, 2);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::new(
        Class::Universal, Form::Primitive, 3
    );

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::new(
        Class::Universal, Form::Primitive, 4
    );

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Self::new(Class::Universal, Form::Primitive, 6);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Self::new(
        Class::Universal, Form::Primitive, 10
    );

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    ///
    /// Sequences always use the constructed form.
    pub const SEQUENCE: Self = Self::new(
        Class::Universal, Form::Constructed, 16
    );
}

impl Tag {
    /// Creates a new tag from its components.
    pub const fn new(class: Class, form: Form, number: u64) -> Self {
        Tag { class, form, number: Number::from_u64(number) }
    }

    /// Creates a new tag with a tag number of arbitrary size.
    pub fn with_number(class: Class, form: Form, number: Number) -> Self {
        Tag { class, form, number }
    }

    /// Creates a new primitive tag in the universal class.
    pub const fn universal(number: u64) -> Self {
        Self::new(Class::Universal, Form::Primitive, number)
    }

    /// Creates a new primitive tag in the context specific class.
    pub const fn ctx(number: u64) -> Self {
        Self::new(Class::Context, Form::Primitive, number)
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the form of the tag.
    pub fn form(&self) -> Form {
        self.form
    }

    /// Returns whether the tag signals constructed encoding.
    pub fn is_constructed(&self) -> bool {
        self.form == Form::Constructed
    }

    /// Returns the number of the tag.
    pub fn number(&self) -> &Number {
        &self.number
    }

    /// Returns the same tag with a different form.
    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }

    /// Returns the number if it fits into the first identifier octet.
    fn short_number(&self) -> Option<u8> {
        match self.number.to_u64() {
            Some(number) if number <= Self::MAX_SINGLEBYTE => {
                Some(number as u8)
            }
            _ => None
        }
    }
}

/// # Decoding and Encoding
///
impl Tag {
    /// Takes a tag from the beginning of a source.
    ///
    /// If the source ends before the identifier octets are complete,
    /// returns a truncated input error. If the multi-octet form has a
    /// leading zero digit or, in DER mode, is used for a tag number that
    /// would have fit into a single octet, returns a malformed tag error.
    pub fn take_from(source: &mut Source) -> Result<Self, DecodeError> {
        let first = source.take_u8()?;
        let class = Class::from_u8(first);
        let form = if first & Self::CONSTRUCTED_MASK != 0 {
            Form::Constructed
        }
        else {
            Form::Primitive
        };
        if first & Self::SINGLEBYTE_DATA_MASK != Self::SINGLEBYTE_DATA_MASK {
            return Ok(Tag::new(
                class, form, u64::from(first & Self::SINGLEBYTE_DATA_MASK)
            ))
        }

        // X.690, 8.1.2.4.2 c: the first subsequent octet must not have
        // bits 7 to 1 all zero.
        if source.peek_u8()? == 0x80 {
            return Err(source.err(ErrorKind::MalformedTag))
        }
        let pos = source.pos();
        let number = varint::take_from(source)?;
        let tag = Tag::with_number(class, form, number);
        if source.mode().is_restricted() && tag.short_number().is_some() {
            return Err(DecodeError::new(ErrorKind::MalformedTag, pos))
        }
        Ok(tag)
    }

    /// Decodes a tag from the beginning of a slice.
    ///
    /// Returns the tag and the number of octets of its encoding. This
    /// decodes in BER mode.
    pub fn from_slice(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut source = Source::new(
            bytes::Bytes::copy_from_slice(data), Default::default()
        );
        let res = Self::take_from(&mut source)?;
        Ok((res, source.pos().as_usize()))
    }

    /// Returns the number of octets of the encoded form of the tag.
    pub fn encoded_len(&self) -> usize {
        match self.short_number() {
            Some(_) => 1,
            None => 1 + varint::encoded_len(&self.number),
        }
    }

    /// Returns the identifier octets of the tag.
    pub fn to_encoded(&self) -> SmallVec<[u8; 8]> {
        let mut res = SmallVec::new();
        let first = self.class.into_u8() | self.form.into_u8();
        match self.short_number() {
            Some(number) => res.push(first | number),
            None => {
                res.push(first | Self::SINGLEBYTE_DATA_MASK);
                res.extend_from_slice(&varint::encode(&self.number));
            }
        }
        res
    }

    /// Encodes the tag into a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&self.to_encoded())
    }
}


//--- Display and Debug

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match (self.class, self.form, self.number.to_u64()) {
            (Class::Universal, Form::Primitive, Some(1)) => "BOOLEAN",
            (Class::Universal, Form::Primitive, Some(2)) => "INTEGER",
            (Class::Universal, Form::Primitive, Some(3)) => "BIT STRING",
            (Class::Universal, Form::Primitive, Some(4)) => "OCTET STRING",
            (Class::Universal, Form::Primitive, Some(5)) => "NULL",
            (Class::Universal, Form::Primitive, Some(6)) => {
                "OBJECT IDENTIFIER"
            }
            (Class::Universal, Form::Primitive, Some(10)) => "ENUMERATED",
            (Class::Universal, Form::Constructed, Some(16)) => "SEQUENCE",
            (Class::Universal, Form::Constructed, Some(17)) => "SET",
            _ => {
                match self.class {
                    Class::Universal => write!(f, "[UNIVERSAL ")?,
                    Class::Application => write!(f, "[APPLICATION ")?,
                    Class::Context => write!(f, "[")?,
                    Class::Private => write!(f, "[PRIVATE ")?,
                }
                write!(f, "{}]", self.number)?;
                if self.is_constructed() {
                    write!(f, " (constructed)")?;
                }
                return Ok(())
            }
        };
        f.write_str(name)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({} - {:?})", self, self.to_encoded().as_slice())
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    const fn from_u8(octet: u8) -> Self {
        match octet & Tag::CLASS_MASK {
            0x00 => Self::Universal,
            0x40 => Self::Application,
            0x80 => Self::Context,
            _ => Self::Private
        }
    }

    const fn into_u8(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::Context => 0x80,
            Self::Private => 0xC0,
        }
    }
}


//------------ Form ----------------------------------------------------------

/// The form of the encoding of a value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Form {
    /// The content octets are the value’s data.
    Primitive,

    /// The content octets are a sequence of encoded values.
    Constructed,
}

impl Form {
    const fn into_u8(self) -> u8 {
        match self {
            Self::Primitive => 0x00,
            Self::Constructed => Tag::CONSTRUCTED_MASK,
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;
    use crate::mode::Mode;

    const CLASSES: &[Class] = &[
        Class::Universal, Class::Application, Class::Context, Class::Private
    ];

    fn take(data: &[u8], mode: Mode) -> Result<(Tag, usize), DecodeError> {
        let mut source = Source::new(Bytes::copy_from_slice(data), mode);
        let tag = Tag::take_from(&mut source)?;
        Ok((tag, source.pos().as_usize()))
    }

    #[test]
    fn single_octet_tags() {
        for &class in CLASSES {
            for number in [0, 1, 16, 29, 30] {
                for form in [Form::Primitive, Form::Constructed] {
                    let tag = Tag::new(class, form, number);
                    let encoded = tag.to_encoded();
                    assert_eq!(encoded.len(), 1);
                    assert_eq!(tag.encoded_len(), 1);
                    assert_eq!(
                        encoded[0],
                        class.into_u8() | form.into_u8() | number as u8
                    );
                    assert_eq!(take(&encoded, Mode::Der).unwrap(), (tag, 1));
                }
            }
        }
    }

    #[test]
    fn multi_octet_tags() {
        fn step(number: Number, encoded: &[u8]) {
            for &class in CLASSES {
                let tag = Tag::with_number(
                    class, Form::Primitive, number.clone()
                );
                let mut expected = encoded.to_vec();
                expected[0] |= class.into_u8();
                assert_eq!(tag.to_encoded().as_slice(), expected.as_slice());
                assert_eq!(tag.encoded_len(), expected.len());
                assert_eq!(
                    take(&expected, Mode::Der).unwrap(),
                    (tag, expected.len())
                );
            }
        }

        step(Number::from(31u8), b"\x1F\x1F");
        step(Number::from(127u8), b"\x1F\x7F");
        step(Number::from(128u8), b"\x1F\x81\x00");
        step(Number::from(0x3FFFu16), b"\x1F\xFF\x7F");
        step(Number::from(0x4000u16), b"\x1F\x81\x80\x00");
        step(Number::from(0x1F_FFFFu32), b"\x1F\xFF\xFF\x7F");
        step(Number::from(0x20_0000u32), b"\x1F\x81\x80\x80\x00");
        step(
            Number::from(u128::from(u64::MAX) + 1),
            b"\x1F\x82\x80\x80\x80\x80\x80\x80\x80\x80\x00"
        );
    }

    #[test]
    fn tag_byte_length() {
        assert_eq!(Tag::universal(30).encoded_len(), 1);
        assert_eq!(Tag::universal(31).encoded_len(), 2);
        assert_eq!(Tag::universal(127).encoded_len(), 2);
        assert_eq!(Tag::universal(128).encoded_len(), 3);
        assert_eq!(Tag::universal(0x4000).encoded_len(), 4);
    }

    #[test]
    fn universal_constants() {
        assert_eq!(Tag::BOOLEAN.to_encoded().as_slice(), b"\x01");
        assert_eq!(Tag::INTEGER.to_encoded().as_slice(), b"\x02");
        assert_eq!(Tag::BIT_STRING.to_encoded().as_slice(), b"\x03");
        assert_eq!(Tag::OCTET_STRING.to_encoded().as_slice(), b"\x04");
        assert_eq!(Tag::OID.to_encoded().as_slice(), b"\x06");
        assert_eq!(Tag::ENUMERATED.to_encoded().as_slice(), b"\x0A");
        assert_eq!(Tag::SEQUENCE.to_encoded().as_slice(), b"\x30");
        assert!(Tag::SEQUENCE.is_constructed());
        assert_ne!(Tag::SEQUENCE, Tag::universal(16));
        assert_eq!(
            Tag::universal(16).with_form(Form::Constructed), Tag::SEQUENCE
        );
    }

    #[test]
    fn from_slice() {
        assert_eq!(
            Tag::from_slice(b"\x9F\x81\x00\x05").unwrap(),
            (Tag::with_number(Class::Context, Form::Primitive, 128u8.into()), 3)
        );
        assert_eq!(
            Tag::from_slice(b"\x62\x05").unwrap(),
            (Tag::new(Class::Application, Form::Constructed, 2), 1)
        );
    }

    #[test]
    fn failures() {
        // Leading zero digit.
        assert_eq!(
            take(b"\x1F\x80\x01", Mode::Ber).unwrap_err().kind(),
            &ErrorKind::MalformedTag
        );

        // Short number in long form.
        assert_eq!(
            take(b"\x1F\x05", Mode::Ber).unwrap(),
            (Tag::universal(5), 2)
        );
        assert_eq!(
            take(b"\x1F\x05", Mode::Der).unwrap_err().kind(),
            &ErrorKind::MalformedTag
        );

        // Truncated.
        let truncated: &[&[u8]] = &[
            b"", b"\x1F", b"\x1F\x81", b"\xFF\x81\x80"
        ];
        for data in truncated {
            assert_eq!(
                take(data, Mode::Ber).unwrap_err().kind(),
                &ErrorKind::TruncatedInput
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(Tag::INTEGER.to_string(), "INTEGER");
        assert_eq!(Tag::SEQUENCE.to_string(), "SEQUENCE");
        assert_eq!(Tag::ctx(3).to_string(), "[3]");
        assert_eq!(
            Tag::new(Class::Private, Form::Constructed, 40).to_string(),
            "[PRIVATE 40] (constructed)"
        );
        assert_eq!(Tag::universal(16).to_string(), "[UNIVERSAL 16]");
    }
}
