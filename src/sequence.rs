//! SEQUENCE and SEQUENCE OF values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use log::trace;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::encode::{Target, Values};
use crate::mode::Mode;
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::{Universal, Value};


//------------ Sequence ------------------------------------------------------

/// A SEQUENCE value.
///
/// A sequence is an ordered list of values of possibly different types. The
/// elements are kept as [`Triplet`]s in the order they appear. They can be
/// decoded further either via [`values`][Self::values] or individually via
/// the methods of the triplet.
///
/// # BER Encoding
///
/// A sequence is encoded as a constructed value. The content octets are the
/// complete encodings of the elements one after another. The elements must
/// exactly fill the content.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sequence {
    elements: Vec<Triplet>,
}

impl Sequence {
    /// Creates a sequence from its elements.
    pub fn new(elements: Vec<Triplet>) -> Self {
        Sequence { elements }
    }

    /// Returns the elements.
    pub fn elements(&self) -> &[Triplet] {
        &self.elements
    }

    /// Converts the sequence into its elements.
    pub fn into_elements(self) -> Vec<Triplet> {
        self.elements
    }

    /// Appends an element to the end of the sequence.
    pub fn push(&mut self, element: impl Into<Triplet>) {
        self.elements.push(element.into())
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Decodes all elements through the registry.
    ///
    /// Fails if any element has a tag without a registered decoder or
    /// doesn’t decode.
    pub fn values(&self, mode: Mode) -> Result<Vec<Value>, DecodeError> {
        self.elements.iter().map(|element| element.decode(mode)).collect()
    }
}

impl Universal for Sequence {
    const TAG: Tag = Tag::SEQUENCE;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        take_elements(triplet.value(), mode, false).map(Sequence::new)
    }

    fn content_len(&self) -> usize {
        Values::encoded_len(self.elements.as_slice())
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Values::write_encoded(self.elements.as_slice(), target)
    }
}

impl From<Vec<Triplet>> for Sequence {
    fn from(elements: Vec<Triplet>) -> Self {
        Self::new(elements)
    }
}


//------------ SequenceOf ----------------------------------------------------

/// A SEQUENCE OF value.
///
/// A sequence of is an ordered list of values that all have the same type.
/// Since the type of a value can only be judged by its tag, this means that
/// all elements have the same tag.
///
/// # BER Encoding
///
/// A sequence of is encoded exactly like a sequence. It even uses the same
/// tag, so a value can only be decoded as a `SequenceOf` if this is
/// requested explicitly. The tag of the first element determines the tag
/// all other elements must have.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceOf {
    elements: Vec<Triplet>,
}

impl SequenceOf {
    /// Creates a sequence of from its elements.
    ///
    /// Returns an error if the elements don’t all have the same tag.
    pub fn new(elements: Vec<Triplet>) -> Result<Self, HeterogeneousElements> {
        if let Some((first, rest)) = elements.split_first() {
            if let Some(other) = rest.iter().find(|x| x.tag() != first.tag()) {
                return Err(HeterogeneousElements {
                    expected: first.tag().clone(),
                    found: other.tag().clone(),
                })
            }
        }
        Ok(SequenceOf { elements })
    }

    /// Creates a sequence of from values of a universal type.
    pub fn from_values<U: Universal>(values: &[U]) -> Self {
        SequenceOf {
            elements: values.iter().map(Universal::to_triplet).collect()
        }
    }

    /// Returns the tag of the elements if there are any.
    pub fn element_tag(&self) -> Option<&Tag> {
        self.elements.first().map(Triplet::tag)
    }

    /// Returns the elements.
    pub fn elements(&self) -> &[Triplet] {
        &self.elements
    }

    /// Converts the value into its elements.
    pub fn into_elements(self) -> Vec<Triplet> {
        self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Decodes all elements as values of type `U`.
    pub fn decode_elements<U: Universal>(
        &self, mode: Mode
    ) -> Result<Vec<U>, DecodeError> {
        self.elements.iter().map(|element| {
            element.decode_as(mode)
        }).collect()
    }
}

impl Universal for SequenceOf {
    const TAG: Tag = Tag::SEQUENCE;

    fn decode_value(
        triplet: &Triplet, mode: Mode
    ) -> Result<Self, DecodeError> {
        take_elements(triplet.value(), mode, true).map(|elements| {
            SequenceOf { elements }
        })
    }

    fn content_len(&self) -> usize {
        Values::encoded_len(self.elements.as_slice())
    }

    fn write_content<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Values::write_encoded(self.elements.as_slice(), target)
    }
}


//------------ HeterogeneousElements -----------------------------------------

/// The elements for a SEQUENCE OF have different tags.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("SEQUENCE OF element with tag {found}, expected {expected}")]
pub struct HeterogeneousElements {
    pub expected: Tag,
    pub found: Tag,
}


//------------ Helper Functions ----------------------------------------------

/// Splits the content of a sequence into its elements.
///
/// If `homogeneous` is true, all elements must have the tag of the first
/// one.
fn take_elements(
    content: &Bytes, mode: Mode, homogeneous: bool
) -> Result<Vec<Triplet>, DecodeError> {
    let mut source = Source::new(content.clone(), mode);
    let mut res: Vec<Triplet> = Vec::new();
    while !source.is_exhausted() {
        let pos = source.pos();
        let element = Triplet::take_from(&mut source)?;
        if homogeneous {
            if let Some(first) = res.first() {
                if first.tag() != element.tag() {
                    return Err(DecodeError::new(
                        ErrorKind::HeterogeneousSequenceOf {
                            expected: first.tag().clone(),
                            found: element.tag().clone(),
                        },
                        pos
                    ))
                }
            }
        }
        res.push(element);
    }
    trace!("sequence content holds {} elements", res.len());
    Ok(res)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::int::Integer;
    use crate::oid::Oid;
    use crate::string::OctetString;
    use crate::test::assert_kind;

    #[test]
    fn exact_fill() {
        let encoded = b"\x30\x06\x02\x01\x05\x01\x01\xFF";
        let seq = Mode::Der.decode_as::<Sequence>(encoded).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.elements()[0].tag(), &Tag::INTEGER);
        assert_eq!(seq.elements()[1].tag(), &Tag::BOOLEAN);
        assert_eq!(
            seq.values(Mode::Der).unwrap(),
            [Value::Integer(Integer::from(5)), Value::Boolean(true)]
        );
        assert_eq!(seq.to_vec(), encoded);
    }

    #[test]
    fn withheld_octet() {
        // The last element claims one octet of content that isn’t there.
        let err = Mode::Der.decode_as::<Sequence>(
            b"\x30\x05\x02\x01\x05\x01\x01"
        ).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TruncatedInput);
        assert_eq!(err.pos().as_usize(), 5);

        // The sequence claims more content than there is.
        assert_kind(
            Mode::Der.decode_as::<Sequence>(b"\x30\x06\x02\x01\x05\x01\x01"),
            ErrorKind::TruncatedInput
        );
    }

    #[test]
    fn empty() {
        let seq = Mode::Der.decode_as::<Sequence>(b"\x30\x00").unwrap();
        assert!(seq.is_empty());
        assert_eq!(Sequence::default().to_vec(), b"\x30\x00");
        assert!(
            Mode::Der.decode_as::<SequenceOf>(b"\x30\x00").unwrap()
                .element_tag().is_none()
        );
    }

    #[test]
    fn nested() {
        let mut inner = Sequence::default();
        inner.push(Integer::from(-1).to_triplet());
        inner.push(OctetString::from(b"x".as_ref()).to_triplet());
        let mut outer = Sequence::default();
        outer.push(Oid::from_u32s(&[1, 2, 3]).unwrap().to_triplet());
        outer.push(inner.to_triplet());
        let encoded = outer.to_vec();
        assert_eq!(
            encoded,
            b"\x30\x0C\x06\x02\x2A\x03\x30\x06\x02\x01\xFF\x04\x01x"
        );

        let decoded = crate::decode_any(&encoded).unwrap();
        assert_eq!(decoded, Value::Sequence(outer));
        let Value::Sequence(decoded) = decoded else { unreachable!() };
        let values = decoded.values(Mode::Ber).unwrap();
        assert_eq!(values[1], Value::Sequence(inner));
    }

    #[test]
    fn sequence_of() {
        let ints = [Integer::from(1), Integer::from(300), Integer::from(-5)];
        let seq = SequenceOf::from_values(&ints);
        assert_eq!(seq.element_tag(), Some(&Tag::INTEGER));
        let encoded = seq.to_vec();
        assert_eq!(
            encoded, b"\x30\x0A\x02\x01\x01\x02\x02\x01\x2C\x02\x01\xFB"
        );
        let decoded = Mode::Der.decode_as::<SequenceOf>(&encoded).unwrap();
        assert_eq!(decoded, seq);
        assert_eq!(
            decoded.decode_elements::<Integer>(Mode::Der).unwrap(), ints
        );

        // The registry hands out sequences for the shared tag.
        assert!(matches!(
            crate::decode_any(&encoded).unwrap(), Value::Sequence(_)
        ));
    }

    #[test]
    fn heterogeneous_sequence_of() {
        let err = Mode::Ber.decode_as::<SequenceOf>(
            b"\x30\x06\x02\x01\x05\x01\x01\xFF"
        ).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::HeterogeneousSequenceOf {
                expected: Tag::INTEGER, found: Tag::BOOLEAN
            }
        );
        assert_eq!(err.pos().as_usize(), 3);

        // The same content is a fine sequence.
        assert!(
            Mode::Ber.decode_as::<Sequence>(b"\x30\x06\x02\x01\x05\x01\x01\xFF")
                .is_ok()
        );

        assert_eq!(
            SequenceOf::new(vec![
                true.to_triplet(), false.to_triplet(), Integer::from(0).to_triplet()
            ]),
            Err(HeterogeneousElements {
                expected: Tag::BOOLEAN, found: Tag::INTEGER
            })
        );
    }
}
