//! Handling of data in Basic Encoding Rules.
//!
//! This crate decodes and encodes values of a set of ASN.1 universal types
//! in the tag-length-value format defined by the Basic Encoding Rules (BER)
//! and their restricted variant, the Distinguished Encoding Rules (DER),
//! both specified in [ITU Recommendation X.690].
//!
//! # Decoding
//!
//! Every encoded value consists of three parts: the identifier octets
//! describing the [`Tag`], the length octets, and the content octets.
//! Decoding first splits the data into a [`Triplet`] of tag and content.
//! The tag then determines how the content is interpreted.
//!
//! If the type of a value is not known beforehand, [`decode_any`] looks up
//! the decoder for the tag in the [`Registry`] and produces a [`Value`]. If
//! the type is known, [`decode_as`] decodes into that type directly and fails
//! if the tag isn’t the type’s canonical tag. Both functions decode the
//! value at the start of the data and ignore anything following it. The
//! methods [`Mode::decode_any_exact`] and [`Mode::decode_exact`] reject such
//! trailing data.
//!
//! Both functions decode in BER. The methods of the same name on [`Mode`]
//! allow choosing DER instead, which rejects all encodings but the
//! canonical one.
//!
//! # Encoding
//!
//! All types implementing [`Universal`] have an `encode` method that returns
//! an encoder implementing [`encode::Values`]. This trait provides methods
//! to write the encoded value to a vec, a bytes value, or anything
//! implementing `io::Write`. Encoding always produces DER.
//!
//! # Supported Types
//!
//! The following universal types are supported:
//!
//! * BOOLEAN as `bool`,
//! * INTEGER as [`Integer`],
//! * ENUMERATED as [`Enumerated`],
//! * BIT STRING as [`BitString`],
//! * OCTET STRING as [`OctetString`],
//! * OBJECT IDENTIFIER as [`Oid`],
//! * SEQUENCE as [`Sequence`], and
//! * SEQUENCE OF as [`SequenceOf`].
//!
//! Indefinite length values, and thus constructed strings and CER, are not
//! supported.
//!
//! [ITU Recommendation X.690]: https://www.itu.int/rec/T-REC-X.690/en

pub use self::int::{Enumerated, Integer, OverflowError};
pub use self::mode::{Mode, decode_any, decode_as};
pub use self::number::{Number, ParseNumberError};
pub use self::oid::{InvalidOid, Oid};
pub use self::registry::{Decoder, Registry};
pub use self::sequence::{HeterogeneousElements, Sequence, SequenceOf};
pub use self::string::{BitString, OctetString};
pub use self::tag::{Class, Form, Tag};
pub use self::triplet::Triplet;
pub use self::value::{Universal, Value};

pub mod decode;
pub mod encode;
pub mod string;

mod int;
mod length;
mod mode;
mod number;
mod oid;
mod registry;
mod sequence;
mod tag;
mod triplet;
mod value;
mod varint;
