//! The registry of decoders for the universal types.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::collections::HashMap;
use log::trace;
use once_cell::sync::Lazy;
use crate::decode::DecodeError;
use crate::int::{Enumerated, Integer};
use crate::mode::Mode;
use crate::oid::Oid;
use crate::sequence::Sequence;
use crate::string::{BitString, OctetString};
use crate::tag::Tag;
use crate::triplet::Triplet;
use crate::value::{Universal, Value};


//------------ Decoder -------------------------------------------------------

/// A function decoding the content of a triplet into a value.
pub type Decoder = fn(&Triplet, Mode) -> Result<Value, DecodeError>;

/// Decodes a triplet as `U` and wraps it into a value.
fn decode_into<U: Universal + Into<Value>>(
    triplet: &Triplet, mode: Mode
) -> Result<Value, DecodeError> {
    U::decode_value(triplet, mode).map(Into::into)
}


//------------ Registry ------------------------------------------------------

/// The mapping from a tag to the decoder for the type using it.
///
/// There is exactly one registry, available via [`Registry::global`]. It is
/// built on first use and never changes afterwards, so it can be shared
/// between threads freely.
///
/// Each universal type is registered under its canonical tag. Because
/// SEQUENCE and SEQUENCE OF share the same tag, only [`Sequence`] is
/// registered. Use [`decode_as`][crate::decode_as] to get a
/// [`SequenceOf`][crate::SequenceOf].
pub struct Registry {
    decoders: HashMap<Tag, Decoder>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

impl Registry {
    /// Creates the registry with all supported types.
    fn new() -> Self {
        let mut res = Registry { decoders: HashMap::new() };
        res.register::<bool>();
        res.register::<Integer>();
        res.register::<BitString>();
        res.register::<OctetString>();
        res.register::<Oid>();
        res.register::<Enumerated>();
        res.register::<Sequence>();
        trace!("decoder registry built with {} types", res.decoders.len());
        res
    }

    fn register<U: Universal + Into<Value>>(&mut self) {
        self.decoders.insert(U::TAG, decode_into::<U>);
    }

    /// Returns the global registry.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Returns the decoder for the given tag if there is one.
    pub fn get(&self, tag: &Tag) -> Option<Decoder> {
        let res = self.decoders.get(tag).copied();
        trace!(
            "registry lookup for {}: {}",
            tag, if res.is_some() { "found" } else { "missing" }
        );
        res
    }

    /// Returns whether there is a decoder for the given tag.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Returns an iterator over all registered tags.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.decoders.keys()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::tag::Form;

    #[test]
    fn contents() {
        let registry = Registry::global();
        for tag in [
            Tag::BOOLEAN, Tag::INTEGER, Tag::BIT_STRING, Tag::OCTET_STRING,
            Tag::OID, Tag::ENUMERATED, Tag::SEQUENCE,
        ] {
            assert!(registry.contains(&tag), "{} missing", tag);
        }
        assert_eq!(registry.tags().count(), 7);
        assert!(!registry.contains(&Tag::universal(5)));
        assert!(!registry.contains(&Tag::INTEGER.with_form(Form::Constructed)));
        assert!(registry.get(&Tag::ctx(2)).is_none());
    }

    #[test]
    fn dispatch() {
        let decoder = Registry::global().get(&Tag::BOOLEAN).unwrap();
        let triplet = Triplet::new(
            Tag::BOOLEAN, bytes::Bytes::from_static(b"\xFF")
        );
        assert_eq!(decoder(&triplet, Mode::Der).unwrap(), Value::Boolean(true));
    }
}
