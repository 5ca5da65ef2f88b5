//! The encoder for universal types.
//!
//! This is an internal module. The relevant items are re-exported by the
//! parent.

use crate::value::Universal;
use super::target::Target;
use super::values::{Values, total_encoded_len, write_header};


//------------ Encoder -------------------------------------------------------

/// A value encoder for a value of a universal type.
///
/// Values of this type are returned by [`Universal::encode`]. They produce
/// a single value with the type’s canonical tag and content as produced by
/// [`Universal::write_content`].
#[derive(Clone, Copy, Debug)]
pub struct Encoder<'a, U: ?Sized> {
    /// The value to encode.
    value: &'a U,
}

impl<'a, U: ?Sized> Encoder<'a, U> {
    /// Creates a new encoder for the given value.
    pub fn new(value: &'a U) -> Self {
        Encoder { value }
    }
}


//--- Values

impl<U: Universal> Values for Encoder<'_, U> {
    fn encoded_len(&self) -> usize {
        total_encoded_len(&U::TAG, self.value.content_len())
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, &U::TAG, self.value.content_len())?;
        self.value.write_content(target)
    }
}
