//! Decoding data in BER.
//!
//! All data is decoded from memory. A [`Source`] walks over the octets and
//! hands out the identifier, length, and content octets of each value. Any
//! violation of the encoding rules results in a [`DecodeError`] whose
//! [`ErrorKind`] names what went wrong.

pub use self::error::{DecodeError, ErrorKind};
pub use self::source::{Pos, Source};

mod error;
mod source;
