//! Encoding data in BER.
//!
//! This modules provides means to encode data in BER. All output is in fact
//! DER: identifier, length, and integer octets always use the shortest
//! possible form.
//!
//! Encoding is done using helper types called _encoders_ that represent the
//! structure of the encoding. These types implement the trait [`Values`].
//! Every universal type provides an `encode` method through the
//! [`Universal`][crate::Universal] trait that returns such an encoder for
//! the complete value, i.e., including its identifier and length octets.
//!
//! The [`Values`] trait can then be used to write the encoding to a
//! [`Target`], which is either a `Vec<u8>`, a `BytesMut`, or anything that
//! implements the standard library’s `io::Write` trait via [`IoTarget`].

pub use self::primitive::Encoder;
pub use self::target::{IoTarget, Target, infallible};
pub use self::values::{Values, total_encoded_len, write_header};

mod primitive;
mod target;
mod values;
