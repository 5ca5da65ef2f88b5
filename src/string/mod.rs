//! The universal string types for binary data.
//!
//! An [`OctetString`] holds an arbitrary run of octets. A [`BitString`]
//! holds a run of bits whose length need not be a multiple of eight.

pub use self::bit::BitString;
pub use self::octet::OctetString;

mod bit;
mod octet;
