//! Unsigned integers of arbitrary width.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{cmp, fmt};
use std::str::FromStr;
use bytes::Bytes;
use smallvec::SmallVec;


//------------ Number --------------------------------------------------------

/// A non-negative integer without an upper bound.
///
/// Tag numbers and the arcs of object identifiers have no fixed width in
/// BER. While almost all values seen in practice fit into a `u64`, nothing
/// in the encoding stops a sender from using larger values. This type keeps
/// small values in a machine word and switches to a big-endian octet
/// sequence for everything beyond `u64::MAX`.
///
/// Only the small set of arithmetic operations needed for the codecs is
/// provided.
//
//  Invariant: the `Wide` variant is only used for values above `u64::MAX`
//  and never has leading zero octets. This makes the derived equality and
//  hash correct.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Number(Repr);

#[derive(Clone, Eq, Hash, PartialEq)]
enum Repr {
    Word(u64),
    Wide(Bytes),
}

/// Octet buffer used for arithmetic on wide values.
type Octets = SmallVec<[u8; 16]>;

impl Number {
    /// The number zero.
    pub const ZERO: Self = Number(Repr::Word(0));

    /// Creates a number from a `u64`.
    pub const fn from_u64(value: u64) -> Self {
        Number(Repr::Word(value))
    }

    /// Creates a number from its big-endian octets.
    ///
    /// Leading zero octets are ignored. An empty slice is zero.
    pub fn from_be_bytes(octets: &[u8]) -> Self {
        let start = octets.iter().position(|&x| x != 0).unwrap_or(
            octets.len()
        );
        let octets = &octets[start..];
        if octets.len() <= 8 {
            let mut word = [0u8; 8];
            word[8 - octets.len()..].copy_from_slice(octets);
            Number(Repr::Word(u64::from_be_bytes(word)))
        }
        else {
            Number(Repr::Wide(Bytes::copy_from_slice(octets)))
        }
    }

    /// Returns the minimal big-endian octets of the number.
    ///
    /// Zero results in an empty sequence.
    pub fn to_be_bytes(&self) -> SmallVec<[u8; 16]> {
        match self.0 {
            Repr::Word(word) => {
                let octets = word.to_be_bytes();
                let start = (word.leading_zeros() / 8) as usize;
                Octets::from_slice(&octets[start..])
            }
            Repr::Wide(ref octets) => Octets::from_slice(octets.as_ref())
        }
    }

    /// Returns the number as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.0 {
            Repr::Word(word) => Some(word),
            Repr::Wide(_) => None,
        }
    }

    /// Returns the number as a `u32` if it fits.
    pub fn to_u32(&self) -> Option<u32> {
        self.to_u64().and_then(|word| u32::try_from(word).ok())
    }

    /// Returns whether the number is zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Word(0))
    }

    /// Returns the number of significant bits.
    ///
    /// This is zero for zero.
    pub fn bit_len(&self) -> usize {
        match self.0 {
            Repr::Word(word) => (64 - word.leading_zeros()) as usize,
            Repr::Wide(ref octets) => {
                // Wide values never start with a zero octet.
                octets.len() * 8 - octets[0].leading_zeros() as usize
            }
        }
    }

    /// Returns `self * mul + add`.
    pub fn mul_add(&self, mul: u32, add: u32) -> Self {
        if let Repr::Word(word) = self.0 {
            let res = word.checked_mul(u64::from(mul)).and_then(|res| {
                res.checked_add(u64::from(add))
            });
            if let Some(res) = res {
                return Number(Repr::Word(res))
            }
        }
        let mut octets = self.to_be_bytes();
        let mut carry = u64::from(add);
        for octet in octets.iter_mut().rev() {
            let value = u64::from(*octet) * u64::from(mul) + carry;
            *octet = value as u8;
            carry = value >> 8;
        }
        while carry != 0 {
            octets.insert(0, carry as u8);
            carry >>= 8;
        }
        Self::from_be_bytes(&octets)
    }

    /// Returns `self - rhs` or `None` if that would be negative.
    pub fn checked_sub(&self, rhs: u32) -> Option<Self> {
        if let Repr::Word(word) = self.0 {
            return word.checked_sub(u64::from(rhs)).map(Number::from_u64)
        }
        let mut octets = self.to_be_bytes();
        let mut borrow = u64::from(rhs);
        for octet in octets.iter_mut().rev() {
            if borrow == 0 {
                break
            }
            let sub = borrow & 0xFF;
            borrow >>= 8;
            if u64::from(*octet) >= sub {
                *octet -= sub as u8;
            }
            else {
                *octet = (u64::from(*octet) + 0x100 - sub) as u8;
                borrow += 1;
            }
        }
        if borrow != 0 {
            return None
        }
        Some(Self::from_be_bytes(&octets))
    }

    /// Returns the quotient and remainder of dividing by `div`.
    ///
    /// # Panics
    ///
    /// The method panics if `div` is zero.
    pub fn div_rem(&self, div: u32) -> (Self, u32) {
        if let Repr::Word(word) = self.0 {
            let div = u64::from(div);
            return (Number(Repr::Word(word / div)), (word % div) as u32)
        }
        let mut octets = self.to_be_bytes();
        let mut rem = 0u64;
        for octet in octets.iter_mut() {
            let cur = rem << 8 | u64::from(*octet);
            *octet = (cur / u64::from(div)) as u8;
            rem = cur % u64::from(div);
        }
        (Self::from_be_bytes(&octets), rem as u32)
    }
}


//--- Default

impl Default for Number {
    fn default() -> Self {
        Number::ZERO
    }
}


//--- From

macro_rules! from_unsigned {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Number {
                fn from(value: $type) -> Self {
                    Number::from_u64(value as u64)
                }
            }
        )*
    }
}

from_unsigned!(u8, u16, u32, u64, usize);

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        Number::from_be_bytes(&value.to_be_bytes())
    }
}


//--- PartialOrd and Ord

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        match (&self.0, &other.0) {
            (Repr::Word(left), Repr::Word(right)) => left.cmp(right),
            (Repr::Word(_), Repr::Wide(_)) => cmp::Ordering::Less,
            (Repr::Wide(_), Repr::Word(_)) => cmp::Ordering::Greater,
            (Repr::Wide(left), Repr::Wide(right)) => {
                left.len().cmp(&right.len()).then_with(|| left.cmp(right))
            }
        }
    }
}


//--- FromStr

impl FromStr for Number {
    type Err = ParseNumberError;

    /// Parses a number from a sequence of decimal digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseNumberError)
        }
        let mut res = Number::ZERO;
        for ch in s.bytes() {
            if !ch.is_ascii_digit() {
                return Err(ParseNumberError)
            }
            res = res.mul_add(10, u32::from(ch - b'0'));
        }
        Ok(res)
    }
}


//--- Display and Debug

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Repr::Word(word) = self.0 {
            return fmt::Display::fmt(&word, f)
        }

        // Peel off chunks of nine decimal digits, least significant first.
        const CHUNK: u32 = 1_000_000_000;
        let mut chunks = Vec::new();
        let mut rest = self.clone();
        while !rest.is_zero() {
            let (quot, rem) = rest.div_rem(CHUNK);
            chunks.push(rem);
            rest = quot;
        }
        let mut chunks = chunks.iter().rev();
        if let Some(first) = chunks.next() {
            write!(f, "{}", first)?;
        }
        for chunk in chunks {
            write!(f, "{:09}", chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Number({})", self)
    }
}


//------------ ParseNumberError ----------------------------------------------

/// A string did not contain a valid decimal number.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid decimal number")]
pub struct ParseNumberError;


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn word_and_wide() {
        assert_eq!(Number::from(0u8).to_u64(), Some(0));
        assert_eq!(Number::from(u64::MAX).to_u64(), Some(u64::MAX));

        let wide = Number::from(u128::from(u64::MAX) + 1);
        assert_eq!(wide.to_u64(), None);
        assert_eq!(wide.bit_len(), 65);
        assert_eq!(
            wide.to_be_bytes().as_slice(),
            b"\x01\0\0\0\0\0\0\0\0".as_ref()
        );

        assert_eq!(
            Number::from_be_bytes(b"\0\0\0\0\0\0\0\0\0\0\x12\x34"),
            Number::from(0x1234u32)
        );
        assert!(Number::from_be_bytes(b"").is_zero());
        assert_eq!(Number::ZERO.bit_len(), 0);
        assert!(Number::ZERO.to_be_bytes().is_empty());
    }

    #[test]
    fn arithmetic_crosses_word_boundary() {
        let max = Number::from(u64::MAX);
        let next = max.mul_add(1, 1);
        assert_eq!(next, Number::from(u128::from(u64::MAX) + 1));
        assert_eq!(next.checked_sub(1), Some(max.clone()));
        assert_eq!(
            max.mul_add(128, 127),
            Number::from(u128::from(u64::MAX) * 128 + 127)
        );
        assert_eq!(Number::from(3u8).checked_sub(4), None);

        let big = Number::from(u128::MAX);
        let (quot, rem) = big.div_rem(10);
        assert_eq!(quot, Number::from(u128::MAX / 10));
        assert_eq!(rem, (u128::MAX % 10) as u32);
    }

    #[test]
    fn ordering() {
        let small = Number::from(5u8);
        let word = Number::from(u64::MAX);
        let wide = Number::from(u128::MAX);
        assert!(small < word);
        assert!(word < wide);
        assert!(Number::from(u128::from(u64::MAX) + 1) < wide);
    }

    #[test]
    fn decimal() {
        for s in [
            "0", "7", "18446744073709551615", "18446744073709551616",
            "340282366920938463463374607431768211455",
            "1000000000000000000000000000001",
        ] {
            assert_eq!(Number::from_str(s).unwrap().to_string(), s);
        }
        assert_eq!(
            Number::from_str("340282366920938463463374607431768211455"),
            Ok(Number::from(u128::MAX))
        );
        assert_eq!(Number::from_str("007"), Ok(Number::from(7u8)));
        assert_eq!(Number::from_str(""), Err(ParseNumberError));
        assert_eq!(Number::from_str("-1"), Err(ParseNumberError));
        assert_eq!(Number::from_str("1a"), Err(ParseNumberError));
    }
}
