//! Base 128 encoded unsigned integers.
//!
//! Both the tag number of multi-octet identifiers and the subidentifiers of
//! object identifiers are encoded as a sequence of octets, each carrying
//! seven bits of the number, most significant group first. The most
//! significant bit of each octet is set if more octets follow, so it is
//! clear in the last octet only.
//!
//! This is a private module. Its functions are used by the [`tag`] and
//! [`oid`] modules.
//!
//! [`tag`]: crate::tag
//! [`oid`]: crate::oid

use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::encode::Target;
use crate::number::Number;


/// The bit marking that more octets follow.
const MORE: u8 = 0x80;

/// The bits carrying data in each octet.
const DATA_MASK: u8 = 0x7F;


/// Decodes a number from the start of `data`.
///
/// Returns the number and the number of octets it occupied. If `data` ends
/// before an octet with the most significant bit cleared is found, returns
/// a truncated input error positioned at the end of `data`.
pub fn decode(data: &[u8]) -> Result<(Number, usize), DecodeError> {
    let len = match data.iter().position(|&octet| octet & MORE == 0) {
        Some(idx) => idx + 1,
        None => {
            return Err(DecodeError::new(ErrorKind::TruncatedInput, data.len()))
        }
    };
    let groups = &data[..len];

    // Values of up to nine groups fit into a word.
    if len <= 9 {
        let word = groups.iter().fold(0u64, |res, &octet| {
            res << 7 | u64::from(octet & DATA_MASK)
        });
        return Ok((Number::from_u64(word), len))
    }

    // Pack the groups into big-endian octets in one pass. The zero bits
    // needed to fill up the first octet are accounted for upfront.
    let mut octets = Vec::with_capacity((len * 7 + 7) / 8);
    let mut acc = 0u32;
    let mut bits = (8 - (len * 7) % 8) % 8;
    for &octet in groups {
        acc = acc << 7 | u32::from(octet & DATA_MASK);
        bits += 7;
        if bits >= 8 {
            bits -= 8;
            octets.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    Ok((Number::from_be_bytes(&octets), len))
}

/// Takes a number from the beginning of a source.
pub fn take_from(source: &mut Source) -> Result<Number, DecodeError> {
    let pos = source.pos();
    let (res, len) = decode(source.remaining()).map_err(|err| {
        err.offset_by(pos.as_usize())
    })?;
    source.take_bytes(len)?;
    Ok(res)
}

/// Returns the number of octets in the encoding of `value`.
///
/// This is at least one since zero is encoded as a single zero octet.
pub fn encoded_len(value: &Number) -> usize {
    std::cmp::max(1, (value.bit_len() + 6) / 7)
}

/// Encodes `value` into its octets.
pub fn encode(value: &Number) -> SmallVec<[u8; 10]> {
    let octets = value.to_be_bytes();
    let len = encoded_len(value);
    let mut res = SmallVec::with_capacity(len);
    for group in (0..len).rev() {
        let mut octet = seven_bits(&octets, group * 7);
        if group != 0 {
            octet |= MORE
        }
        res.push(octet)
    }
    res
}

/// Writes the encoding of `value` to a target.
pub fn write_encoded<T: Target>(
    value: &Number, target: &mut T
) -> Result<(), T::Error> {
    target.write_all(&encode(value))
}

/// Returns the seven bits starting at bit `shift` of a big-endian number.
///
/// Bits are counted from the least significant bit.
fn seven_bits(octets: &[u8], shift: usize) -> u8 {
    let get = |idx: usize| -> u16 {
        // idx counts octets from the end.
        if idx < octets.len() {
            u16::from(octets[octets.len() - 1 - idx])
        }
        else {
            0
        }
    };
    let idx = shift / 8;
    let window = get(idx) | get(idx + 1) << 8;
    ((window >> (shift % 8)) as u8) & DATA_MASK
}


//============ Tests =========================================================
