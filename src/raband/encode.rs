use super::BasebandError;
use bitvec::prelude::*;
use num::traits::PrimInt;

pub trait DecodeToInt<T: PrimInt> {
    fn decode(&self) -> T;
}

// Most significant bit first. A short trailing chunk is padded with zeros on the right.
fn decode<T: PrimInt>(bits: &BitSlice, width: usize) -> T {
    let zero = T::zero();
    let one = T::one();
    let value = bits
        .iter()
        .fold(zero, |acc, bit| if *bit { (acc << 1) | one } else { acc << 1 });
    value << width.saturating_sub(bits.len())
}

impl DecodeToInt<u8> for BitSlice {
    fn decode(&self) -> u8 {
        decode::<u8>(self, 8)
    }
}

impl DecodeToInt<u8> for BitVec {
    fn decode(&self) -> u8 {
        decode::<u8>(self.as_bitslice(), 8)
    }
}

pub trait DecodeToBytes {
    fn decode(&self) -> Vec<u8>;
}

impl DecodeToBytes for BitVec {
    fn decode(&self) -> Vec<u8> {
        DecodeToBytes::decode(self.as_bitslice())
    }
}

impl DecodeToBytes for BitSlice {
    fn decode(&self) -> Vec<u8> {
        self.chunks(8).map(DecodeToInt::<u8>::decode).collect()
    }
}

pub trait EncodeFromBytes {
    fn encode(&self) -> BitVec;
}

impl EncodeFromBytes for [u8] {
    fn encode(&self) -> BitVec {
        self.iter()
            .flat_map(|byte| byte.view_bits::<Msb0>())
            .collect()
    }
}

impl EncodeFromBytes for Vec<u8> {
    fn encode(&self) -> BitVec {
        self.as_slice().encode()
    }
}

/// Frames text as one big-endian byte per character, without length prefix or checksum.
pub fn encode_string(text: &str) -> Result<BitVec, BasebandError> {
    let bytes = text
        .chars()
        .map(|ch| {
            u8::try_from(ch).map_err(|_| {
                BasebandError::InvalidInput(format!("character `{ch}` does not fit in one byte"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bytes.encode())
}

pub fn decode_string(bits: &BitSlice) -> String {
    DecodeToBytes::decode(bits)
        .into_iter()
        .map(char::from)
        .collect()
}

pub fn bits_from_values(values: &[u8]) -> Result<BitVec, BasebandError> {
    values
        .iter()
        .map(|value| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(BasebandError::InvalidInput(format!(
                "bit values must be 0 or 1, found {value}"
            ))),
        })
        .collect()
}

/// Parses a string of `0`s and `1`s. Whitespace is skipped.
pub fn parse_bits(text: &str) -> Result<BitVec, BasebandError> {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(BasebandError::InvalidInput(format!(
                "expected 0 or 1, found `{ch}`"
            ))),
        })
        .collect()
}

pub fn format_bits(bits: &BitSlice) -> String {
    bits.iter()
        .map(|bit| if *bit { '1' } else { '0' })
        .collect()
}
