use std::io::Write;
use std::mem;

use crate::binary::constants::v1_0::{INT_NEGATIVE_ZERO, INT_SIGN_BIT};
use crate::result::{decoding_error, IonResult};
use crate::types::{Coefficient, Magnitude, Sign};

// This number was chosen somewhat arbitrarily and could be lifted if a use case demands it.
const MAX_INT_SIZE_IN_BYTES: usize = 2048;

/// Represents a fixed-length signed integer. See the
/// [UInt and Int Fields](https://amazon-ion.github.io/ion-docs/docs/binary.html#uint-and-int-fields)
/// section of the binary Ion spec for more details.
///
/// `Int` fields use a sign-and-magnitude representation, so unlike two's complement they can
/// encode negative zero: a lone `0x80` byte. The decoded value is a [`Coefficient`], which keeps
/// that distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedInt {
    size_in_bytes: usize,
    value: Coefficient,
}

impl DecodedInt {
    pub(crate) fn new(value: Coefficient, size_in_bytes: usize) -> Self {
        DecodedInt {
            size_in_bytes,
            value,
        }
    }

    /// Interprets all of `bytes` as a single `Int` field.
    pub fn from_bytes(bytes: &[u8]) -> IonResult<DecodedInt> {
        let length = bytes.len();
        let Some(&first_byte) = bytes.first() else {
            return Ok(DecodedInt::new(Coefficient::ZERO, 0));
        };
        if length > MAX_INT_SIZE_IN_BYTES {
            return decoding_error(format!(
                "Found a {length}-byte Int. Max supported size is {MAX_INT_SIZE_IN_BYTES} bytes."
            ));
        }

        let sign = if first_byte & INT_SIGN_BIT == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        let magnitude = if length <= mem::size_of::<u64>() {
            let mut magnitude = u64::from(first_byte & !INT_SIGN_BIT);
            for &byte in &bytes[1..] {
                magnitude <<= 8;
                magnitude |= u64::from(byte);
            }
            Magnitude::U64(magnitude)
        } else {
            // The leading sign bit is the only part of the input that can't be treated as
            // unsigned big-endian bytes, so clear it in a copy.
            let mut owned_bytes = Vec::from(bytes);
            owned_bytes[0] &= !INT_SIGN_BIT;
            Magnitude::from_be_bytes(&owned_bytes)
        };
        Ok(DecodedInt::new(Coefficient::new(sign, magnitude), length))
    }

    /// Returns the number of bytes needed to encode `value` as an `Int` field.
    ///
    /// Positive zero needs no bytes at all; negative zero needs a lone sign byte.
    pub fn encoded_length(value: &Coefficient) -> usize {
        if value.is_zero() {
            return if value.is_negative_zero() { 1 } else { 0 };
        }
        let magnitude_bytes = value.magnitude().to_be_bytes();
        let needs_sign_byte = magnitude_bytes[0] & INT_SIGN_BIT != 0;
        magnitude_bytes.len() + usize::from(needs_sign_byte)
    }

    /// Encodes `value` as an `Int` field and writes it to the provided `sink`.
    /// Returns the number of bytes written.
    pub fn write_coefficient<W: Write>(sink: &mut W, value: &Coefficient) -> IonResult<usize> {
        if value.is_negative_zero() {
            return Self::write_negative_zero(sink);
        }
        if value.is_zero() {
            return Ok(0);
        }
        let sign_bit = match value.sign() {
            Sign::Negative => INT_SIGN_BIT,
            Sign::Positive => 0,
        };
        let mut magnitude_bytes = value.magnitude().to_be_bytes();
        if magnitude_bytes[0] & INT_SIGN_BIT != 0 {
            // The magnitude already uses the high bit; the sign gets a byte of its own.
            sink.write_all(&[sign_bit])?;
            sink.write_all(&magnitude_bytes)?;
            return Ok(magnitude_bytes.len() + 1);
        }
        magnitude_bytes[0] |= sign_bit;
        sink.write_all(&magnitude_bytes)?;
        Ok(magnitude_bytes.len())
    }

    /// Encodes the provided `value` as an Int and writes it to the provided `sink`.
    /// Returns the number of bytes written.
    pub fn write_i64<W: Write>(sink: &mut W, value: i64) -> IonResult<usize> {
        Self::write_coefficient(sink, &Coefficient::from(value))
    }

    /// Encodes a negative zero as an `Int` and writes it to the provided `sink`.
    /// Returns the number of bytes written.
    pub fn write_negative_zero<W: Write>(sink: &mut W) -> IonResult<usize> {
        sink.write_all(&[INT_NEGATIVE_ZERO])?;
        Ok(1)
    }

    /// Returns `true` if the Int is negative zero.
    pub fn is_negative_zero(&self) -> bool {
        self.value.is_negative_zero()
    }

    /// Returns the value of the signed integer.
    #[inline(always)]
    pub fn value(&self) -> &Coefficient {
        &self.value
    }

    pub fn into_value(self) -> Coefficient {
        self.value
    }

    /// Returns the number of bytes that were read from the data source to construct this
    /// signed integer.
    #[inline(always)]
    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rstest::rstest;

    #[rstest]
    #[case::empty(&[], Coefficient::ZERO)]
    #[case::positive(&[0b0000_0001, 0b0000_0000], Coefficient::from(256))]
    #[case::negative(&[0b1000_0001, 0b0000_0000], Coefficient::from(-256))]
    #[case::negative_zero(&[0x80], Coefficient::NEGATIVE_ZERO)]
    #[case::explicit_positive_zero(&[0x00], Coefficient::ZERO)]
    #[case::sign_byte(&[0x80, 0xFF], Coefficient::from(-255))]
    fn read_int(#[case] bytes: &[u8], #[case] expected: Coefficient) -> IonResult<()> {
        let int = DecodedInt::from_bytes(bytes)?;
        assert_eq!(int.value(), &expected);
        assert_eq!(int.size_in_bytes(), bytes.len());
        Ok(())
    }

    #[test]
    fn read_big_int() -> IonResult<()> {
        let mut bytes = vec![0xFF; 12];
        let int = DecodedInt::from_bytes(&bytes)?;
        assert_eq!(int.value().sign(), Sign::Negative);
        bytes[0] = 0x7F;
        let expected = Magnitude::from(BigUint::from_bytes_be(&bytes));
        assert_eq!(int.value().magnitude(), &expected);
        Ok(())
    }

    #[rstest]
    #[case::zero(0, &[])]
    #[case::one(1, &[0b0000_0001])]
    #[case::minus_one(-1, &[0b1000_0001])]
    #[case::high_bit(255, &[0b0000_0000, 0b1111_1111])]
    #[case::negative_high_bit(-255, &[0b1000_0000, 0b1111_1111])]
    #[case::two_bytes(-935, &[0b1000_0011, 0b1010_0111])]
    #[case::min(i64::MIN, &[0x80, 0x80, 0, 0, 0, 0, 0, 0, 0])]
    fn write_int(#[case] value: i64, #[case] expected: &[u8]) -> IonResult<()> {
        let mut buffer = vec![];
        let written = DecodedInt::write_i64(&mut buffer, value)?;
        assert_eq!(buffer.as_slice(), expected);
        assert_eq!(written, expected.len());
        assert_eq!(DecodedInt::encoded_length(&Coefficient::from(value)), expected.len());
        Ok(())
    }

    #[test]
    fn write_negative_zero() -> IonResult<()> {
        let mut buffer = vec![];
        assert_eq!(DecodedInt::write_coefficient(&mut buffer, &Coefficient::NEGATIVE_ZERO)?, 1);
        assert_eq!(buffer.as_slice(), &[0x80]);
        assert_eq!(DecodedInt::encoded_length(&Coefficient::NEGATIVE_ZERO), 1);
        assert!(DecodedInt::from_bytes(&buffer)?.is_negative_zero());
        Ok(())
    }
}
