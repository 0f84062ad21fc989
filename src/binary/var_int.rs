use std::io::Write;

use crate::result::IonResult;

const BITS_PER_ENCODED_BYTE: u32 = 7;
// The first byte gives up one bit to the sign flag.
const BITS_IN_FIRST_BYTE: u32 = 6;
const LOWER_7_BITMASK: u8 = 0b0111_1111;
const SIGN_FLAG: u8 = 0b0100_0000;
const END_FLAG: u8 = 0b1000_0000;

/// Represents a variable-length signed integer. See the
/// [VarUInt and VarInt Fields](https://amazon-ion.github.io/ion-docs/docs/binary.html#varuint-and-varint-fields)
/// section of the binary Ion spec for more details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt {
    size_in_bytes: usize,
    value: i64,
    // i64 cannot represent negative zero, so the sign is tracked separately.
    is_negative: bool,
}

impl VarInt {
    pub(crate) fn new(value: i64, is_negative: bool, size_in_bytes: usize) -> Self {
        VarInt {
            size_in_bytes,
            value,
            is_negative,
        }
    }

    /// Returns the number of bytes needed to encode `value` as a VarInt.
    pub fn encoded_length(value: i64) -> usize {
        let significant_bits = u64::BITS - value.unsigned_abs().leading_zeros();
        if significant_bits <= BITS_IN_FIRST_BYTE {
            return 1;
        }
        1 + (significant_bits - BITS_IN_FIRST_BYTE).div_ceil(BITS_PER_ENCODED_BYTE) as usize
    }

    /// Encodes the given signed int value as a VarInt and writes it to the sink, returning the
    /// number of bytes written.
    pub fn write_i64<W: Write>(sink: &mut W, value: i64) -> IonResult<usize> {
        // 64 bits of magnitude need a 6-bit first byte followed by 9 more 7-bit bytes.
        const VAR_INT_BUFFER_SIZE: usize = 10;

        let mut buffer = [0u8; VAR_INT_BUFFER_SIZE];
        let encoded_length = Self::encoded_length(value);
        let first_byte = VAR_INT_BUFFER_SIZE - encoded_length;
        let mut magnitude = value.unsigned_abs();

        for buffer_byte in buffer[first_byte + 1..].iter_mut().rev() {
            *buffer_byte = magnitude as u8 & LOWER_7_BITMASK;
            magnitude >>= BITS_PER_ENCODED_BYTE;
        }
        // Whatever is left fits in the first byte's six data bits.
        buffer[first_byte] = magnitude as u8;
        if value < 0 {
            buffer[first_byte] |= SIGN_FLAG;
        }
        buffer[VAR_INT_BUFFER_SIZE - 1] |= END_FLAG;

        let encoded_bytes = &buffer[first_byte..];
        sink.write_all(encoded_bytes)?;
        Ok(encoded_bytes.len())
    }

    /// Returns the value of the signed integer
    #[inline(always)]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns `true` if the sign bit was set, including for negative zero.
    #[inline(always)]
    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    /// Returns the number of bytes that were read from the data source to construct this
    /// signed integer
    #[inline(always)]
    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }
}
