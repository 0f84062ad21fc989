use std::io::Write;

use crate::result::IonResult;

const BITS_PER_ENCODED_BYTE: u32 = 7;
const LOWER_7_BITMASK: u8 = 0b0111_1111;
const END_FLAG: u8 = 0b1000_0000;

/// Represents a variable-length unsigned integer. See the
/// [VarUInt and VarInt Fields](https://amazon-ion.github.io/ion-docs/docs/binary.html#varuint-and-varint-fields)
/// section of the binary Ion spec for more details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarUInt {
    value: usize,
    size_in_bytes: usize,
}

impl VarUInt {
    pub(crate) fn new(value: usize, size_in_bytes: usize) -> Self {
        VarUInt {
            value,
            size_in_bytes,
        }
    }

    /// Returns the number of bytes needed to encode `magnitude` as a VarUInt.
    pub fn encoded_length(magnitude: u64) -> usize {
        let significant_bits = u64::BITS - magnitude.leading_zeros();
        // Zero still occupies one byte.
        (significant_bits.max(1)).div_ceil(BITS_PER_ENCODED_BYTE) as usize
    }

    /// Encodes the given unsigned int value as a VarUInt and writes it to the
    /// sink, returning the number of bytes written.
    pub fn write_u64<W: Write>(sink: &mut W, mut magnitude: u64) -> IonResult<usize> {
        // A u64 is 8 bytes of data. The VarUInt encoding will add a continuation bit to every byte,
        // growing the data size by 8 more bits. Therefore, the largest encoded size of a u64 is
        // 10 bytes.
        const VAR_UINT_BUFFER_SIZE: usize = 10;

        let mut buffer = [0u8; VAR_UINT_BUFFER_SIZE];
        let encoded_length = Self::encoded_length(magnitude);
        let first_byte = VAR_UINT_BUFFER_SIZE - encoded_length;

        // Fill the buffer right-to-left, 7 bits at a time.
        for buffer_byte in buffer[first_byte..].iter_mut().rev() {
            *buffer_byte = magnitude as u8 & LOWER_7_BITMASK;
            magnitude >>= BITS_PER_ENCODED_BYTE;
        }
        buffer[VAR_UINT_BUFFER_SIZE - 1] |= END_FLAG;

        let encoded_bytes = &buffer[first_byte..];
        sink.write_all(encoded_bytes)?;
        Ok(encoded_bytes.len())
    }

    /// Returns the magnitude of the unsigned integer
    #[inline(always)]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns the number of bytes that were read from the data source to construct this
    /// unsigned integer
    #[inline(always)]
    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }
}
