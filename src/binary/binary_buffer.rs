use crate::binary::constants::v1_0::length_codes;
use crate::binary::header::Header;
use crate::binary::int::DecodedInt;
use crate::binary::var_int::VarInt;
use crate::binary::var_uint::VarUInt;
use crate::result::{decoding_error, incomplete, incomplete_error, IonResult};

const LOWER_6_BITMASK: u8 = 0b0011_1111;
const LOWER_7_BITMASK: u8 = 0b0111_1111;
const HIGHEST_BIT_VALUE: u8 = 0b1000_0000;
const VAR_INT_SIGN_BIT: u8 = 0b0100_0000;

/// A stack-allocated wrapper around an `AsRef<[u8]>` that provides methods to read Ion's
/// encoding primitives.
///
/// Offsets reported in [`IonError::Incomplete`](crate::IonError::Incomplete) errors are
/// absolute positions within the wrapped data, even when the buffer was opened part way in.
#[derive(Debug, PartialEq)]
pub(crate) struct BinaryBuffer<A: AsRef<[u8]>> {
    data: A,
    start: usize,
    end: usize,
}

impl<A: AsRef<[u8]>> BinaryBuffer<A> {
    /// Constructs a new BinaryBuffer that wraps `data`.
    #[inline]
    pub fn new(data: A) -> BinaryBuffer<A> {
        Self::new_at(data, 0)
    }

    /// Constructs a BinaryBuffer over `data` whose first unread byte is at `offset`. An offset
    /// beyond the end of `data` produces an empty buffer.
    pub fn new_at(data: A, offset: usize) -> BinaryBuffer<A> {
        let end = data.as_ref().len();
        BinaryBuffer {
            data,
            start: offset.min(end),
            end,
        }
    }

    /// Returns a slice containing all of the buffer's remaining bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data.as_ref()[self.start..self.end]
    }

    /// Returns the absolute position of the next unread byte.
    pub fn position(&self) -> usize {
        self.start
    }

    /// Returns the number of unread bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if there are no bytes remaining in the buffer. Otherwise, returns `false`.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// If the buffer is not empty, returns `Some(_)` containing the next byte in the buffer.
    /// Otherwise, returns `None`.
    pub fn peek_next_byte(&self) -> Option<u8> {
        self.bytes().first().copied()
    }

    /// If there are at least `n` bytes left in the buffer, returns `Some(_)` containing a slice
    /// with the first `n` bytes. Otherwise, returns `None`.
    pub fn peek_n_bytes(&self, n: usize) -> Option<&[u8]> {
        self.bytes().get(..n)
    }

    /// Marks the first `num_bytes_to_consume` bytes in the buffer as having been read.
    ///
    /// Note that the various `read_*` methods to parse Ion encoding primitives automatically
    /// consume the bytes they read if they are successful.
    #[inline]
    pub fn consume(&mut self, num_bytes_to_consume: usize) {
        debug_assert!(num_bytes_to_consume <= self.remaining());
        self.start += num_bytes_to_consume;
    }

    /// Reads the first byte in the buffer as a type descriptor and consumes it.
    pub fn read_header(&mut self) -> IonResult<Header> {
        let byte = self
            .peek_next_byte()
            .ok_or_else(|| incomplete_error("a type descriptor", self.position()))?;
        let header = Header::from_byte(byte)?;
        self.consume(1);
        Ok(header)
    }

    /// Reads a `VarUInt` encoding primitive from the beginning of the buffer. If it is successful,
    /// returns an `Ok(_)` containing its [VarUInt] representation and consumes the source bytes.
    ///
    /// See: <https://amazon-ion.github.io/ion-docs/docs/binary.html#varuint-and-varint-fields>
    pub fn read_var_uint(&mut self) -> IonResult<VarUInt> {
        let mut magnitude: usize = 0;
        let mut encoded_size_in_bytes = 0;

        for byte in self.bytes().iter().copied() {
            encoded_size_in_bytes += 1;
            if magnitude > usize::MAX >> 7 {
                return Self::value_too_large("a VarUInt", encoded_size_in_bytes);
            }
            magnitude <<= 7; // Shifts 0 to 0 in the first iteration
            magnitude |= (LOWER_7_BITMASK & byte) as usize;
            if byte >= HIGHEST_BIT_VALUE {
                // This is the final byte.
                self.consume(encoded_size_in_bytes);
                return Ok(VarUInt::new(magnitude, encoded_size_in_bytes));
            }
        }

        incomplete("a VarUInt", self.position() + encoded_size_in_bytes)
    }

    /// Reads a `VarInt` encoding primitive from the beginning of the buffer. If it is successful,
    /// returns an `Ok(_)` containing its [VarInt] representation and consumes the source bytes.
    ///
    /// See: <https://amazon-ion.github.io/ion-docs/docs/binary.html#varuint-and-varint-fields>
    pub fn read_var_int(&mut self) -> IonResult<VarInt> {
        // Unlike VarUInt's encoding, the first byte in a VarInt is a special case because
        // bit #6 (0-indexed, from the right) indicates whether the value is positive (0) or
        // negative (1).
        let first_byte = self
            .peek_next_byte()
            .ok_or_else(|| incomplete_error("a VarInt", self.position()))?;
        let is_negative = first_byte & VAR_INT_SIGN_BIT == VAR_INT_SIGN_BIT;
        let mut magnitude = u64::from(first_byte & LOWER_6_BITMASK);
        let mut encoded_size_in_bytes = 1;
        let mut terminated = first_byte >= HIGHEST_BIT_VALUE;

        if !terminated {
            for byte in self.bytes()[1..].iter().copied() {
                encoded_size_in_bytes += 1;
                if magnitude > u64::MAX >> 7 {
                    return Self::value_too_large("a VarInt", encoded_size_in_bytes);
                }
                magnitude <<= 7;
                magnitude |= u64::from(LOWER_7_BITMASK & byte);
                if byte >= HIGHEST_BIT_VALUE {
                    terminated = true;
                    break;
                }
            }
        }

        if !terminated {
            return incomplete("a VarInt", self.position() + encoded_size_in_bytes);
        }

        let value = match (is_negative, i64::try_from(magnitude)) {
            (false, Ok(value)) => value,
            (true, Ok(value)) => -value,
            // The one magnitude that only fits when negated.
            (true, Err(_)) if magnitude == i64::MIN.unsigned_abs() => i64::MIN,
            _ => return Self::value_too_large("a VarInt", encoded_size_in_bytes),
        };

        self.consume(encoded_size_in_bytes);
        Ok(VarInt::new(value, is_negative, encoded_size_in_bytes))
    }

    /// Reads the first `length` bytes from the buffer as an `Int` encoding primitive. If it is
    /// successful, returns an `Ok(_)` containing its [DecodedInt] representation and consumes the
    /// source bytes.
    ///
    /// See: <https://amazon-ion.github.io/ion-docs/docs/binary.html#uint-and-int-fields>
    pub fn read_int(&mut self, length: usize) -> IonResult<DecodedInt> {
        let int_bytes = self
            .peek_n_bytes(length)
            .ok_or_else(|| incomplete_error("an Int encoding primitive", self.position()))?;
        let int = DecodedInt::from_bytes(int_bytes)?;
        self.consume(length);
        Ok(int)
    }

    /// Interprets a type descriptor's `L` nibble (length) in the way used by most Ion types.
    ///
    /// If `L` is...
    ///   * `f`: the value is a typed `null` and its length is `0`.
    ///   * `e`: the length is encoded as a `VarUInt` that follows the type descriptor.
    ///   * anything else: the `L` represents the actual length.
    ///
    /// If successful, returns an `Ok(_)` that contains the [VarUInt] representation
    /// of the value's length and consumes any additional bytes read. If no additional bytes were
    /// read, the returned `VarUInt`'s `size_in_bytes()` method will return `0`.
    pub fn read_length(&mut self, length_code: u8) -> IonResult<VarUInt> {
        let length = match length_code {
            length_codes::NULL => VarUInt::new(0, 0),
            length_codes::VAR_UINT => self.read_var_uint()?,
            magnitude => VarUInt::new(magnitude as usize, 0),
        };
        Ok(length)
    }

    #[inline(never)]
    fn value_too_large<T>(label: &str, length: usize) -> IonResult<T> {
        decoding_error(format!(
            "found {label} that was too large to represent; size = {length}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::IonTypeCode;
    use crate::result::IonError;
    use crate::types::Coefficient;

    #[test]
    fn read_var_uint() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0b0111_1001, 0b0000_1111, 0b1000_0001]);
        let var_uint = buffer.read_var_uint()?;
        assert_eq!(3, var_uint.size_in_bytes());
        assert_eq!(1_984_385, var_uint.value());
        assert!(buffer.is_empty());
        Ok(())
    }

    #[test]
    fn read_incomplete_var_uint() {
        let mut buffer = BinaryBuffer::new_at(&[0xFF, 0b0111_1001, 0b0000_1111], 1);
        match buffer.read_var_uint() {
            Err(IonError::Incomplete(e)) => assert_eq!(e.offset(), 3),
            other => panic!("expected an incomplete error, found {other:?}"),
        }
        // Nothing was consumed
        assert_eq!(buffer.position(), 1);
    }

    #[test]
    fn read_var_uint_overflow_detection() {
        let mut buffer = BinaryBuffer::new(&[
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b0111_1111,
            0b1111_1111,
        ]);
        assert!(matches!(buffer.read_var_uint(), Err(IonError::Decoding(_))));
    }

    #[test]
    fn read_negative_var_int() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0b0111_1001, 0b0000_1111, 0b1000_0001]);
        let var_int = buffer.read_var_int()?;
        assert_eq!(var_int.size_in_bytes(), 3);
        assert_eq!(var_int.value(), -935_809);
        assert!(var_int.is_negative());
        Ok(())
    }

    #[test]
    fn read_var_int_negative_zero() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0b1100_0000]);
        let var_int = buffer.read_var_int()?;
        assert_eq!(var_int.value(), 0);
        assert!(var_int.is_negative());
        Ok(())
    }

    #[test]
    fn read_var_int_extremes() -> IonResult<()> {
        for value in [i64::MIN, i64::MAX, -8_191, 8_191] {
            let mut encoded = vec![];
            VarInt::write_i64(&mut encoded, value)?;
            let mut buffer = BinaryBuffer::new(encoded.as_slice());
            assert_eq!(buffer.read_var_int()?.value(), value);
        }
        Ok(())
    }

    #[test]
    fn read_incomplete_var_int() {
        let mut buffer = BinaryBuffer::new(&[0b0011_1001, 0b0000_1111]);
        assert!(matches!(buffer.read_var_int(), Err(IonError::Incomplete(_))));
        let mut empty = BinaryBuffer::new(&[0u8; 0]);
        assert!(matches!(empty.read_var_int(), Err(IonError::Incomplete(_))));
    }

    #[test]
    fn read_int_negative_zero() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0b1000_0000]);
        let int = buffer.read_int(1)?;
        assert_eq!(int.size_in_bytes(), 1);
        assert!(int.is_negative_zero());
        Ok(())
    }

    #[test]
    fn read_int_length_zero() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0b1000_0000]);
        let int = buffer.read_int(0)?;
        assert_eq!(int.size_in_bytes(), 0);
        assert_eq!(int.value(), &Coefficient::ZERO);
        assert_eq!(buffer.remaining(), 1);
        Ok(())
    }

    #[test]
    fn read_incomplete_int() {
        let mut buffer = BinaryBuffer::new(&[0b1000_0001]);
        assert!(matches!(buffer.read_int(2), Err(IonError::Incomplete(_))));
    }

    #[test]
    fn read_header_and_length() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0x5E, 0x8F, 0xFF]);
        let header = buffer.read_header()?;
        assert_eq!(header.ion_type_code, IonTypeCode::Decimal);
        let length = buffer.read_length(header.length_code)?;
        assert_eq!(length.value(), 15);
        assert_eq!(length.size_in_bytes(), 1);
        assert_eq!(buffer.position(), 2);
        Ok(())
    }

    #[test]
    fn read_inline_and_null_lengths() -> IonResult<()> {
        let mut buffer = BinaryBuffer::new(&[0u8; 0]);
        assert_eq!(buffer.read_length(3)?, VarUInt::new(3, 0));
        assert_eq!(buffer.read_length(length_codes::NULL)?, VarUInt::new(0, 0));
        assert!(matches!(buffer.read_header(), Err(IonError::Incomplete(_))));
        Ok(())
    }
}
