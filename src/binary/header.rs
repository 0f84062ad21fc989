use std::convert::TryFrom;
use std::io::Write;

use arrayvec::ArrayVec;

use crate::binary::constants::v1_0::length_codes;
use crate::binary::nibbles::{byte_from_nibbles, nibbles_from_byte};
use crate::binary::var_uint::VarUInt;
use crate::binary::IonTypeCode;
use crate::result::IonResult;

// One type descriptor byte followed by at most a 10-byte VarUInt.
const MAX_HEADER_SIZE: usize = 11;

/// Contains all of the information that can be extracted from the one-octet type descriptor
/// found at the beginning of each value in a binary Ion stream.
/// For more information, consult the
/// [Typed Value Formats](https://amazon-ion.github.io/ion-docs/docs/binary.html#typed-value-formats)
/// section of the binary Ion spec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub ion_type_code: IonTypeCode,
    pub length_code: u8,
}

impl Header {
    pub fn new(ion_type_code: IonTypeCode, length_code: u8) -> Header {
        Header {
            ion_type_code,
            length_code,
        }
    }

    /// Attempts to parse the provided byte. Every type code in 0..=15 is recognized, so this only
    /// fails if the nibble table itself is inconsistent.
    pub fn from_byte(byte: u8) -> IonResult<Header> {
        let (type_code, length_code) = nibbles_from_byte(byte);
        let ion_type_code = IonTypeCode::try_from(type_code)?;
        Ok(Header {
            ion_type_code,
            length_code,
        })
    }

    pub fn to_byte(self) -> u8 {
        byte_from_nibbles(self.ion_type_code.to_u8(), self.length_code)
    }

    pub fn is_null(&self) -> bool {
        self.length_code == length_codes::NULL
    }

    /// Builds the header for a value of type `ion_type_code` whose content is `content_length`
    /// bytes long. `None` means the value is a typed null.
    pub fn for_content_length(ion_type_code: IonTypeCode, content_length: Option<usize>) -> Header {
        Header::new(ion_type_code, length_code_for(content_length))
    }

    /// Writes the type descriptor, followed by `content_length` as a VarUInt if the length code
    /// calls for one. Returns the number of bytes written.
    pub fn write_to<W: Write>(self, sink: &mut W, content_length: usize) -> IonResult<usize> {
        let mut encoded: ArrayVec<u8, MAX_HEADER_SIZE> = ArrayVec::new();
        encoded.push(self.to_byte());
        if self.length_code == length_codes::VAR_UINT {
            VarUInt::write_u64(&mut encoded, content_length as u64)?;
        }
        sink.write_all(&encoded)?;
        Ok(encoded.len())
    }
}

/// Computes the low nibble of a type descriptor. Content that fits in
/// [`MAX_INLINE_LENGTH`](length_codes::MAX_INLINE_LENGTH) bytes stores its length directly;
/// anything longer uses the [`VAR_UINT`](length_codes::VAR_UINT) sentinel.
pub fn length_code_for(content_length: Option<usize>) -> u8 {
    match content_length {
        None => length_codes::NULL,
        Some(length) if length <= length_codes::MAX_INLINE_LENGTH as usize => length as u8,
        Some(_) => length_codes::VAR_UINT,
    }
}
