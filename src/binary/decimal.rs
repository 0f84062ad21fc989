use std::io::Write;

use crate::binary::binary_buffer::BinaryBuffer;
use crate::binary::header::Header;
use crate::binary::int::DecodedInt;
use crate::binary::var_int::VarInt;
use crate::binary::IonTypeCode;
use crate::result::{decoding_error_raw, encoding_error, IonError, IonResult};
use crate::types::{Decimal, IonType};
use crate::value::NativeCodec;

/// The binary codec for Ion decimals.
///
/// A decimal's content is a `VarInt` exponent followed by an `Int` coefficient. Positive zero
/// with an exponent of zero (`0d0`) has no content at all and is written with a length code of
/// `0`. Every other zero keeps its exponent, and negative zero keeps a lone sign byte as its
/// coefficient, so the scale and sign of a zero survive a round trip.
///
/// See the [decimal](https://amazon-ion.github.io/ion-docs/docs/binary.html#5-decimal)
/// section of the binary Ion spec.
#[derive(Debug, Clone, Copy)]
pub struct DecimalCodec;

impl DecimalCodec {
    fn is_empty_encoding(value: &Decimal) -> bool {
        value.is_zero() && !value.is_negative_zero() && value.exponent() == 0
    }
}

impl NativeCodec for DecimalCodec {
    type Native = Decimal;
    const TYPE_CODE: IonTypeCode = IonTypeCode::Decimal;
    const ION_TYPE: IonType = IonType::Decimal;

    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn encoded_length(value: &Decimal) -> usize {
        if Self::is_empty_encoding(value) {
            return 0;
        }
        VarInt::encoded_length(value.exponent()) + DecodedInt::encoded_length(value.coefficient())
    }

    fn decode(data: &[u8], offset: usize, length: usize) -> IonResult<Decimal> {
        if length == 0 {
            return Ok(Decimal::ZERO);
        }
        let end = offset + length;
        let mut buffer = BinaryBuffer::new_at(&data[..end.min(data.len())], offset);
        let exponent = buffer.read_var_int().map_err(|error| match error {
            IonError::Incomplete(_) if end <= data.len() => decoding_error_raw(format!(
                "decimal exponent at offset {offset} overran its {length}-byte value"
            )),
            other => other,
        })?;
        // Whatever follows the exponent is the coefficient. A lone 0x80 is negative zero.
        let coefficient = buffer.read_int(buffer.remaining())?;
        Ok(Decimal::new(coefficient.into_value(), exponent.value()))
    }

    fn write_content<W: Write>(sink: &mut W, value: &Decimal) -> IonResult<usize> {
        if Self::is_empty_encoding(value) {
            return Ok(0);
        }
        let exponent_length = VarInt::write_i64(sink, value.exponent())?;
        let coefficient_length = DecodedInt::write_coefficient(sink, value.coefficient())?;
        Ok(exponent_length + coefficient_length)
    }
}

/// Provides support to write [`Decimal`] into [Ion binary].
///
/// [Ion binary]: https://amazon-ion.github.io/ion-docs/docs/binary.html#5-decimal
pub trait DecimalBinaryEncoder {
    /// Encodes the content of a [`Decimal`] as per the Ion binary encoding.
    /// Returns the length of the encoded bytes.
    ///
    /// This does not encode the type descriptor nor the associated length.
    /// Prefer [`DecimalBinaryEncoder::encode_decimal_value`] for that.
    fn encode_decimal(&mut self, decimal: &Decimal) -> IonResult<usize>;

    /// Encodes a [`Decimal`] as an Ion value with the type descriptor and
    /// length. Returns the length of the encoded bytes.
    fn encode_decimal_value(&mut self, decimal: &Decimal) -> IonResult<usize>;
}

impl<W> DecimalBinaryEncoder for W
where
    W: Write,
{
    fn encode_decimal(&mut self, decimal: &Decimal) -> IonResult<usize> {
        DecimalCodec::write_content(self, decimal)
    }

    fn encode_decimal_value(&mut self, decimal: &Decimal) -> IonResult<usize> {
        // The length is computed up front so the header can be written before the content.
        let content_length = DecimalCodec::encoded_length(decimal);
        let header = Header::for_content_length(IonTypeCode::Decimal, Some(content_length));
        let header_length = header.write_to(self, content_length)?;
        let written = self.encode_decimal(decimal)?;
        if written != content_length {
            return encoding_error(format!(
                "decimal {decimal} was {written} bytes long, expected {content_length}"
            ));
        }
        Ok(header_length + written)
    }
}
