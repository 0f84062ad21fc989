use std::convert::TryFrom;

use crate::result::{decoding_error, IonError, IonResult};
use crate::types::IonType;

/// The type information found in the upper nibble of each binary Ion value's type descriptor.
///
/// This maps readily onto a user-level [`IonType`], but it also carries system-level
/// distinctions (the sign of an integer, annotation wrappers, reserved codes) that users never see.
///
/// See the
/// [Typed Value Formats](https://amazon-ion.github.io/ion-docs/docs/binary.html#typed-value-formats)
/// section of the binary Ion spec.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum IonTypeCode {
    NullOrNop = 0,
    Boolean = 1,
    PositiveInteger = 2,
    NegativeInteger = 3,
    Float = 4,
    Decimal = 5,
    Timestamp = 6,
    Symbol = 7,
    String = 8,
    Clob = 9,
    Blob = 10,
    List = 11,
    SExpression = 12,
    Struct = 13,
    AnnotationOrIvm = 14,
    Reserved = 15,
}

const TYPE_CODES: [IonTypeCode; 16] = {
    use IonTypeCode::*;
    [
        NullOrNop,
        Boolean,
        PositiveInteger,
        NegativeInteger,
        Float,
        Decimal,
        Timestamp,
        Symbol,
        String,
        Clob,
        Blob,
        List,
        SExpression,
        Struct,
        AnnotationOrIvm,
        Reserved,
    ]
};

impl IonTypeCode {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The user-level type this code encodes, if any.
    pub fn ion_type(self) -> Option<IonType> {
        use IonTypeCode::*;
        let ion_type = match self {
            NullOrNop => IonType::Null,
            Boolean => IonType::Bool,
            PositiveInteger | NegativeInteger => IonType::Int,
            Float => IonType::Float,
            Decimal => IonType::Decimal,
            Timestamp => IonType::Timestamp,
            Symbol => IonType::Symbol,
            String => IonType::String,
            Clob => IonType::Clob,
            Blob => IonType::Blob,
            List => IonType::List,
            SExpression => IonType::SExp,
            Struct => IonType::Struct,
            AnnotationOrIvm | Reserved => return None,
        };
        Some(ion_type)
    }
}

impl TryFrom<u8> for IonTypeCode {
    type Error = IonError;

    /// Any value greater than 15 will result in an Error.
    fn try_from(type_code: u8) -> Result<Self, Self::Error> {
        match TYPE_CODES.get(type_code as usize) {
            Some(code) => Ok(*code),
            None => decoding_error(format!("{type_code} is not a valid header type code.")),
        }
    }
}

impl TryFrom<IonTypeCode> for IonType {
    type Error = IonError;

    fn try_from(ion_type_code: IonTypeCode) -> IonResult<Self> {
        match ion_type_code.ion_type() {
            Some(ion_type) => Ok(ion_type),
            None => decoding_error(format!(
                "Attempted to make an IonType from an invalid type code: {ion_type_code:?}"
            )),
        }
    }
}
