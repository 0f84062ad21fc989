use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::result::{illegal_operation, IonError};
use crate::types::magnitude::Magnitude;
use std::convert::TryFrom;
use std::ops::Neg;

/// Indicates whether the Coefficient's magnitude is less than 0 (negative) or not (positive).
/// When the magnitude is zero, the Sign can be used to distinguish between -0 and 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Sign {
    Negative,
    Positive,
}

/// A signed integer that can be used as the coefficient of a Decimal value. This type does not
/// consider `0` and `-0` to be equal and supports magnitudes of arbitrary size.
// These trait derivations rely closely on the manual implementations of PartialEq and Ord on
// [Magnitude].
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct Coefficient {
    sign: Sign,
    magnitude: Magnitude,
}

impl Coefficient {
    pub const ZERO: Coefficient = Coefficient {
        sign: Sign::Positive,
        magnitude: Magnitude::U64(0),
    };

    pub const NEGATIVE_ZERO: Coefficient = Coefficient {
        sign: Sign::Negative,
        magnitude: Magnitude::U64(0),
    };

    pub fn new<I: Into<Magnitude>>(sign: Sign, magnitude: I) -> Self {
        let magnitude = magnitude.into();
        Coefficient { sign, magnitude }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    pub fn negative_zero() -> Self {
        Self::NEGATIVE_ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_negative_zero(&self) -> bool {
        self.sign == Sign::Negative && self.magnitude.is_zero()
    }

    /// If the value can fit in an i64, return it as such. Negative zero is never returned;
    /// callers must check for it separately.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        if self.is_negative_zero() {
            return None;
        }
        let unsigned = self.magnitude.as_u64()?;
        let signed = i64::try_from(unsigned).ok()?;
        match self.sign {
            Sign::Negative => Some(signed.neg()), // cannot overflow (never `MIN`)
            Sign::Positive => Some(signed),
        }
    }
}

// This macro makes it possible to turn unsigned integers into a Coefficient using `.into()`.
macro_rules! impl_coefficient_from_unsigned_int_types {
    ($($t:ty),*) => ($(
        impl From<$t> for Coefficient {
            fn from(value: $t) -> Coefficient {
                Coefficient::new(Sign::Positive, value)
            }
        }
    )*)
}
impl_coefficient_from_unsigned_int_types!(u8, u16, u32, u64, u128, usize, BigUint);

// This macro makes it possible to turn signed integers into a Coefficient using `.into()`.
macro_rules! impl_coefficient_from_signed_int_types {
    ($($t:ty),*) => ($(
        impl From<$t> for Coefficient {
            fn from(value: $t) -> Coefficient {
                let sign = if value < <$t>::zero() { Sign::Negative } else { Sign::Positive };
                Coefficient::new(sign, value)
            }
        }
    )*)
}
impl_coefficient_from_signed_int_types!(i8, i16, i32, i64, i128, isize);

impl From<BigInt> for Coefficient {
    fn from(value: BigInt) -> Self {
        let sign = match value.sign() {
            num_bigint::Sign::Minus => Sign::Negative,
            _ => Sign::Positive,
        };
        Coefficient::new(sign, value.magnitude().clone())
    }
}

// `BigInt` can't represent -0, so this is technically a lossy operation.
impl TryFrom<Coefficient> for BigInt {
    type Error = IonError;

    /// Attempts to create a BigInt from a Coefficient. Returns an Error if the Coefficient being
    /// converted is a negative zero, which BigInt cannot represent. Returns Ok otherwise.
    fn try_from(value: Coefficient) -> Result<Self, Self::Error> {
        if value.is_negative_zero() {
            illegal_operation("Cannot convert negative zero Decimal to BigDecimal")?;
        }
        let sign = match value.sign {
            Sign::Negative => num_bigint::Sign::Minus,
            Sign::Positive => num_bigint::Sign::Plus,
        };
        Ok(BigInt::from_biguint(sign, value.magnitude.into()))
    }
}
