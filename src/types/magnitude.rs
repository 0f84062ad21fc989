use std::cmp::Ordering;

use num_bigint::{BigUint, ToBigUint};
use num_traits::{ToPrimitive, Zero};

/// An unsigned integer that can be combined with a [Sign](crate::types::coefficient::Sign)
/// to act as the coefficient of a [Decimal](crate::types::decimal::Decimal).
///
/// When possible, magnitudes are represented as a [u64] for efficiency. If the integer is too
/// large to fit in a u64, it is stored as a [BigUint] at the cost of allocations and runtime
/// complexity.
#[derive(Clone, Debug)]
pub enum Magnitude {
    U64(u64),
    BigUInt(BigUint),
}

impl PartialEq for Magnitude {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Magnitude {}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        use Magnitude::*;
        match (self, other) {
            (U64(m1), U64(m2)) => m1.cmp(m2),
            (BigUInt(m1), BigUInt(m2)) => m1.cmp(m2),
            (U64(m1), BigUInt(m2)) => Magnitude::cross_representation_cmp(*m1, m2),
            (BigUInt(m1), U64(m2)) => Magnitude::cross_representation_cmp(*m2, m1).reverse(),
        }
    }
}

impl Magnitude {
    /// Compares a [u64] integer with a [BigUint]. This method never allocates. It will always
    /// prefer to downgrade a BigUint and compare the two integers as u64 values. If this is
    /// not possible, then the BigUint is larger than the u64.
    fn cross_representation_cmp(m1: u64, m2: &BigUint) -> Ordering {
        // Try to downgrade the BigUint first since that's cheaper than upgrading the u64.
        if let Some(downgraded_m2) = m2.to_u64() {
            return m1.cmp(&downgraded_m2);
        }
        Ordering::Less
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Magnitude::U64(m) => *m == 0,
            Magnitude::BigUInt(m) => m.is_zero(),
        }
    }

    /// Returns the magnitude as a u64 if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Magnitude::U64(m) => Some(*m),
            Magnitude::BigUInt(m) => m.to_u64(),
        }
    }

    /// Returns the big-endian bytes of the magnitude with no leading zero bytes. Zero is
    /// represented by an empty Vec.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            Magnitude::U64(m) => {
                let bytes = m.to_be_bytes();
                let first_occupied_byte = (m.leading_zeros() / 8) as usize;
                bytes[first_occupied_byte..].to_vec()
            }
            Magnitude::BigUInt(m) if m.is_zero() => Vec::new(),
            Magnitude::BigUInt(m) => m.to_bytes_be(),
        }
    }

    /// Interprets `bytes` as a big-endian unsigned integer, choosing the compact representation
    /// when the value fits in a u64.
    pub fn from_be_bytes(bytes: &[u8]) -> Magnitude {
        BigUint::from_bytes_be(bytes).into()
    }

    /// Returns the number of base-10 digits needed to represent this magnitude. Zero has one digit.
    pub fn number_of_decimal_digits(&self) -> u64 {
        match self {
            Magnitude::U64(0) => 1,
            Magnitude::U64(m) => u64::from(m.ilog10()) + 1,
            Magnitude::BigUInt(m) if m.is_zero() => 1,
            Magnitude::BigUInt(m) => m.to_str_radix(10).len() as u64,
        }
    }
}

impl From<BigUint> for Magnitude {
    fn from(value: BigUint) -> Self {
        match value.to_u64() {
            Some(unsigned) => Magnitude::U64(unsigned),
            None => Magnitude::BigUInt(value),
        }
    }
}

impl From<Magnitude> for BigUint {
    fn from(value: Magnitude) -> Self {
        use Magnitude::*;
        match value {
            U64(m) => BigUint::from(m),
            BigUInt(m) => m,
        }
    }
}

impl From<&Magnitude> for BigUint {
    fn from(value: &Magnitude) -> Self {
        use Magnitude::*;
        match value {
            U64(m) => BigUint::from(*m),
            BigUInt(m) => m.clone(),
        }
    }
}

impl ToBigUint for Magnitude {
    fn to_biguint(&self) -> Option<BigUint> {
        // This implementation never fails, but the trait requires an `Option` return type.
        Some(self.into())
    }
}

// This macro makes it possible to turn unsigned int primitives into a Magnitude using `.into()`.
macro_rules! impl_magnitude_from_small_unsigned_int_types {
    ($($t:ty),*) => ($(
        impl From<$t> for Magnitude {
            fn from(value: $t) -> Magnitude {
                Magnitude::U64(value as u64)
            }
        }
    )*)
}

impl_magnitude_from_small_unsigned_int_types!(u8, u16, u32, u64, usize);

// The resulting Magnitude is the absolute value of the signed integer being converted.
macro_rules! impl_magnitude_from_small_signed_int_types {
    ($($t:ty),*) => ($(
        impl From<$t> for Magnitude {
            fn from(value: $t) -> Magnitude {
                Magnitude::U64(value.unsigned_abs() as u64)
            }
        }
    )*)
}

impl_magnitude_from_small_signed_int_types!(i8, i16, i32, i64, isize);

impl From<u128> for Magnitude {
    fn from(value: u128) -> Magnitude {
        BigUint::from(value).into()
    }
}

impl From<i128> for Magnitude {
    fn from(value: i128) -> Magnitude {
        BigUint::from(value.unsigned_abs()).into()
    }
}

#[cfg(test)]
mod magnitude_tests {
    use num_bigint::BigUint;
    use num_traits::Zero;
    use rstest::*;
    use std::cmp::Ordering;

    use crate::types::magnitude::Magnitude;

    #[rstest]
    #[case(0, 0)]
    #[case(-10, 10)]
    #[case(-7921i16, 7921u128)]
    #[case(BigUint::zero(), 0i64)]
    fn test_magnitude_equals(#[case] m1: impl Into<Magnitude>, #[case] m2: impl Into<Magnitude>) {
        assert_eq!(m1.into(), m2.into());
    }

    #[rstest]
    #[case(0, 1)]
    #[case(-9, 10)]
    #[case(-7922i16, 7921u128)]
    #[case(BigUint::zero(), 1i64)]
    fn test_magnitude_not_equals(
        #[case] m1: impl Into<Magnitude>,
        #[case] m2: impl Into<Magnitude>,
    ) {
        assert_ne!(m1.into(), m2.into());
    }

    #[rstest]
    #[case(0, Ordering::Equal, 0)]
    #[case(0, Ordering::Less, 1)]
    #[case(9, Ordering::Less, 10)]
    #[case(-11, Ordering::Greater, 10)]
    #[case(-7920i16, Ordering::Less, 7921u128)]
    #[case(u64::MAX, Ordering::Less, u128::MAX)]
    fn test_magnitude_compare(
        #[case] m1: impl Into<Magnitude>,
        #[case] ordering: Ordering,
        #[case] m2: impl Into<Magnitude>,
    ) {
        assert_eq!(m1.into().cmp(&m2.into()), ordering);
    }

    #[rstest]
    #[case(0u64, &[])]
    #[case(1u64, &[0x01])]
    #[case(0x1234u64, &[0x12, 0x34])]
    #[case(u64::MAX, &[0xFF; 8])]
    fn test_to_be_bytes(#[case] value: u64, #[case] expected: &[u8]) {
        assert_eq!(Magnitude::from(value).to_be_bytes(), expected);
        assert_eq!(Magnitude::BigUInt(BigUint::from(value)).to_be_bytes(), expected);
    }

    #[test]
    fn test_from_be_bytes_picks_compact_representation() {
        assert!(matches!(Magnitude::from_be_bytes(&[0x01, 0x00]), Magnitude::U64(256)));
        assert!(matches!(
            Magnitude::from_be_bytes(&[0x01; 9]),
            Magnitude::BigUInt(_)
        ));
    }

    #[rstest]
    #[case(0u64, 1)]
    #[case(9u64, 1)]
    #[case(10u64, 2)]
    #[case(99_999u64, 5)]
    #[case(u64::MAX, 20)]
    fn test_number_of_decimal_digits(#[case] value: u64, #[case] expected: u64) {
        assert_eq!(Magnitude::from(value).number_of_decimal_digits(), expected);
        assert_eq!(
            Magnitude::BigUInt(BigUint::from(value)).number_of_decimal_digits(),
            expected
        );
    }
}
