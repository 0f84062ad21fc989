//! Types related to [`Decimal`], the in-memory representation of an Ion decimal value.

use std::cmp::Ordering;
use std::convert::{TryFrom, TryInto};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{Float, Zero};

use crate::ion_eq::IonEq;
use crate::result::{illegal_operation, illegal_operation_raw, IonError};
use crate::types::coefficient::{Coefficient, Sign};
use crate::types::magnitude::Magnitude;

/// An arbitrary-precision Decimal type with a distinct representation of negative zero (`-0`).
///
/// A `Decimal` can be thought of as a `(coefficient, exponent)` pair, and its value can be
/// calculated using the formula `coefficient * 10^exponent`.
///
/// ```
/// use ion_lazy_core::types::{Decimal, Sign};
/// // Equivalent to: 1225 * 10^-2, or 12.25
/// let decimal = Decimal::new(1225, -2);
/// assert_eq!(decimal.coefficient().sign(), Sign::Positive);
/// assert_eq!(decimal.exponent(), -2);
/// assert_eq!(decimal.scale(), 2);
/// ```
///
/// [`PartialEq`] compares numeric values: `1.0` equals `1.00` and `-0.` equals `0.`. Use
/// [`IonEq`] when the exponent and the sign of zero must also match.
#[derive(Clone, Debug)]
pub struct Decimal {
    pub(crate) coefficient: Coefficient,
    pub(crate) exponent: i64,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        coefficient: Coefficient::ZERO,
        exponent: 0,
    };

    pub const NEGATIVE_ZERO: Decimal = Decimal {
        coefficient: Coefficient::NEGATIVE_ZERO,
        exponent: 0,
    };

    /// Constructs a new Decimal with the provided components. The value of the decimal is:
    ///    `coefficient * 10^exponent`
    pub fn new<C: Into<Coefficient>, E: Into<i64>>(coefficient: C, exponent: E) -> Decimal {
        Decimal {
            coefficient: coefficient.into(),
            exponent: exponent.into(),
        }
    }

    /// Returns this `Decimal`'s coefficient.
    pub fn coefficient(&self) -> &Coefficient {
        &self.coefficient
    }

    /// Returns this `Decimal`'s exponent.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Returns the scale of the Decimal value.
    /// If zero or positive, a scale indicates the number of digits to the right of the decimal point.
    /// If negative, the unscaled value of the number is multiplied by ten to the power of the negation of the scale.
    /// For example, a scale of -3 means the unscaled value is multiplied by 1000.
    ///
    /// The scale of an exponent of `i64::MIN` does not fit in an `i64`, so it is widened.
    pub fn scale(&self) -> i128 {
        -i128::from(self.exponent)
    }

    /// Returns the number of digits in the non-scaled integer representation of the decimal.
    pub fn precision(&self) -> u64 {
        self.coefficient.magnitude().number_of_decimal_digits()
    }

    /// Constructs a Decimal with the value `-0d0`. This is provided as a convenience method
    /// because Rust will ignore a unary minus when it is applied to an zero literal (`-0`).
    pub fn negative_zero() -> Decimal {
        Decimal::negative_zero_with_exponent(0)
    }

    /// Constructs a Decimal with a coefficient of `-0` and the specified exponent.
    pub fn negative_zero_with_exponent(exponent: i64) -> Decimal {
        Decimal {
            coefficient: Coefficient::negative_zero(),
            exponent,
        }
    }

    /// Returns `true` if this Decimal is a zero of any sign or exponent.
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Returns `true` if this Decimal is a zero whose sign is negative, regardless of exponent.
    pub fn is_negative_zero(&self) -> bool {
        self.coefficient.is_negative_zero()
    }

    /// Returns true if this Decimal's coefficient has a negative sign AND a magnitude greater than
    /// zero. Otherwise, returns false. (Negative zero returns false.)
    pub fn is_less_than_zero(&self) -> bool {
        self.coefficient.sign() == Sign::Negative && !self.coefficient.is_zero()
    }

    /// Converts this Decimal to the closest `f64`. Negative zero is preserved.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return if self.is_negative_zero() { -0f64 } else { 0f64 };
        }
        let digits = match self.coefficient.magnitude() {
            Magnitude::U64(m) => m.to_string(),
            Magnitude::BigUInt(m) => m.to_str_radix(10),
        };
        let sign = match self.coefficient.sign() {
            Sign::Negative => "-",
            Sign::Positive => "",
        };
        // The standard library's float parser rounds correctly; scaling by powi() would not.
        format!("{sign}{digits}e{}", self.exponent)
            .parse::<f64>()
            .unwrap_or(f64::NAN)
    }

    // Determines whether the first decimal value is greater than, equal to, or less than
    // the second decimal value.
    fn compare(d1: &Decimal, d2: &Decimal) -> Ordering {
        if d1.is_zero() && d2.is_zero() {
            // Ignore the sign/exponent if they're both some flavor of zero.
            return Ordering::Equal;
        }
        // Even if the exponents are wildly different, disagreement in the coefficient's signs
        // still tells us which value is bigger.
        let sign_cmp = d1.coefficient.sign().cmp(&d2.coefficient.sign());
        if sign_cmp != Ordering::Equal {
            return sign_cmp;
        }

        let ordering = Decimal::compare_magnitudes(d1, d2);

        if d1.coefficient.sign() == Sign::Positive {
            ordering
        } else {
            // If the values are both negative, reverse the magnitudes' ordering.
            // For example: -100 has a greater magnitude (i.e. absolute value) than -99,
            //              but -99 is the larger number.
            ordering.reverse()
        }
    }

    // Compare the magnitudes (absolute values) of the provided decimal values.
    fn compare_magnitudes(d1: &Decimal, d2: &Decimal) -> Ordering {
        if d1.exponent == d2.exponent {
            return d1.coefficient.magnitude().cmp(d2.coefficient.magnitude());
        }

        // If the exponents don't match, we need to scale one of the magnitudes to match the other
        // for comparison. For example, when comparing 16e3 and 1600e1, we can't compare the
        // magnitudes (16 and 1600) directly. Instead, we need to multiply 16 by 10^2 to compensate
        // for the difference in their exponents (3-1).
        if d1.exponent > d2.exponent {
            Self::compare_scaled_coefficients(d1, d2)
        } else {
            Self::compare_scaled_coefficients(d2, d1).reverse()
        }
    }

    // Scales up the coefficient associated with a greater exponent and compares it with the
    // other coefficient. `d1` must have a larger exponent than `d2`.
    fn compare_scaled_coefficients(d1: &Decimal, d2: &Decimal) -> Ordering {
        let m1 = d1.coefficient.magnitude();
        let m2 = d2.coefficient.magnitude();
        if m1.is_zero() {
            return if m2.is_zero() {
                Ordering::Equal
            } else {
                Ordering::Less
            };
        }
        let exponent_delta = (d1.exponent as i128 - d2.exponent as i128) as u128;
        // A non-zero m1 scaled by 10^delta has more than `delta` digits. If that already
        // exceeds the number of digits in m2, there is no need to do the multiplication.
        if exponent_delta >= m2.number_of_decimal_digits() as u128 {
            return Ordering::Greater;
        }
        let scaled: BigUint = BigUint::from(m1) * BigUint::from(10u32).pow(exponent_delta as u32);
        Magnitude::from(scaled).cmp(m2)
    }

    /// Returns the `(negative, exponent, magnitude)` triple with all trailing decimal zeros
    /// moved from the magnitude into the exponent. Zeros of every sign and exponent share
    /// a single normal form.
    fn normalized(&self) -> (bool, i64, BigUint) {
        if self.is_zero() {
            return (false, 0, BigUint::zero());
        }
        let ten = BigUint::from(10u32);
        let mut magnitude = BigUint::from(self.coefficient.magnitude());
        let mut exponent = self.exponent;
        while (&magnitude % &ten).is_zero() {
            magnitude /= &ten;
            exponent = exponent.saturating_add(1);
        }
        (self.is_less_than_zero(), exponent, magnitude)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    // Consistent with `PartialEq`: numerically equal decimals share a normal form.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (is_negative, exponent, magnitude) = self.normalized();
        is_negative.hash(state);
        exponent.hash(state);
        magnitude.hash(state);
    }
}

impl IonEq for Decimal {
    fn ion_eq(&self, other: &Self) -> bool {
        self.exponent == other.exponent && self.coefficient == other.coefficient
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        Decimal::compare(self, other)
    }
}

macro_rules! impl_decimal_from_unsigned_primitive_integer {
    ($($t:ty),*) => ($(
        impl From<$t> for Decimal {
            fn from(value: $t) -> Self {
                Decimal::new(value as u64, 0)
            }
        }
    )*)
}
impl_decimal_from_unsigned_primitive_integer!(u8, u16, u32, u64, usize);

macro_rules! impl_decimal_from_signed_primitive_integer {
    ($($t:ty),*) => ($(
        impl From<$t> for Decimal {
            fn from(value: $t) -> Self {
                Decimal::new(Coefficient::from(value), 0)
            }
        }
    )*)
}
impl_decimal_from_signed_primitive_integer!(i8, i16, i32, i64, isize);

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        // BigDecimal's "exponent" is a scale: value = digits * 10^-scale
        // A scale of i64::MIN saturates to an exponent of i64::MAX.
        let (digits, scale) = value.into_bigint_and_exponent();
        Decimal::new(Coefficient::from(digits), scale.saturating_neg())
    }
}

impl TryFrom<Decimal> for BigDecimal {
    type Error = IonError;

    /// Attempts to create a BigDecimal from a Decimal. Returns an Error if the Decimal being
    /// converted is a negative zero, which BigDecimal cannot represent. Returns Ok otherwise.
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let scale = value.exponent.checked_neg().ok_or_else(|| {
            illegal_operation_raw(format!(
                "the scale of a Decimal with exponent {} does not fit in a BigDecimal",
                value.exponent
            ))
        })?;
        let digits: BigInt = value.coefficient.try_into()?;
        Ok(BigDecimal::new(digits, scale))
    }
}

/// Returns `true` if `value` is a zero with its sign bit set. Used when converting floating point
/// values into decimals, which are able to represent negative zero.
pub fn is_negative_zero<F: Float>(value: F) -> bool {
    value.is_zero() && value.is_sign_negative()
}

impl TryFrom<f32> for Decimal {
    type Error = IonError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        // Defer to the f64 implementation of `TryInto`
        (value as f64).try_into()
    }
}

impl TryFrom<f64> for Decimal {
    type Error = IonError;
    /// Attempts to create a Decimal from an f64. Returns an Error if the f64 being
    /// converted is a special value, including:
    ///   * Infinity
    ///   * Negative infinity
    ///   * NaN (not-a-number)
    ///
    /// Otherwise, returns Ok.
    ///
    /// Because Decimal can represent negative zero, `-0.0` IS supported.
    ///
    /// NOTE: This is an inherently lossy operation. Floating point values do not encode a
    ///       precision, so one is chosen for the resulting Decimal. Do NOT rely on the
    ///       precision of the result.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_infinite() {
            if value.is_sign_negative() {
                return illegal_operation("Cannot convert f64 negative infinity to Decimal.");
            }
            return illegal_operation("Cannot convert f64 infinity to Decimal.");
        } else if value.is_nan() {
            return illegal_operation("Cannot convert f64 NaN (not-a-number) to Decimal.");
        }

        // You can't use the `log10` operation on a zero value, so check for these cases explicitly.
        if value == 0f64 {
            if is_negative_zero(value) {
                return Ok(Decimal::NEGATIVE_ZERO);
            }
            return Ok(Decimal::ZERO);
        }

        // Integral values keep an exponent of zero for as long as an i128 coefficient can hold them.
        if value.fract().is_zero() {
            // The coefficient is an i128, allowing up to 38 decimal digits of precision.
            const MAX_DECIMAL_DIGITS: i64 = 38;
            let num_integral_decimal_digits = value.abs().log10().floor() as i64 + 1;
            let exponent = (num_integral_decimal_digits - MAX_DECIMAL_DIGITS).max(0);
            let integral_value = (value / 10f64.powi(exponent as i32)) as i128;
            return Ok(Decimal::new(integral_value, exponent));
        }

        // `{:e}` produces the shortest digit string that round-trips to the same f64, for
        // example `1.3371337e3`. Those digits become the coefficient.
        let text = format!("{:e}", value.abs());
        let (mantissa, exponent) = text
            .split_once('e')
            .ok_or_else(|| illegal_operation_raw(format!("unexpected f64 rendering: {text}")))?;
        let exponent: i64 = exponent
            .parse()
            .map_err(|_| illegal_operation_raw(format!("unexpected f64 exponent: {text}")))?;
        let (integral, fractional) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits = format!("{integral}{fractional}");
        let magnitude: u128 = digits
            .parse()
            .map_err(|_| illegal_operation_raw(format!("unexpected f64 digits: {text}")))?;
        let sign = if value.is_sign_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Ok(Decimal::new(
            Coefficient::new(sign, magnitude),
            exponent - fractional.len() as i64,
        ))
    }
}

impl Display for Decimal {
    #[rustfmt::skip] // https://github.com/rust-lang/rustfmt/issues/3255
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Inspired by the formatting conventions of Java's BigDecimal.toString()
        const WIDE_NUMBER: usize = 6;

        let digits = match self.coefficient.magnitude() {
            Magnitude::U64(m) => m.to_string(),
            Magnitude::BigUInt(m) => m.to_str_radix(10),
        };
        let len = digits.len();
        // The index of the decimal point, relative to the magnitude representation
        //       0123                                                       01234
        // Given ABCDd-2, the decimal gets inserted at position 2, yielding AB.CD
        // Widened so that exponents near the i64 limits cannot overflow.
        let dot_index = len as i128 + i128::from(self.exponent);

        if self.coefficient.sign() == Sign::Negative {
            write!(f, "-")?;
        };

        if self.exponent == 0 && len > WIDE_NUMBER { // e.g. A.BCDEFGd6
            write!(f, "{}.{}d{}", &digits[0..1], &digits[1..len], (dot_index - 1))
        } else if self.exponent == 0 { // e.g. ABC.
            write!(f, "{}.", &digits)
        } else if self.exponent >= 0 { // e.g. ABCd1
            write!(f, "{}d{}", &digits, self.exponent)
        } else if dot_index > 0 { // e.g. A.BC or AB.C
            let dot_index = dot_index as usize;
            write!(f, "{}.{}", &digits[0..dot_index], &digits[dot_index..len])
        } else if dot_index > -(WIDE_NUMBER as i128) { // e.g. 0.ABC or 0.000ABC
            let width = dot_index.unsigned_abs() as usize + len;
            write!(f, "0.{digits:0>width$}", width = width, digits = digits)
        } else { // e.g. A.BCd-12
            write!(f, "{}.{}d{}", &digits[0..1], &digits[1..len], (dot_index - 1))
        }
    }
}

#[cfg(test)]
mod decimal_tests {
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::convert::TryInto;
    use std::hash::{Hash, Hasher};
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use num_bigint::{BigInt, BigUint};
    use rstest::*;

    use crate::ion_eq::IonEq;
    use crate::result::{IonError, IonResult};
    use crate::types::coefficient::Coefficient;
    use crate::types::decimal::{is_negative_zero, Decimal};

    fn hash_of(decimal: &Decimal) -> u64 {
        let mut hasher = DefaultHasher::new();
        decimal.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case(Decimal::new(123, 1), "123d1")]
    #[case(Decimal::new(123, 0), "123.")]
    #[case(Decimal::new(-123,  0),"-123.")]
    #[case(Decimal::new( 123, -1),  "12.3")]
    #[case(Decimal::new( 123, -3),   "0.123")]
    #[case(Decimal::new(-123, -5),  "-0.00123")]
    #[case(Decimal::new( 123, -5),   "0.00123")]
    #[case(Decimal::new( 123, -10),  "1.23d-8")]
    #[case(Decimal::new(-123, -10), "-1.23d-8")]
    #[case(Decimal::negative_zero_with_exponent(-2), "-0.00")]
    #[case(Decimal::new(1, i64::MAX), "1d9223372036854775807")]
    #[case(Decimal::new(-42, i64::MIN), "-4.2d-9223372036854775807")]
    #[case(Decimal::new(7, i64::MIN), "7.d-9223372036854775808")]
    fn test_display(#[case] decimal: Decimal, #[case] expected: &str) {
        assert_eq!(decimal.to_string(), expected);
    }

    #[test]
    fn test_decimal_eq_negative_zeros() {
        // Decimal zeros of any sign/exponent are mathematically equal.
        assert_eq!(Decimal::negative_zero(), Decimal::negative_zero());
        assert_eq!(
            Decimal::negative_zero_with_exponent(2),
            Decimal::negative_zero_with_exponent(7)
        );
        assert_eq!(Decimal::new(0, 0), Decimal::negative_zero());
    }

    #[test]
    fn test_decimal_ion_eq_negative_zeros() {
        // To be IonEq, decimal zeros must have the same sign and exponent.
        assert!(Decimal::negative_zero().ion_eq(&Decimal::negative_zero()));
        assert!(!Decimal::negative_zero_with_exponent(2)
            .ion_eq(&Decimal::negative_zero_with_exponent(7)));
        assert!(!Decimal::new(0, 0).ion_eq(&Decimal::negative_zero()));
        assert!(!Decimal::new(0, -2).ion_eq(&Decimal::negative_zero_with_exponent(-2)));
    }

    #[rstest]
    #[case((80, 2), (80, 2), true)]
    #[case((124, -2), (124, -2), true)]
    #[case((-124, -2), (-124, -2), true)]
    #[case((124, -2), (1240, -3), false)]
    #[case((0, -2), (0, -3), false)]
    #[case((0, 2), (0, 5), false)]
    fn test_decimal_ion_eq(
        #[case] components1: (i64, i64),
        #[case] components2: (i64, i64),
        #[case] ion_eq_expected: bool,
    ) {
        let decimal1 = Decimal::new(components1.0, components1.1);
        let decimal2 = Decimal::new(components2.0, components2.1);
        assert_eq!(decimal1.ion_eq(&decimal2), ion_eq_expected);
    }

    #[rstest]
    // Positive numbers
    #[case((80, 3), Ordering::Equal,   (80, 3))]
    #[case((80, 3), Ordering::Greater, (79, 3))]
    #[case((80, 3), Ordering::Less,    (81, 3))]
    #[case((80, 3), Ordering::Greater, (80, 2))]
    #[case((80, 3), Ordering::Less,    (80, 4))]
    #[case((80, 3), Ordering::Equal,   (8, 4))]
    #[case((80, 3), Ordering::Equal,   (800, 2))]
    // Negative numbers
    #[case((-80, 3), Ordering::Equal,   (-80, 3))]
    #[case((-80, 3), Ordering::Less,    (-79, 3))]
    #[case((-80, 3), Ordering::Greater, (-81, 3))]
    #[case((-80, 3), Ordering::Less,    (-80, 2))]
    #[case((-80, 3), Ordering::Equal,   (-800, 2))]
    // Zeros
    #[case((0, 3), Ordering::Greater, (-1, 3))]
    #[case((0, 3), Ordering::Less,    (1, 3))]
    #[case((0, 3), Ordering::Equal,   (0, -2))]
    // Other interesting numbers
    #[case((-1000, -1), Ordering::Less, (-99_999_999_999i64, -9))]
    #[case((1000, -1), Ordering::Greater, (99_999_999_999i64, -9))]
    #[case((1, 400), Ordering::Greater, (i64::MAX, -3))]
    fn test_decimal_ord(
        #[case] components1: (i64, i64),
        #[case] ordering: Ordering,
        #[case] components2: (i64, i64),
    ) {
        let decimal1 = Decimal::new(components1.0, components1.1);
        let decimal2 = Decimal::new(components2.0, components2.1);
        assert_eq!(decimal1.cmp(&decimal2), ordering);
        // Make sure the inverse relationship holds
        assert_eq!(decimal2.cmp(&decimal1), ordering.reverse());
    }

    #[test]
    fn test_negative_zero_ordering() {
        assert_eq!(Decimal::negative_zero().cmp(&Decimal::new(5, 0)), Ordering::Less);
        assert_eq!(Decimal::negative_zero().cmp(&Decimal::new(-5, 0)), Ordering::Greater);
    }

    #[rstest]
    #[case(10.0, Decimal::from(10))]
    #[case(1.0, Decimal::from(1))]
    #[case(0.0, Decimal::ZERO)]
    #[case(-0.0, Decimal::NEGATIVE_ZERO)]
    #[case(-10.0, Decimal::from(-10))]
    #[case((2i64.pow(53) - 1) as f64, Decimal::new(2i64.pow(53) - 1, 0))]
    #[case(8.67, Decimal::new(867, -2))]
    #[case(8.675309, Decimal::new(8675309, -6))]
    #[case(-8.6753, Decimal::new(-86753, -4))]
    #[case(0.24601, Decimal::new(24601, -5))]
    #[case(-0.2, Decimal::new(-2, -1))]
    #[case(1337.1337, Decimal::new(13371337, -4))]
    fn test_decimal_try_from_f64_ok(#[case] value: f64, #[case] expected: Decimal) {
        let actual: Decimal = value.try_into().unwrap();
        assert!(
            actual.ion_eq(&expected),
            "float {value}: actual {actual} != expected {expected}"
        );
    }

    #[rstest]
    #[case::positive_infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    #[case::nan(f64::NAN)]
    fn test_decimal_try_from_f64_err(#[case] value: f64) {
        let conversion_result: IonResult<Decimal> = value.try_into();
        assert!(conversion_result.is_err());
    }

    #[test]
    fn test_float_negative_zero_detection() {
        assert!(is_negative_zero(-0.0f64));
        assert!(is_negative_zero(-0.0f32));
        assert!(!is_negative_zero(0.0f64));
        assert!(!is_negative_zero(-1.0f64));
        assert!(!is_negative_zero(f64::NAN));
    }

    #[rstest]
    #[case(Decimal::new(23, -3), 3)]
    #[case(Decimal::new(23, 0), 0)]
    #[case(Decimal::new(23, 3), -3)]
    #[case(Decimal::negative_zero_with_exponent(2), -2)]
    #[case(Decimal::new(u64::MAX, -5), 5)]
    #[case(Decimal::new(7, i64::MIN), i128::from(i64::MAX) + 1)]
    #[case(Decimal::new(7, i64::MAX), -i128::from(i64::MAX))]
    fn test_scale(#[case] value: Decimal, #[case] expected: i128) {
        assert_eq!(value.scale(), expected)
    }

    #[rstest]
    #[case(Decimal::new(-24600, -3), 5)]
    #[case(Decimal::new(5, -3), 1)]
    #[case(Decimal::new(0, 2), 1)]
    #[case(Decimal::negative_zero_with_exponent(-2), 1)]
    #[case(Decimal::new(u64::MAX, 3), 20)]
    #[case(Decimal::new(i128::MAX, -2), 39)]
    fn test_precision(#[case] value: Decimal, #[case] expected: u64) {
        assert_eq!(value.precision(), expected);
    }

    #[rstest]
    #[case(Decimal::new(1225, -2), 12.25)]
    #[case(Decimal::new(-5, 1), -50.0)]
    #[case(Decimal::new(13371337, -4), 1337.1337)]
    fn test_to_f64(#[case] value: Decimal, #[case] expected: f64) {
        assert_eq!(value.to_f64(), expected);
    }

    #[test]
    fn test_to_f64_negative_zero() {
        let value = Decimal::negative_zero_with_exponent(-3).to_f64();
        assert!(is_negative_zero(value));
    }

    #[test]
    fn test_hash_is_consistent_with_eq() {
        let pairs = [
            (Decimal::new(124, -2), Decimal::new(1240, -3)),
            (Decimal::new(0, 0), Decimal::negative_zero_with_exponent(-4)),
            (Decimal::new(-80, 3), Decimal::new(-8, 4)),
            (
                Decimal::new(Coefficient::from(BigUint::from(7u32)), 2),
                Decimal::new(700u64, 0),
            ),
        ];
        for (d1, d2) in pairs {
            assert_eq!(d1, d2);
            assert_eq!(hash_of(&d1), hash_of(&d2), "{d1} and {d2}");
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(8)]
    #[case(1 << 10)]
    #[case(1 << 20)]
    fn test_hash_delta_collisions(#[case] delta: i64) {
        const ALLOWED_COLLISIONS: usize = 5;
        // 1337.1337, 1337.1337 + delta * 10^-4, ...
        let base = 13_371_337i64;
        let mut hashes = HashSet::new();
        let mut collisions = 0;
        for i in 0..10_000i64 {
            let decimal = Decimal::new(base + i * delta, -4);
            if !hashes.insert(hash_of(&decimal)) {
                collisions += 1;
            }
        }
        assert!(collisions <= ALLOWED_COLLISIONS, "delta {delta}: {collisions}");
    }

    #[test]
    fn test_big_decimal_conversions() -> IonResult<()> {
        let big = BigDecimal::from_str("-12.340").unwrap();
        let decimal = Decimal::from(big.clone());
        assert!(decimal.ion_eq(&Decimal::new(-12340, -3)));
        let round_tripped: BigDecimal = decimal.try_into()?;
        assert_eq!(round_tripped, big);
        let negative_zero: Result<BigDecimal, _> = Decimal::negative_zero().try_into();
        assert!(negative_zero.is_err());
        Ok(())
    }

    #[test]
    fn test_big_decimal_conversions_at_exponent_limits() -> IonResult<()> {
        let smallest: Result<BigDecimal, _> = Decimal::new(1, i64::MIN).try_into();
        assert!(matches!(smallest, Err(IonError::IllegalOperation(_))));

        let largest: BigDecimal = Decimal::new(3, i64::MAX).try_into()?;
        let (digits, scale) = largest.into_bigint_and_exponent();
        assert_eq!(digits, BigInt::from(3));
        assert_eq!(scale, -i64::MAX);
        Ok(())
    }
}
