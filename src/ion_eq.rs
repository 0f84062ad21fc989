use num_traits::Float;

/// Determines whether two values are equal according to Ion's definition of equivalence.
///
/// Ion equivalence is concerned with ensuring that no information is lost when values are written
/// to or read from a stream.
///
/// Two values may be considered equivalent by [PartialEq] but not considered equivalent by `IonEq`.
/// The decimal `0.0` equals `-0.0` numerically, and `1.0` equals `1.00`, but neither pair is Ion
/// equivalent: writing one in place of the other would lose the value's sign or its precision.
///
/// Corner case examples:
/// * `nan` and `nan` are Ion equivalent but not mathematically equivalent.
/// * `0.0e0` and `-0.0e0` are mathematically equivalent but not Ion equivalent.
/// * A null and a non-null value are never Ion equivalent.
pub trait IonEq {
    fn ion_eq(&self, other: &Self) -> bool;
}

fn float_ion_eq<F: Float>(this: F, other: F) -> bool {
    if this.is_nan() {
        return other.is_nan();
    }
    if this.is_zero() {
        return other.is_zero() && this.is_sign_negative() == other.is_sign_negative();
    }
    // For all other values, fall back to mathematical equivalence
    this == other
}

impl IonEq for f64 {
    fn ion_eq(&self, other: &Self) -> bool {
        float_ion_eq(*self, *other)
    }
}

impl IonEq for f32 {
    fn ion_eq(&self, other: &Self) -> bool {
        float_ion_eq(*self, *other)
    }
}

/// `None` stands in for an Ion null.
impl<T: IonEq> IonEq for Option<T> {
    fn ion_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(v1), Some(v2)) => v1.ion_eq(v2),
            (None, None) => true,
            _ => false,
        }
    }
}
