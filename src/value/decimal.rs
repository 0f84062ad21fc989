use std::convert::TryFrom;

use bigdecimal::BigDecimal;

use crate::binary::DecimalCodec;
use crate::result::{illegal_operation, IonResult};
use crate::types::Decimal;
use crate::value::ValueNode;

/// A lazily materialized Ion decimal.
pub type DecimalNode = ValueNode<DecimalCodec>;

/// Distinguishes decimal values that numeric comparison alone cannot tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Normal,
    NegativeZero,
}

impl ValueNode<DecimalCodec> {
    /// Returns a copy of the decimal value, or a `NullValue` error for `null.decimal`.
    pub fn decimal_value(&mut self) -> IonResult<Decimal> {
        self.value().cloned()
    }

    /// The closest `f64` to this decimal. Negative zero stays negative.
    pub fn f64_value(&mut self) -> IonResult<f64> {
        Ok(self.value()?.to_f64())
    }

    pub fn f32_value(&mut self) -> IonResult<f32> {
        Ok(self.value()?.to_f64() as f32)
    }

    /// Converts the decimal to a [`BigDecimal`]. `BigDecimal` has no negative zero, so that
    /// value is rejected with an `IllegalOperation` error.
    pub fn bigdecimal_value(&mut self) -> IonResult<BigDecimal> {
        BigDecimal::try_from(self.decimal_value()?)
    }

    pub fn set_i64(&mut self, value: i64) -> IonResult<()> {
        self.set_value(Decimal::from(value))
    }

    /// Sets the value from a float. The conversion picks its own precision; `-0.0` becomes a
    /// negative zero and non-finite values are rejected.
    pub fn set_f64(&mut self, value: f64) -> IonResult<()> {
        self.set_value(Decimal::try_from(value)?)
    }

    pub fn set_f32(&mut self, value: f32) -> IonResult<()> {
        self.set_value(Decimal::try_from(value)?)
    }

    /// Sets the value according to `classification`. A `NegativeZero` requires a zero input and
    /// stores negative zero at the input's exponent.
    pub fn set_value_with_classification(
        &mut self,
        value: Decimal,
        classification: Classification,
    ) -> IonResult<()> {
        let value = match classification {
            Classification::Normal => value,
            Classification::NegativeZero if value.is_zero() => {
                Decimal::negative_zero_with_exponent(value.exponent())
            }
            Classification::NegativeZero => {
                return illegal_operation(format!(
                    "to be a negative zero the value must be zero, found {value}"
                ))
            }
        };
        self.set_value(value)
    }

    /// `NegativeZero` for a negative zero at any scale, `Normal` for everything else
    /// including `null.decimal`.
    pub fn classification(&mut self) -> IonResult<Classification> {
        let classification = match self.native_value()? {
            Some(value) if value.is_negative_zero() => Classification::NegativeZero,
            _ => Classification::Normal,
        };
        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::*;

    use super::*;
    use crate::binary::DecimalBinaryEncoder;
    use crate::ion_eq::IonEq;
    use crate::result::IonError;
    use crate::types::IonType;
    use crate::value::ValueState;

    fn encoded(decimal: &Decimal) -> Arc<[u8]> {
        let mut bytes = vec![];
        bytes.encode_decimal_value(decimal).unwrap();
        bytes.into()
    }

    fn positioned(bytes: &[u8]) -> DecimalNode {
        DecimalNode::positioned(Arc::from(bytes), 0).unwrap()
    }

    #[test]
    fn positioned_node_materializes_lazily() -> IonResult<()> {
        let mut node = positioned(&[0x52, 0xC1, 0x7B]);
        assert!(!node.has_native_value());
        assert!(!node.is_dirty());
        assert!(!node.is_null());
        assert!(node.span().is_some());

        assert!(node.decimal_value()?.ion_eq(&Decimal::new(123, -1)));
        assert!(node.has_native_value());
        assert!(!node.is_dirty());
        assert!(node.span().is_none());
        Ok(())
    }

    #[test]
    fn materializing_twice_is_idempotent() -> IonResult<()> {
        let mut node = positioned(&encoded(&Decimal::new(-80, -3)));
        node.materialize()?;
        let first = node.decimal_value()?;
        node.materialize()?;
        let second = node.decimal_value()?;
        assert!(first.ion_eq(&second));
        assert!(!node.is_dirty());
        Ok(())
    }

    #[test]
    fn set_value_then_materialize_keeps_the_new_value() -> IonResult<()> {
        let mut node = positioned(&encoded(&Decimal::new(1, 0)));
        node.set_value(Decimal::new(2, 0))?;
        assert!(node.is_dirty());
        node.materialize()?;
        assert!(node.is_dirty());
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(2, 0)));
        Ok(())
    }

    #[test]
    fn null_is_answered_from_the_type_descriptor() -> IonResult<()> {
        let mut node = positioned(&[0x5F]);
        assert!(node.is_null());
        assert!(!node.has_native_value());
        assert_eq!(
            node.decimal_value(),
            Err(IonError::NullValue(crate::result::NullValueError::new(
                IonType::Decimal
            )))
        );
        assert!(node.has_native_value());
        assert!(node.is_null());
        assert_eq!(node.classification()?, Classification::Normal);
        Ok(())
    }

    #[rstest]
    #[case::f64(|node: &mut DecimalNode| node.f64_value().map(|_| ()))]
    #[case::f32(|node: &mut DecimalNode| node.f32_value().map(|_| ()))]
    #[case::big_decimal(|node: &mut DecimalNode| node.bigdecimal_value().map(|_| ()))]
    fn null_accessors_fail(#[case] accessor: fn(&mut DecimalNode) -> IonResult<()>) {
        let mut node = DecimalNode::new_null();
        assert!(matches!(accessor(&mut node), Err(IonError::NullValue(_))));
    }

    #[test]
    fn zero_length_code_is_zero_without_reading_content() -> IonResult<()> {
        // Nothing follows the type descriptor.
        let mut node = positioned(&[0x50]);
        assert!(node.decimal_value()?.ion_eq(&Decimal::ZERO));
        Ok(())
    }

    #[test]
    fn var_uint_length_is_read() -> IonResult<()> {
        let value = Decimal::new(i64::MAX, -30);
        let mut bytes = vec![];
        bytes.encode_decimal_value(&Decimal::new(i128::MAX, -30))?;
        assert_eq!(bytes[0], 0x5E);
        let mut node = positioned(&bytes);
        assert!(node.decimal_value()? > value);
        Ok(())
    }

    #[test]
    fn wrong_type_code_is_a_decoding_error() {
        // 0x21 is a one-byte positive int.
        let mut node = positioned(&[0x21, 0x01]);
        assert!(matches!(node.materialize(), Err(IonError::Decoding(_))));
        assert!(!node.has_native_value());
    }

    #[test]
    fn truncated_content_is_incomplete() {
        let mut node = positioned(&[0x53, 0xC1]);
        assert!(matches!(node.materialize(), Err(IonError::Incomplete(_))));
        assert!(DecimalNode::positioned(Arc::from(&[0x50][..]), 1).is_err());
    }

    #[test]
    fn locked_nodes_reject_mutation() -> IonResult<()> {
        let mut node = positioned(&encoded(&Decimal::new(5, 0)));
        node.lock();
        assert!(node.is_locked());
        assert!(matches!(
            node.set_value(Decimal::new(6, 0)),
            Err(IonError::IllegalOperation(_))
        ));
        assert!(matches!(node.set_null(), Err(IonError::IllegalOperation(_))));
        assert!(matches!(node.set_i64(1), Err(IonError::IllegalOperation(_))));
        assert!(matches!(
            node.reposition(Arc::from(&[0x50][..]), 0),
            Err(IonError::IllegalOperation(_))
        ));
        // Reading is still allowed.
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(5, 0)));
        Ok(())
    }

    #[test]
    fn setters_mark_the_node_dirty() -> IonResult<()> {
        let mut node = positioned(&[0x50]);
        node.set_i64(-42)?;
        assert!(node.is_dirty());
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(-42, 0)));

        node.set_f64(8.67)?;
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(867, -2)));

        node.set_f32(-0.0)?;
        assert_eq!(node.classification()?, Classification::NegativeZero);

        assert!(matches!(node.set_f64(f64::NAN), Err(IonError::IllegalOperation(_))));
        node.set_null()?;
        assert!(node.is_null());
        assert!(node.is_dirty());
        Ok(())
    }

    #[test]
    fn classification_setter() -> IonResult<()> {
        let mut node = DecimalNode::new_null();
        node.set_value_with_classification(Decimal::new(0, -3), Classification::NegativeZero)?;
        let value = node.decimal_value()?;
        assert!(value.is_negative_zero());
        assert_eq!(value.exponent(), -3);
        assert_eq!(node.classification()?, Classification::NegativeZero);

        assert!(matches!(
            node.set_value_with_classification(Decimal::new(1, 0), Classification::NegativeZero),
            Err(IonError::IllegalOperation(_))
        ));

        node.set_value_with_classification(Decimal::new(1, 0), Classification::Normal)?;
        assert_eq!(node.classification()?, Classification::Normal);
        Ok(())
    }

    #[rstest]
    #[case::smallest_exponent(i64::MIN)]
    #[case::largest_exponent(i64::MAX)]
    fn exponent_limits_do_not_panic(#[case] exponent: i64) -> IonResult<()> {
        let mut node = DecimalNode::positioned(encoded(&Decimal::new(12, exponent)), 0)?;
        let value = node.decimal_value()?;
        assert_eq!(value.exponent(), exponent);
        assert!(!value.to_string().is_empty());

        let big = node.bigdecimal_value();
        if exponent == i64::MIN {
            assert!(matches!(big, Err(IonError::IllegalOperation(_))));
        } else {
            assert!(big.is_ok());
        }

        let result = node.set_value_with_classification(value, Classification::NegativeZero);
        match result {
            Err(IonError::IllegalOperation(error)) => {
                assert!(error.operation().contains("9223372036854775807"))
            }
            other => panic!("expected an IllegalOperation error, found {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn float_accessors() -> IonResult<()> {
        let mut node = DecimalNode::new_with_value(Decimal::new(1225, -2));
        assert_eq!(node.f64_value()?, 12.25);
        assert_eq!(node.f32_value()?, 12.25f32);
        node.set_value(Decimal::negative_zero_with_exponent(-1))?;
        assert!(node.f64_value()?.is_sign_negative());
        assert!(matches!(node.bigdecimal_value(), Err(IonError::IllegalOperation(_))));
        Ok(())
    }

    #[rstest]
    #[case::null(None, 0, 0x0F)]
    #[case::zero(Some(Decimal::ZERO), 0, 0x00)]
    #[case::small(Some(Decimal::new(123, -1)), 2, 0x02)]
    #[case::negative_zero(Some(Decimal::negative_zero_with_exponent(-2)), 2, 0x02)]
    #[case::thirteen_bytes(Some(Decimal::new(0x7F_FFFF_FFFF_FFFF_FFFF_FFFF_i128, 1)), 13, 0x0D)]
    #[case::fourteen_bytes(Some(Decimal::new(0x7F_FFFF_FFFF_FFFF_FFFF_FFFF_FF_i128, 1)), 14, 0x0E)]
    fn encoded_length_and_low_nibble(
        #[case] value: Option<Decimal>,
        #[case] expected_length: usize,
        #[case] expected_nibble: u8,
    ) -> IonResult<()> {
        let node = match value {
            Some(value) => DecimalNode::new_with_value(value),
            None => DecimalNode::new_null(),
        };
        let length = node.compute_encoded_length()?;
        assert_eq!(length, expected_length);
        assert_eq!(node.compute_low_nibble(length)?, expected_nibble);
        let mut content = vec![];
        assert_eq!(node.write_content(&mut content, length)?, expected_length);
        assert_eq!(content.len(), expected_length);
        Ok(())
    }

    #[test]
    fn encoding_requires_a_native_value() {
        let node = positioned(&[0x50]);
        assert!(matches!(node.compute_encoded_length(), Err(IonError::IllegalOperation(_))));
        assert!(matches!(node.compute_low_nibble(0), Err(IonError::IllegalOperation(_))));
        assert!(matches!(
            node.write_content(&mut Vec::<u8>::new(), 0),
            Err(IonError::IllegalOperation(_))
        ));
    }

    #[test]
    fn mismatched_length_writes_nothing() {
        let node = DecimalNode::new_with_value(Decimal::new(123, -1));
        let mut sink = vec![];
        let result = node.write_content(&mut sink, 3);
        assert!(matches!(result, Err(IonError::Encoding(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn write_value_marks_the_node_clean() -> IonResult<()> {
        let mut node = DecimalNode::new_with_value(Decimal::negative_zero_with_exponent(-2));
        assert!(node.is_dirty());
        let mut sink = vec![];
        let written = node.write_value(&mut sink)?;
        assert_eq!(sink, vec![0x52, 0xC2, 0x80]);
        assert_eq!(written, 3);
        assert!(!node.is_dirty());

        let mut round_tripped = DecimalNode::positioned(sink.into(), 0)?;
        assert_eq!(round_tripped.classification()?, Classification::NegativeZero);
        assert_eq!(round_tripped.decimal_value()?.exponent(), -2);
        Ok(())
    }

    #[test]
    fn write_value_of_a_positioned_null() -> IonResult<()> {
        let mut node = positioned(&[0x5F]);
        let mut sink = vec![];
        node.write_value(&mut sink)?;
        assert_eq!(sink, vec![0x5F]);
        Ok(())
    }

    #[test]
    fn clone_value_is_dirty_and_unlocked() -> IonResult<()> {
        let mut node = positioned(&encoded(&Decimal::new(314, -2)));
        node.lock();
        let mut copy = node.clone_value()?;
        assert!(copy.is_dirty());
        assert!(!copy.is_locked());
        assert!(copy.span().is_none());
        assert!(copy.decimal_value()?.ion_eq(&Decimal::new(314, -2)));
        // The source was materialized to make the copy but is still clean.
        assert!(node.has_native_value());
        assert!(!node.is_dirty());

        copy.set_i64(1)?;
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(314, -2)));
        Ok(())
    }

    #[test]
    fn reposition_resets_materialization() -> IonResult<()> {
        let data: Arc<[u8]> = Arc::from(&[0x51, 0xC2, 0x52, 0x80, 0x07][..]);
        let mut node = DecimalNode::positioned(data.clone(), 0)?;
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(0, -2)));
        node.reposition(data, 2)?;
        assert!(matches!(node.state(), ValueState::Unmaterialized(_)));
        assert!(node.decimal_value()?.ion_eq(&Decimal::new(7, 0)));
        Ok(())
    }
}
