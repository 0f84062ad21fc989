//! Splits a type descriptor byte into its component nibbles and joins them back together.

const MAX_NIBBLE_VALUE: u8 = 15;
const NIBBLE_SIZE_IN_BITS: u8 = 4;

/// Given a byte, will return a tuple containing the values of its left and right nibbles.
pub(crate) const fn nibbles_from_byte(byte: u8) -> (u8, u8) {
    let left = byte >> NIBBLE_SIZE_IN_BITS;
    let right = byte & 0b1111;
    (left, right)
}

/// Will join the given left and right nibbles into a new byte value.
pub(crate) const fn byte_from_nibbles(left: u8, right: u8) -> u8 {
    debug_assert!(left <= MAX_NIBBLE_VALUE);
    debug_assert!(right <= MAX_NIBBLE_VALUE);
    (left << NIBBLE_SIZE_IN_BITS) | (right & MAX_NIBBLE_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0b1111_1111, (0b1111, 0b1111))]
    #[case(0b0000_0000, (0b0000, 0b0000))]
    #[case(0b0101_1110, (0b0101, 0b1110))]
    #[case(0b0101_1111, (0b0101, 0b1111))]
    #[case(0b1010_0101, (0b1010, 0b0101))]
    fn nibbles_round_trip(#[case] byte: u8, #[case] nibbles: (u8, u8)) {
        assert_eq!(nibbles_from_byte(byte), nibbles);
        assert_eq!(byte_from_nibbles(nibbles.0, nibbles.1), byte);
    }
}
