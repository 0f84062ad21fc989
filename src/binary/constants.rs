/// Constants for Ion v1.0
pub mod v1_0 {
    /// Constants for interpreting the length (`L`) code of binary values
    pub mod length_codes {
        /// The value has no content bytes. Numeric types use this for zero.
        pub const ZERO: u8 = 0;
        /// The largest content length that fits directly in the length code.
        pub const MAX_INLINE_LENGTH: u8 = 13;
        /// The content length follows the type descriptor as a VarUInt.
        pub const VAR_UINT: u8 = 14;
        pub const NULL: u8 = 15;
    }

    /// The sign bit of the first byte of an `Int` field.
    pub const INT_SIGN_BIT: u8 = 0b1000_0000;
    /// An `Int` field holding negative zero: the sign bit with no magnitude.
    pub const INT_NEGATIVE_ZERO: u8 = INT_SIGN_BIT;
}
