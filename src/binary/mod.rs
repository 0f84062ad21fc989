//! Encoding primitives of the binary Ion 1.0 format and the codecs built on them.

pub mod constants;

pub(crate) mod binary_buffer;
pub mod decimal;
pub mod header;
pub mod int;
pub(crate) mod nibbles;
pub(crate) mod type_code;
pub mod var_int;
pub mod var_uint;

pub use decimal::{DecimalBinaryEncoder, DecimalCodec};
pub use header::Header;
pub use type_code::IonTypeCode;
