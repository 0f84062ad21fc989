use std::convert::From;
use std::fmt::Debug;
use std::{fmt, io};

use thiserror::Error;

use crate::types::IonType;

pub use decoding_error::DecodingError;
pub use encoding_error::EncodingError;
pub use illegal_import::IllegalImportError;
pub use illegal_operation::IllegalOperation;
pub use incomplete::IncompleteError;
pub use io_error::IoError;
pub use null_value::NullValueError;
pub use unsupported_structure::UnsupportedStructureError;

pub mod decoding_error;
pub mod encoding_error;
pub mod illegal_import;
pub mod illegal_operation;
pub mod incomplete;
pub mod io_error;
pub mod null_value;
pub mod unsupported_structure;

/// A unified Result type representing the outcome of method calls that may fail.
pub type IonResult<T> = Result<T, IonError>;

/// Represents the different types of high-level failures that might occur when materializing,
/// encoding, or resolving Ion data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IonError {
    /// Indicates that an IO error was encountered while writing to a sink.
    #[error("{0}")]
    Io(#[from] IoError),

    /// Indicates that the buffer backing a value ended before the value did.
    #[error("{0}")]
    Incomplete(#[from] IncompleteError),

    /// Indicates that the encoder produced output that did not match the length it had
    /// previously computed for the same value. No bytes are emitted when this happens.
    #[error("{0}")]
    Encoding(#[from] EncodingError),

    /// Indicates that the data being read contained illegal or otherwise unreadable data.
    #[error("{0}")]
    Decoding(#[from] DecodingError),

    /// Returned when a native value was requested from a null.
    #[error("{0}")]
    NullValue(#[from] NullValueError),

    /// Returned when the user has performed an illegal operation (for example: mutating a
    /// locked value or interning into a read-only symbol table.)
    #[error("{0}")]
    IllegalOperation(#[from] IllegalOperation),

    /// Returned when a symbol table declaration contains content outside of its
    /// `imports`/`symbols` shape.
    #[error("{0}")]
    UnsupportedStructure(#[from] UnsupportedStructureError),

    /// Returned when a symbol table declaration contains an import that is missing
    /// its name, version, or max_id.
    #[error("{0}")]
    IllegalImport(#[from] IllegalImportError),
}

impl From<io::Error> for IonError {
    fn from(io_error: io::Error) -> Self {
        IoError::from(io_error).into()
    }
}

impl From<io::ErrorKind> for IonError {
    fn from(error_kind: io::ErrorKind) -> Self {
        // io::ErrorKind -> io::Error
        let io_error = io::Error::from(error_kind);
        // io::Error -> IoError -> IonError
        IoError::from(io_error).into()
    }
}

impl From<fmt::Error> for IonError {
    fn from(error: fmt::Error) -> Self {
        EncodingError::new(error.to_string()).into()
    }
}

pub(crate) fn incomplete<T>(label: &'static str, offset: usize) -> IonResult<T> {
    Err(incomplete_error(label, offset))
}

pub(crate) fn incomplete_error(label: &'static str, offset: usize) -> IonError {
    IncompleteError::new(label, offset).into()
}

/// A convenience method for creating an IonResult containing an IonError::Decoding with the
/// provided description text.
pub fn decoding_error<T, S: Into<String>>(description: S) -> IonResult<T> {
    Err(decoding_error_raw(description))
}

/// A convenience method for creating an IonError::Decoding with the provided description
/// text. Useful for calling Option#ok_or_else.
#[inline(never)]
pub(crate) fn decoding_error_raw<S: Into<String>>(description: S) -> IonError {
    DecodingError::new(description.into()).into()
}

/// A convenience method for creating an IonResult containing an IonError::Encoding with the
/// provided description text.
pub(crate) fn encoding_error<T, S: Into<String>>(description: S) -> IonResult<T> {
    Err(encoding_error_raw(description))
}

/// A convenience method for creating an IonError::Encoding with the provided description
/// text.
#[inline(never)]
pub(crate) fn encoding_error_raw<S: Into<String>>(description: S) -> IonError {
    EncodingError::new(description).into()
}

/// A convenience method for creating an IonResult containing an IonError::IllegalOperation with the
/// provided operation text.
pub fn illegal_operation<T, S: Into<String>>(operation: S) -> IonResult<T> {
    Err(illegal_operation_raw(operation))
}

/// A convenience method for creating an IonError::IllegalOperation with the provided operation
/// text. Useful for calling Option#ok_or_else.
#[inline(never)]
pub(crate) fn illegal_operation_raw<S: Into<String>>(operation: S) -> IonError {
    IllegalOperation::new(operation.into()).into()
}

/// Creates an `IonResult` containing an `IonError::NullValue` for a null of the given type.
pub(crate) fn null_value<T>(ion_type: IonType) -> IonResult<T> {
    Err(NullValueError::new(ion_type).into())
}

/// Creates an `IonResult` containing an `IonError::UnsupportedStructure` describing the
/// rejected content.
pub(crate) fn unsupported_structure<T, S: Into<String>>(description: S) -> IonResult<T> {
    Err(UnsupportedStructureError::new(description.into()).into())
}

/// Creates an `IonResult` containing an `IonError::IllegalImport` for the named import.
pub(crate) fn illegal_import<T>(name: Option<&str>, version: i64, max_id: i64) -> IonResult<T> {
    Err(IllegalImportError::new(name.map(str::to_owned), version, max_id).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_compare_by_kind() {
        let e1: IonError = io::ErrorKind::UnexpectedEof.into();
        let e2: IonError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        let e3: IonError = io::ErrorKind::BrokenPipe.into();
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
        assert_eq!(e1.clone(), e1);
    }

    #[test]
    fn illegal_import_names_the_import() {
        let error = illegal_import::<()>(Some("com.example.fruits"), 0, 12).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("com.example.fruits"), "{message}");
    }

    #[test]
    fn null_value_names_the_type() {
        let error = null_value::<()>(IonType::Decimal).unwrap_err();
        assert_eq!(error, IonError::NullValue(NullValueError::new(IonType::Decimal)));
        assert!(error.to_string().contains("decimal"));
    }
}
