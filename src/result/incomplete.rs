use std::borrow::Cow;
use thiserror::Error;

/// Indicates that there was not enough data available in the buffer backing a value to complete
/// the requested read.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("ran out of input while reading {label} at offset {offset}")]
pub struct IncompleteError {
    label: Cow<'static, str>,
    offset: usize,
}

impl IncompleteError {
    pub(crate) fn new(label: impl Into<Cow<'static, str>>, offset: usize) -> Self {
        IncompleteError {
            label: label.into(),
            offset,
        }
    }

    /// The offset into the buffer at which the missing data was expected.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
