use std::borrow::Cow;
use thiserror::Error;

/// Indicates that the bytes backing a value could not be interpreted as Ion binary data.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{description}")]
pub struct DecodingError {
    description: Cow<'static, str>,
}

impl DecodingError {
    pub(crate) fn new(description: impl Into<Cow<'static, str>>) -> Self {
        DecodingError {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_ref()
    }
}
