use std::borrow::Cow;
use thiserror::Error;

/// Indicates that a local symbol table declaration contained open content: a field, container
/// or scalar outside of the `imports`/`symbols` shape understood by the builder.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("unsupported content in symbol table declaration: {description}")]
pub struct UnsupportedStructureError {
    description: Cow<'static, str>,
}

impl UnsupportedStructureError {
    pub(crate) fn new(description: impl Into<Cow<'static, str>>) -> Self {
        UnsupportedStructureError {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_ref()
    }
}
