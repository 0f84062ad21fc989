use thiserror::Error;

use crate::types::IonType;

/// Indicates that a native value was requested from a value whose content is `null`.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("cannot read a native value from null.{ion_type}")]
pub struct NullValueError {
    ion_type: IonType,
}

impl NullValueError {
    pub(crate) fn new(ion_type: IonType) -> Self {
        NullValueError { ion_type }
    }

    pub fn ion_type(&self) -> IonType {
        self.ion_type
    }
}
