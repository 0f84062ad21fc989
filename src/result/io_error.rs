use std::io;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
#[error("{source:?}")]
pub struct IoError {
    // io::Error does not implement Clone, so it is shared behind an Arc.
    source: Arc<io::Error>,
}

impl IoError {
    pub fn source(&self) -> &io::Error {
        self.source.as_ref()
    }
}

impl From<io::Error> for IoError {
    fn from(source: io::Error) -> Self {
        IoError {
            source: Arc::new(source),
        }
    }
}

// io::Error does not implement PartialEq. Comparing ErrorKinds offers a weak definition of
// equality that is enough to use IonResult values in assert_eq!().
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.source.kind() == other.source.kind()
    }
}
