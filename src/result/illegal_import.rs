use thiserror::Error;

/// Indicates that an import declared in a local symbol table was missing its name, or had a
/// version or max_id that was absent or not positive.
#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "illegal shared symbol table import declared in local symbol table: {} (version: {version}, max_id: {max_id})",
    .name.as_deref().unwrap_or("<no name>")
)]
pub struct IllegalImportError {
    name: Option<String>,
    version: i64,
    max_id: i64,
}

impl IllegalImportError {
    pub(crate) fn new(name: Option<String>, version: i64, max_id: i64) -> Self {
        IllegalImportError {
            name,
            version,
            max_id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn max_id(&self) -> i64 {
        self.max_id
    }
}
