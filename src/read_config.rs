use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::catalog::{Catalog, EmptyCatalog};

/// Provides the configuration consulted when symbol table declarations are resolved.
#[derive(Clone)]
pub struct ReadConfig {
    pub(crate) catalog: Arc<dyn Catalog>,
}

impl ReadConfig {
    /// A configuration whose catalog contains no shared symbol tables.
    pub fn new() -> Self {
        ReadConfig::with_catalog(EmptyCatalog)
    }

    pub fn with_catalog(catalog: impl Catalog + 'static) -> Self {
        ReadConfig {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ReadConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadConfig").finish_non_exhaustive()
    }
}
