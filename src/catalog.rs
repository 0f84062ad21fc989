use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::shared_symbol_table::SharedSymbolTable;

/// A Catalog is a collection of Shared Symbol Tables.
/// For more information about the concept of a catalog,
/// see [the `symbols` section of the specification](https://amazon-ion.github.io/ion-docs/docs/symbols.html#the-catalog).
pub trait Catalog {
    /// Returns the Shared Symbol Table with given table name
    /// If a table with the given name doesn't exists or if the table name is an empty string
    /// then returns None
    /// If a table with multiple versions exists for the given name then it will return the latest version of table
    fn get_table(&self, name: &str) -> Option<Arc<SharedSymbolTable>>;
    /// Returns the Shared Symbol Table with given table name and version
    /// If a table with given name and version doesn't exists then it returns None
    fn get_table_with_version(&self, name: &str, version: usize)
        -> Option<Arc<SharedSymbolTable>>;
}

#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    tables_by_name: HashMap<String, BTreeMap<usize, Arc<SharedSymbolTable>>>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a Shared Symbol Table with name into the Catalog, replacing any table with the same
    /// name and version.
    pub fn insert_table(&mut self, table: SharedSymbolTable) {
        self.tables_by_name
            .entry(table.name().to_owned())
            .or_default()
            .insert(table.version(), Arc::new(table));
    }
}

impl Catalog for MapCatalog {
    fn get_table(&self, name: &str) -> Option<Arc<SharedSymbolTable>> {
        let versions = self.tables_by_name.get(name)?;
        let (_highest_version, table) = versions.iter().next_back()?;
        Some(Arc::clone(table))
    }

    fn get_table_with_version(
        &self,
        name: &str,
        version: usize,
    ) -> Option<Arc<SharedSymbolTable>> {
        self.tables_by_name.get(name)?.get(&version).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmptyCatalog;

impl Catalog for EmptyCatalog {
    fn get_table(&self, _name: &str) -> Option<Arc<SharedSymbolTable>> {
        None
    }

    fn get_table_with_version(
        &self,
        _name: &str,
        _version: usize,
    ) -> Option<Arc<SharedSymbolTable>> {
        None
    }
}
