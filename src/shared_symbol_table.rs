use rustc_hash::FxHashMap;

use crate::result::{illegal_operation, IonResult};
use crate::types::SymbolId;

/// Stores [`SharedSymbolTable`] with the table name, version and symbols.
/// For more information on [`SharedSymbolTable`], see:
/// <https://amazon-ion.github.io/ion-docs/docs/symbols.html#shared-symbol-tables>
///
/// A `None` entry is a symbol whose text is unknown; it still occupies an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSymbolTable {
    name: String,
    version: usize,
    symbols: Vec<Option<String>>,
    ids_by_text: FxHashMap<String, SymbolId>,
}

impl SharedSymbolTable {
    pub fn new(
        name: impl Into<String>,
        version: usize,
        symbols: Vec<Option<String>>,
    ) -> IonResult<Self> {
        let name = name.into();
        // As per Ion Specification, the name field should be a string with length at least one.
        // If the field has any other value, then materialization of this symbol table must fail.
        if name.is_empty() {
            return illegal_operation("shared symbol table with empty name is not allowed");
        }
        if version < 1 {
            return illegal_operation(format!(
                "shared symbol table '{name}' must have a version of at least 1"
            ));
        }

        let mut ids_by_text = FxHashMap::default();
        for (index, text) in symbols.iter().enumerate() {
            if let Some(text) = text {
                // The lowest ID wins when text is repeated.
                ids_by_text.entry(text.clone()).or_insert(index + 1);
            }
        }
        Ok(Self {
            name,
            version,
            symbols,
            ids_by_text,
        })
    }

    /// Returns the version of this [`SharedSymbolTable`]
    pub fn version(&self) -> usize {
        self.version
    }

    /// Returns the name of this [`SharedSymbolTable`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbols defined in this [`SharedSymbolTable`]
    pub fn symbols(&self) -> &[Option<String>] {
        &self.symbols
    }

    /// The number of IDs this table occupies when imported.
    pub fn max_id(&self) -> usize {
        self.symbols.len()
    }

    /// Returns the table-relative ID (starting at 1) of `text`.
    pub fn find_symbol(&self, text: &str) -> Option<SymbolId> {
        self.ids_by_text.get(text).copied()
    }

    /// Returns the text of the table-relative ID `id`, if it is in range and known.
    pub fn find_known_symbol(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id.checked_sub(1)?)?.as_deref()
    }
}
