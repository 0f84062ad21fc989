use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::constants::v1_0;
use crate::result::{illegal_operation, IonResult};
use crate::shared_symbol_table::SharedSymbolTable;
use crate::types::SymbolId;

/// Distinguishes the three roles a symbol table can play in an Ion stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolTableKind {
    System,
    Shared,
    Local,
}

/// The immutable system symbol table defined by the Ion 1.0 specification.
#[derive(Debug, Copy, Clone)]
pub struct SystemSymbolTable {
    symbols_by_address: &'static [&'static str],
    symbols_by_text: &'static phf::Map<&'static str, SymbolId>,
}

impl SystemSymbolTable {
    pub fn name(&self) -> &'static str {
        v1_0::SYSTEM_TABLE_NAME
    }

    pub fn version(&self) -> usize {
        v1_0::SYSTEM_TABLE_VERSION
    }

    pub fn max_id(&self) -> usize {
        self.symbols_by_address.len()
    }

    pub fn find_symbol(&self, text: &str) -> Option<SymbolId> {
        self.symbols_by_text.get(text).copied()
    }

    pub fn find_known_symbol(&self, id: SymbolId) -> Option<&'static str> {
        self.symbols_by_address.get(id.checked_sub(1)?).copied()
    }
}

pub static SYSTEM_SYMBOLS_1_0: &SystemSymbolTable = &SystemSymbolTable {
    symbols_by_address: v1_0::SYSTEM_SYMBOLS,
    symbols_by_text: &v1_0::SYSTEM_SYMBOL_TEXT_TO_ID,
};

/// Stands in for an imported shared table that the catalog could not provide. It reserves
/// `max_id` symbol IDs so that the IDs which follow it keep their meaning, but the text of
/// every reserved ID is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstituteSymbolTable {
    name: String,
    version: usize,
    max_id: usize,
}

impl SubstituteSymbolTable {
    pub fn new(name: impl Into<String>, version: usize, max_id: usize) -> Self {
        Self {
            name: name.into(),
            version,
            max_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> usize {
        self.version
    }

    pub fn max_id(&self) -> usize {
        self.max_id
    }
}

/// A per-document symbol table: the system table, then each import's ID range in order, then
/// the symbols interned locally.
#[derive(Clone)]
pub struct LocalSymbolTable {
    // Always begins with the system table.
    imports: Vec<SymbolTable>,
    imports_max_id: usize,
    symbols: Vec<String>,
    ids_by_text: FxHashMap<String, SymbolId>,
    read_only: bool,
}

impl Default for LocalSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSymbolTable {
    /// A local table that imports only the system table and defines no symbols of its own.
    pub fn new() -> Self {
        LocalSymbolTable {
            imports: vec![SymbolTable::System(SYSTEM_SYMBOLS_1_0)],
            imports_max_id: SYSTEM_SYMBOLS_1_0.max_id(),
            symbols: Vec::new(),
            ids_by_text: FxHashMap::default(),
            read_only: false,
        }
    }

    /// Constructs a local table whose imports are the system table followed by `imports`, then
    /// interns each of `symbols` in order.
    ///
    /// Local tables cannot themselves be imported.
    pub fn with_imports<I, S>(imports: I, symbols: S) -> IonResult<Self>
    where
        I: IntoIterator<Item = SymbolTable>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut table = LocalSymbolTable::new();
        for import in imports {
            if import.kind() == SymbolTableKind::Local {
                return illegal_operation("a local symbol table cannot be imported");
            }
            table.imports_max_id += import.max_id();
            table.imports.push(import);
        }
        for text in symbols {
            table.intern(text.as_ref())?;
        }
        Ok(table)
    }

    /// The tables this table imports, starting with the system table.
    pub fn imports(&self) -> &[SymbolTable] {
        &self.imports
    }

    /// The symbols defined by this table itself, in ID order.
    pub fn local_symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The largest ID contributed by the imports. Local symbols begin at `imports_max_id() + 1`.
    pub fn imports_max_id(&self) -> usize {
        self.imports_max_id
    }

    pub fn max_id(&self) -> usize {
        self.imports_max_id + self.symbols.len()
    }

    /// Returns the ID of `text`, adding it as a new local symbol if it is not already defined.
    pub fn intern(&mut self, text: &str) -> IonResult<SymbolId> {
        if let Some(id) = self.find_symbol(text) {
            return Ok(id);
        }
        if self.read_only {
            return illegal_operation(format!(
                "cannot intern '{text}' into a read-only symbol table"
            ));
        }
        self.symbols.push(text.to_owned());
        let id = self.max_id();
        self.ids_by_text.insert(text.to_owned(), id);
        Ok(id)
    }

    pub fn find_symbol(&self, text: &str) -> Option<SymbolId> {
        if let Some(id) = self.ids_by_text.get(text) {
            return Some(*id);
        }
        let mut offset = 0;
        for import in &self.imports {
            if let Some(relative_id) = import.find_symbol(text) {
                return Some(offset + relative_id);
            }
            offset += import.max_id();
        }
        None
    }

    pub fn find_known_symbol(&self, id: SymbolId) -> Option<&str> {
        if id > self.imports_max_id {
            return self
                .symbols
                .get(id - self.imports_max_id - 1)
                .map(String::as_str);
        }
        let mut offset = 0;
        for import in &self.imports {
            let import_max_id = import.max_id();
            if id > offset && id <= offset + import_max_id {
                return import.find_known_symbol(id - offset);
            }
            offset += import_max_id;
        }
        None
    }

    /// Prevents any further symbols from being interned.
    pub fn make_read_only(&mut self) {
        self.read_only = true;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl Debug for LocalSymbolTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSymbolTable {{imports: [")?;
        for import in &self.imports {
            write!(
                f,
                "{}@{}({}), ",
                import.name().unwrap_or("<local>"),
                import.version(),
                import.max_id()
            )?;
        }
        write!(f, "], symbols: {{")?;
        for (index, text) in self.symbols.iter().enumerate() {
            write!(f, "{}: {:?}, ", self.imports_max_id + index + 1, text)?;
        }
        write!(f, "}}}}")
    }
}

/// Any of the symbol tables that can be active in, or imported into, an Ion stream.
///
/// IDs reported by [`find_symbol`](Self::find_symbol) and accepted by
/// [`find_known_symbol`](Self::find_known_symbol) are relative to the table itself; for system
/// and local tables that is the same as the stream's symbol ID.
#[derive(Debug, Clone)]
pub enum SymbolTable {
    System(&'static SystemSymbolTable),
    Shared(Arc<SharedSymbolTable>),
    Substitute(SubstituteSymbolTable),
    Local(LocalSymbolTable),
}

impl SymbolTable {
    /// The system symbol table.
    pub fn system() -> Self {
        SymbolTable::System(SYSTEM_SYMBOLS_1_0)
    }

    pub fn kind(&self) -> SymbolTableKind {
        match self {
            SymbolTable::System(_) => SymbolTableKind::System,
            SymbolTable::Shared(_) | SymbolTable::Substitute(_) => SymbolTableKind::Shared,
            SymbolTable::Local(_) => SymbolTableKind::Local,
        }
    }

    /// Returns `true` if this table stands in for a shared table that could not be found.
    pub fn is_substitute(&self) -> bool {
        matches!(self, SymbolTable::Substitute(_))
    }

    /// The table's name. Local tables are anonymous.
    pub fn name(&self) -> Option<&str> {
        match self {
            SymbolTable::System(system) => Some(system.name()),
            SymbolTable::Shared(shared) => Some(shared.name()),
            SymbolTable::Substitute(substitute) => Some(substitute.name()),
            SymbolTable::Local(_) => None,
        }
    }

    /// The table's version. Local tables report `0`.
    pub fn version(&self) -> usize {
        match self {
            SymbolTable::System(system) => system.version(),
            SymbolTable::Shared(shared) => shared.version(),
            SymbolTable::Substitute(substitute) => substitute.version(),
            SymbolTable::Local(_) => 0,
        }
    }

    pub fn max_id(&self) -> usize {
        match self {
            SymbolTable::System(system) => system.max_id(),
            SymbolTable::Shared(shared) => shared.max_id(),
            SymbolTable::Substitute(substitute) => substitute.max_id(),
            SymbolTable::Local(local) => local.max_id(),
        }
    }

    pub fn find_symbol(&self, text: &str) -> Option<SymbolId> {
        match self {
            SymbolTable::System(system) => system.find_symbol(text),
            SymbolTable::Shared(shared) => shared.find_symbol(text),
            SymbolTable::Substitute(_) => None,
            SymbolTable::Local(local) => local.find_symbol(text),
        }
    }

    pub fn find_known_symbol(&self, id: SymbolId) -> Option<&str> {
        match self {
            SymbolTable::System(system) => system.find_known_symbol(id),
            SymbolTable::Shared(shared) => shared.find_known_symbol(id),
            SymbolTable::Substitute(_) => None,
            SymbolTable::Local(local) => local.find_known_symbol(id),
        }
    }

    /// Interns `text` into a local table. System and shared tables are immutable.
    pub fn intern(&mut self, text: &str) -> IonResult<SymbolId> {
        match self {
            SymbolTable::Local(local) => local.intern(text),
            other => match other.find_symbol(text) {
                Some(id) => Ok(id),
                None => illegal_operation(format!(
                    "cannot intern '{text}' into the locked {:?} table '{}'",
                    other.kind(),
                    other.name().unwrap_or_default()
                )),
            },
        }
    }

    pub fn as_local(&self) -> Option<&LocalSymbolTable> {
        match self {
            SymbolTable::Local(local) => Some(local),
            _ => None,
        }
    }

    pub fn as_local_mut(&mut self) -> Option<&mut LocalSymbolTable> {
        match self {
            SymbolTable::Local(local) => Some(local),
            _ => None,
        }
    }
}

impl From<LocalSymbolTable> for SymbolTable {
    fn from(table: LocalSymbolTable) -> Self {
        SymbolTable::Local(table)
    }
}

impl From<SharedSymbolTable> for SymbolTable {
    fn from(table: SharedSymbolTable) -> Self {
        SymbolTable::Shared(Arc::new(table))
    }
}

impl From<Arc<SharedSymbolTable>> for SymbolTable {
    fn from(table: Arc<SharedSymbolTable>) -> Self {
        SymbolTable::Shared(table)
    }
}

impl From<SubstituteSymbolTable> for SymbolTable {
    fn from(table: SubstituteSymbolTable) -> Self {
        SymbolTable::Substitute(table)
    }
}
