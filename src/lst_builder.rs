//! Resolves a local symbol table declaration into a [`SymbolTable`].
//!
//! A declaration is the struct annotated with `$ion_symbol_table`. Rather than materializing
//! that struct, a reader replays it into a [`LocalSymbolTableBuilder`] as a sequence of
//! structural events (`step_in`, `set_field_name`, `write_string`, ..., `step_out`). When the
//! declaration struct is closed the builder resolves its imports against a [`Catalog`] and
//! produces the table that is active for the rest of the stream.
//!
//! Only the canonical shape is understood:
//!
//! ```ion
//! $ion_symbol_table::{
//!   imports: [ { name: "com.example.fruits", version: 2, max_id: 12 } ],
//!   symbols: [ "apple", "banana" ],
//! }
//! ```
//!
//! `imports: $ion_symbol_table` appends `symbols` to the table that is currently active. Any
//! other content is rejected with [`IonError::UnsupportedStructure`](crate::IonError).

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::read_config::ReadConfig;
use crate::result::{illegal_import, illegal_operation, unsupported_structure, IonResult};
use crate::symbol_table::{LocalSymbolTable, SubstituteSymbolTable, SymbolTable};
use crate::types::IonType;

const IMPORTS: &str = "imports";
const SYMBOLS: &str = "symbols";
const NAME: &str = "name";
const VERSION: &str = "version";
const MAX_ID: &str = "max_id";
const ION_SYMBOL_TABLE: &str = "$ion_symbol_table";

/// A field of an import struct that is waiting for its value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ImportField {
    Name,
    Version,
    MaxId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BuilderState {
    /// The declaration struct has not been entered yet.
    OutsideDeclaration,
    /// Inside the declaration struct, expecting `imports` or `symbols`.
    ExpectingTopField,
    /// The `imports` field name was set; expecting a list or `$ion_symbol_table`.
    BeforeImports,
    /// Inside the `imports` list, expecting an import struct.
    ImportList,
    /// Inside an import struct, expecting `name`, `version` or `max_id`.
    ImportStruct,
    ImportValue(ImportField),
    /// The `symbols` field name was set; expecting a list.
    BeforeSymbols,
    /// Inside the `symbols` list, expecting strings.
    SymbolList,
    /// The declaration was closed and the table has been produced.
    Resolved,
    /// A previous event was rejected; the declaration is abandoned.
    Failed,
}

/// An import as declared. Fields that are absent or null are `None`.
#[derive(Debug, Default, Clone)]
struct PendingImport {
    name: Option<String>,
    version: Option<i64>,
    max_id: Option<i64>,
}

impl PendingImport {
    /// Returns the import's name, version and max_id if all of them were declared.
    fn validate(&self) -> IonResult<(&str, usize, usize)> {
        let declared = |field: Option<i64>| {
            field
                .filter(|value| *value > 0)
                .and_then(|value| usize::try_from(value).ok())
        };
        match (
            self.name.as_deref(),
            declared(self.version),
            declared(self.max_id),
        ) {
            (Some(name), Some(version), Some(max_id)) => Ok((name, version, max_id)),
            _ => illegal_import(
                self.name.as_deref(),
                self.version.unwrap_or(0),
                self.max_id.unwrap_or(0),
            ),
        }
    }
}

/// A single-use state machine that turns the structural events of one local symbol table
/// declaration into a resolved [`SymbolTable`].
pub struct LocalSymbolTableBuilder<'a> {
    catalog: &'a dyn Catalog,
    active: Option<SymbolTable>,
    state: BuilderState,
    depth: usize,
    imports: Vec<PendingImport>,
    symbols: Vec<String>,
    saw_imports: bool,
    saw_symbols: bool,
    resolved: Option<SymbolTable>,
}

impl<'a> LocalSymbolTableBuilder<'a> {
    /// Creates a builder that resolves imports using `catalog`. `active` is the table in scope
    /// when the declaration is encountered; it is the table appended to in append mode.
    pub fn new(catalog: &'a dyn Catalog, active: SymbolTable) -> Self {
        LocalSymbolTableBuilder {
            catalog,
            active: Some(active),
            state: BuilderState::OutsideDeclaration,
            depth: 0,
            imports: Vec::new(),
            symbols: Vec::new(),
            saw_imports: false,
            saw_symbols: false,
            resolved: None,
        }
    }

    /// Creates a builder that resolves imports using the catalog in `config`.
    pub fn from_config(config: &'a ReadConfig, active: SymbolTable) -> Self {
        Self::new(config.catalog(), active)
    }

    /// The number of containers that have been entered and not yet exited.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if the next value must be preceded by a field name.
    pub fn is_in_struct(&self) -> bool {
        matches!(
            self.state,
            BuilderState::ExpectingTopField | BuilderState::ImportStruct
        )
    }

    pub fn is_resolved(&self) -> bool {
        self.state == BuilderState::Resolved
    }

    /// The resolved table, once the declaration struct has been closed.
    pub fn symbol_table(&self) -> Option<&SymbolTable> {
        self.resolved.as_ref()
    }

    /// Consumes the builder, returning the resolved table.
    pub fn into_symbol_table(self) -> IonResult<SymbolTable> {
        match self.resolved {
            Some(table) => Ok(table),
            None => illegal_operation("the symbol table declaration has not been closed"),
        }
    }

    /// Enters a container of type `ion_type`.
    pub fn step_in(&mut self, ion_type: IonType) -> IonResult<()> {
        self.apply(|builder| builder.on_step_in(ion_type))
    }

    /// Exits the current container. Exiting the declaration struct resolves the table.
    pub fn step_out(&mut self) -> IonResult<()> {
        self.apply(Self::on_step_out)
    }

    pub fn set_field_name(&mut self, name: &str) -> IonResult<()> {
        self.apply(|builder| builder.on_field_name(name))
    }

    pub fn write_string(&mut self, value: &str) -> IonResult<()> {
        self.apply(|builder| builder.on_string(value))
    }

    pub fn write_int(&mut self, value: i64) -> IonResult<()> {
        self.apply(|builder| builder.on_int(value))
    }

    pub fn write_symbol(&mut self, text: &str) -> IonResult<()> {
        self.apply(|builder| builder.on_symbol(text))
    }

    /// Writes a null of type `ion_type`. A null import field is treated as absent.
    pub fn write_null(&mut self, ion_type: IonType) -> IonResult<()> {
        self.apply(|builder| builder.on_null(ion_type))
    }

    /// Declarations do not carry annotations below the top level, so this always fails.
    pub fn add_annotation(&mut self, annotation: &str) -> IonResult<()> {
        self.apply(|_| unsupported_structure(format!("annotation '{annotation}'")))
    }

    /// Runs `event` unless the builder has already finished, abandoning the declaration if
    /// the event is rejected.
    fn apply<F>(&mut self, event: F) -> IonResult<()>
    where
        F: FnOnce(&mut Self) -> IonResult<()>,
    {
        match self.state {
            BuilderState::Resolved => {
                return illegal_operation("the symbol table declaration was already resolved")
            }
            BuilderState::Failed => {
                return illegal_operation("the symbol table declaration was abandoned")
            }
            _ => {}
        }
        let result = event(self);
        if result.is_err() {
            self.state = BuilderState::Failed;
        }
        result
    }

    fn on_step_in(&mut self, ion_type: IonType) -> IonResult<()> {
        use BuilderState::*;
        self.state = match (self.state, ion_type) {
            (OutsideDeclaration, IonType::Struct) => ExpectingTopField,
            (BeforeImports, IonType::List) => ImportList,
            (ImportList, IonType::Struct) => {
                self.imports.push(PendingImport::default());
                ImportStruct
            }
            (BeforeSymbols, IonType::List) => SymbolList,
            (state, ion_type) => {
                return unsupported_structure(format!("a {ion_type} in state {state:?}"))
            }
        };
        self.depth += 1;
        Ok(())
    }

    fn on_step_out(&mut self) -> IonResult<()> {
        use BuilderState::*;
        let next = match self.state {
            ExpectingTopField => Resolved,
            ImportList | SymbolList => ExpectingTopField,
            ImportStruct => ImportList,
            OutsideDeclaration => {
                return illegal_operation("cannot step out of the symbol table declaration")
            }
            state => return unsupported_structure(format!("a field without a value in {state:?}")),
        };
        self.depth -= 1;
        if next == Resolved {
            self.resolve()?;
        }
        self.state = next;
        Ok(())
    }

    fn on_field_name(&mut self, name: &str) -> IonResult<()> {
        use BuilderState::*;
        self.state = match (self.state, name) {
            (ExpectingTopField, IMPORTS) if !self.saw_imports => {
                self.saw_imports = true;
                BeforeImports
            }
            (ExpectingTopField, SYMBOLS) if !self.saw_symbols => {
                self.saw_symbols = true;
                BeforeSymbols
            }
            (ImportStruct, NAME) => ImportValue(ImportField::Name),
            (ImportStruct, VERSION) => ImportValue(ImportField::Version),
            (ImportStruct, MAX_ID) => ImportValue(ImportField::MaxId),
            (state, name) => {
                return unsupported_structure(format!("the field '{name}' in state {state:?}"))
            }
        };
        Ok(())
    }

    fn on_string(&mut self, value: &str) -> IonResult<()> {
        match self.state {
            BuilderState::SymbolList => self.symbols.push(value.to_owned()),
            BuilderState::ImportValue(ImportField::Name) => {
                self.current_import()?.name = Some(value.to_owned());
                self.state = BuilderState::ImportStruct;
            }
            state => return unsupported_structure(format!("a string in state {state:?}")),
        }
        Ok(())
    }

    fn on_int(&mut self, value: i64) -> IonResult<()> {
        // Values that are not positive are kept so that errors can report them, but they
        // count as undeclared when the import is validated.
        let field = match self.state {
            BuilderState::ImportValue(ImportField::Version) => &mut self.current_import()?.version,
            BuilderState::ImportValue(ImportField::MaxId) => &mut self.current_import()?.max_id,
            state => return unsupported_structure(format!("an int in state {state:?}")),
        };
        *field = Some(value);
        self.state = BuilderState::ImportStruct;
        Ok(())
    }

    fn on_symbol(&mut self, text: &str) -> IonResult<()> {
        match (self.state, text) {
            (BuilderState::BeforeImports, ION_SYMBOL_TABLE) => {
                // Append mode: no imports, local symbols extend the active table.
                self.imports.clear();
                self.state = BuilderState::ExpectingTopField;
                Ok(())
            }
            (state, text) => {
                unsupported_structure(format!("the symbol '{text}' in state {state:?}"))
            }
        }
    }

    fn on_null(&mut self, ion_type: IonType) -> IonResult<()> {
        match self.state {
            BuilderState::ImportValue(_) => {
                self.state = BuilderState::ImportStruct;
                Ok(())
            }
            state => unsupported_structure(format!("a null.{ion_type} in state {state:?}")),
        }
    }

    fn current_import(&mut self) -> IonResult<&mut PendingImport> {
        match self.imports.last_mut() {
            Some(import) => Ok(import),
            None => illegal_operation("no import struct is open"),
        }
    }

    fn resolve(&mut self) -> IonResult<()> {
        let Some(active) = self.active.take() else {
            return illegal_operation("the symbol table declaration was already resolved");
        };
        let symbols = std::mem::take(&mut self.symbols);

        let table = if self.imports.is_empty() {
            let mut table = match active {
                SymbolTable::Local(local) => local,
                SymbolTable::System(_) => LocalSymbolTable::new(),
                other => {
                    return illegal_operation(format!(
                        "cannot append symbols to the shared table '{}'",
                        other.name().unwrap_or_default()
                    ))
                }
            };
            for text in &symbols {
                table.intern(text)?;
            }
            debug!(
                mode = "append",
                symbols = symbols.len(),
                max_id = table.max_id(),
                "resolved local symbol table"
            );
            table
        } else {
            let mut imports = Vec::with_capacity(self.imports.len());
            for pending in &self.imports {
                let (name, version, max_id) = pending.validate()?;
                let import = match self.catalog.get_table_with_version(name, version) {
                    Some(shared) => SymbolTable::Shared(shared),
                    None => {
                        warn!(
                            name,
                            version,
                            max_id,
                            "shared symbol table not found in catalog, substituting"
                        );
                        SymbolTable::Substitute(SubstituteSymbolTable::new(name, version, max_id))
                    }
                };
                imports.push(import);
            }
            let import_count = imports.len();
            let table = LocalSymbolTable::with_imports(imports, &symbols)?;
            debug!(
                mode = "new",
                imports = import_count,
                symbols = symbols.len(),
                max_id = table.max_id(),
                "resolved local symbol table"
            );
            table
        };
        self.resolved = Some(SymbolTable::Local(table));
        Ok(())
    }
}
