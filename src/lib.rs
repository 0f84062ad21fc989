//! # Lazily materialized Ion values
//!
//! `ion_lazy_core` holds the pieces of an Ion 1.0 binary runtime that sit between raw bytes and
//! a document tree:
//!
//! * [`value::ValueNode`] wraps a single value that is either positioned over its encoded bytes
//!   or holds a native Rust value. Bytes are decoded on first access and mutations mark the node
//!   dirty so it is re-encoded when written. [`DecimalNode`] is the decimal instantiation.
//! * [`binary`] contains the binary primitives (type descriptors, `VarUInt`, `VarInt`, `Int`)
//!   and the decimal codec.
//! * [`SymbolTable`] and its variants model the system, shared, substitute and local symbol
//!   tables, and [`LocalSymbolTableBuilder`] resolves a `$ion_symbol_table` declaration against
//!   a [`Catalog`] of shared tables.
//!
//! ## Example: reading and rewriting a decimal
//!
//! ```
//! use std::sync::Arc;
//! use ion_lazy_core::{Decimal, DecimalNode, IonResult};
//!
//! # fn main() -> IonResult<()> {
//! // 0x52: a decimal with two content bytes. 0xC1: exponent -1. 0x7B: coefficient 123.
//! let data: Arc<[u8]> = Arc::from(&[0x52u8, 0xC1, 0x7B][..]);
//! let mut node = DecimalNode::positioned(data, 0)?;
//! assert_eq!(node.decimal_value()?, Decimal::new(123, -1));
//! assert!(!node.is_dirty());
//!
//! node.set_i64(-7)?;
//! let mut output = Vec::new();
//! node.write_value(&mut output)?;
//! assert_eq!(output, vec![0x52, 0x80, 0x87]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: resolving a local symbol table
//!
//! ```
//! use ion_lazy_core::{IonResult, IonType, LocalSymbolTableBuilder, ReadConfig, SymbolTable};
//!
//! # fn main() -> IonResult<()> {
//! let config = ReadConfig::new();
//! let mut builder = LocalSymbolTableBuilder::from_config(&config, SymbolTable::system());
//! builder.step_in(IonType::Struct)?;
//! builder.set_field_name("symbols")?;
//! builder.step_in(IonType::List)?;
//! builder.write_string("apple")?;
//! builder.step_out()?;
//! builder.step_out()?;
//!
//! let table = builder.into_symbol_table()?;
//! assert_eq!(table.find_symbol("apple"), Some(10));
//! # Ok(())
//! # }
//! ```

pub mod result;

pub mod binary;
pub mod constants;
pub mod types;
pub mod value;

mod catalog;
mod ion_eq;
mod lst_builder;
mod read_config;
mod shared_symbol_table;
mod symbol_table;

pub use catalog::{Catalog, EmptyCatalog, MapCatalog};
pub use ion_eq::IonEq;
pub use lst_builder::LocalSymbolTableBuilder;
pub use read_config::ReadConfig;
pub use result::{IonError, IonResult};
pub use shared_symbol_table::SharedSymbolTable;
pub use symbol_table::{
    LocalSymbolTable, SubstituteSymbolTable, SymbolTable, SymbolTableKind, SystemSymbolTable,
    SYSTEM_SYMBOLS_1_0,
};
pub use types::{Coefficient, Decimal, IonType, Sign, SymbolId};
pub use value::{Classification, DecimalNode, ValueNode};
