/// The symbols defined by the Ion 1.0 system symbol table.
pub mod v1_0 {
    use phf::phf_map;

    use crate::types::SymbolId;

    /// The name under which the system symbol table is imported.
    pub const SYSTEM_TABLE_NAME: &str = "$ion";
    pub const SYSTEM_TABLE_VERSION: usize = 1;

    // The indexes in this slice are off by one relative to the corresponding Ion symbol ID.
    // This is because it does not contain symbol ID `0`-the symbol with unknown text.
    pub static SYSTEM_SYMBOLS: &[&str] = &[
        // <unknown text>              $0
        "$ion",                     // $1
        "$ion_1_0",                 // $2
        "$ion_symbol_table",        // $3
        "name",                     // $4
        "version",                  // $5
        "imports",                  // $6
        "symbols",                  // $7
        "max_id",                   // $8
        "$ion_shared_symbol_table", // $9
    ];

    pub mod system_symbol_ids {
        use crate::types::SymbolId;

        pub const ION: SymbolId = 1;
        pub const ION_1_0: SymbolId = 2;
        pub const ION_SYMBOL_TABLE: SymbolId = 3;
        pub const NAME: SymbolId = 4;
        pub const VERSION: SymbolId = 5;
        pub const IMPORTS: SymbolId = 6;
        pub const SYMBOLS: SymbolId = 7;
        pub const MAX_ID: SymbolId = 8;
        pub const ION_SHARED_SYMBOL_TABLE: SymbolId = 9;
    }

    /// The largest symbol ID defined by the system symbol table.
    pub const SYSTEM_MAX_ID: SymbolId = system_symbol_ids::ION_SHARED_SYMBOL_TABLE;

    /// A static, read-only map of text to Ion v1.0 system symbol IDs.
    /// Because the set of string keys is known at compile time, this map is able to use a
    /// perfect hashing function (PHF) to optimize lookup operations for those keys.
    pub(crate) static SYSTEM_SYMBOL_TEXT_TO_ID: phf::Map<&str, SymbolId> = phf_map! {
        "$ion"                     => 1,
        "$ion_1_0"                 => 2,
        "$ion_symbol_table"        => 3,
        "name"                     => 4,
        "version"                  => 5,
        "imports"                  => 6,
        "symbols"                  => 7,
        "max_id"                   => 8,
        "$ion_shared_symbol_table" => 9,
    };
}

#[cfg(test)]
mod tests {
    use super::v1_0::*;

    #[test]
    fn text_map_agrees_with_symbol_list() {
        assert_eq!(SYSTEM_SYMBOLS.len(), SYSTEM_MAX_ID);
        for (index, text) in SYSTEM_SYMBOLS.iter().enumerate() {
            assert_eq!(SYSTEM_SYMBOL_TEXT_TO_ID.get(text), Some(&(index + 1)));
        }
        assert_eq!(
            SYSTEM_SYMBOLS[system_symbol_ids::ION_SYMBOL_TABLE - 1],
            "$ion_symbol_table"
        );
    }
}
