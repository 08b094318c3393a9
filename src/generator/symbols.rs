//! Generated identifiers, derived from the position of a file in the collected sequence.

use serde::Serialize;

pub const DATA_PREFIX: &str = "FILEDATA_";
pub const HANDLER_PREFIX: &str = "GET_FILE_";
pub const ROUTE_PREFIX: &str = "URI_FILE_";

/// Route symbol of the alias serving a file at `/`.
pub const ROOT_ROUTE_SYMBOL: &str = "ROOT_URI";
pub const ALIAS_ROUTE_PREFIX: &str = "ALIAS_URI_";

/// The identifiers generated for one embedded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolTriple {
    pub data: String,
    pub handler: String,
    pub route: String,
}

impl SymbolTriple {
    /// Ordinals are unique per run, so the symbols are too.
    pub fn for_ordinal(ordinal: usize) -> Self {
        Self {
            data: format!("{DATA_PREFIX}{ordinal}"),
            handler: format!("{HANDLER_PREFIX}{ordinal}"),
            route: format!("{ROUTE_PREFIX}{ordinal}"),
        }
    }
}

/// Route symbol for the alias rule at position `rule_index`, serving `route`.
pub fn alias_route_symbol(rule_index: usize, route: &str) -> String {
    if route == "/" {
        ROOT_ROUTE_SYMBOL.to_string()
    } else {
        format!("{ALIAS_ROUTE_PREFIX}{rule_index}")
    }
}
