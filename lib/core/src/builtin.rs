//! Embedded TeX/MathJax symbol vocabulary.
//!
//! The table is compiled into the binary and decoded on demand. It is never
//! mutated; user customisations live in the override half of the registry.

use crate::{Entry, Error, Result};

const SYMBOLS_JSON: &str = include_str!("../data/symbols.json");

/// Decode the embedded symbol table
pub fn builtin_entries() -> Result<Vec<Entry>> {
    serde_json::from_str(SYMBOLS_JSON)
        .map_err(|e| Error::Serialization(format!("builtin symbol table: {}", e)))
}
