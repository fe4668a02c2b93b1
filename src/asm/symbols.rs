//! The label table.
//!
//! Labels alias absolute code addresses. Pass 1 defines them as it walks
//! the source; pass 2 resolves them in jump operands. Identifiers must
//! match `[A-Za-z][A-Za-z0-9_]*` and be unique within a source unit.

use crate::error::AsmError;
use std::collections::HashMap;

/// Mapping from label identifiers to absolute code addresses.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    labels: HashMap<String, u16>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Define `name` as an alias for `offset`.
    ///
    /// Fails if the identifier is malformed or already defined.
    pub fn define(&mut self, name: &str, offset: u16) -> Result<(), AsmError> {
        if !is_valid_identifier(name) {
            return Err(AsmError::InvalidLabel {
                label: name.to_string(),
            });
        }
        if let Some(&first) = self.labels.get(name) {
            return Err(AsmError::DuplicateLabel {
                label: name.to_string(),
                first,
            });
        }
        self.labels.insert(name.to_string(), offset);
        Ok(())
    }

    /// Look up the address a label aliases.
    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    /// Number of labels defined.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are defined.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drop all definitions, ready for a fresh translation unit.
    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

/// Whether `name` matches `[A-Za-z][A-Za-z0-9_]*`.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
