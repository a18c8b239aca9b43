//! Symbol definitions shared by the binder and the interpreter.

use crate::types::Type;

/// What kind of entity a symbol names. Variables are the only kind today;
/// lookups still filter by kind so the namespace can grow without changing
/// the search contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
}

/// A named entity in the program.
///
/// Variable names are stored with their `$` sigil prefix, so the symbol
/// namespace can never collide with native command names.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The sigil-prefixed name, e.g. `$x`.
    pub name: String,
    /// The resolved static type.
    pub ty: Type,
    /// The kind of entity this symbol names.
    pub kind: SymbolKind,
}

impl Symbol {
    /// Create a variable symbol, prefixing the sigil onto the bare name.
    pub fn variable(bare_name: &str, ty: Type) -> Self {
        Self {
            name: format!("${}", bare_name),
            ty,
            kind: SymbolKind::Variable,
        }
    }
}
