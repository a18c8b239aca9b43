//! Scope management for the binder.

use crate::symbol::{Symbol, SymbolKind};
use indexmap::IndexMap;

/// A scope in the binding phase. Scopes form a chain from inner to outer.
///
/// Symbols live in an ordered map keyed by name: declaring a name that
/// already exists in the same scope replaces it (last write wins), so
/// re-declaration shadows deterministically instead of leaving lookup
/// order unspecified.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// The symbols declared in this scope, in declaration order.
    symbols: IndexMap<String, Symbol>,
    /// The parent scope (None for the root scope).
    parent: Option<Box<Scope>>,
}

impl Scope {
    /// Create a root scope.
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
            parent: None,
        }
    }

    /// Create a scope chained under `parent`.
    pub fn with_parent(parent: Scope) -> Self {
        Self {
            symbols: IndexMap::new(),
            parent: Some(Box::new(parent)),
        }
    }

    /// Declare a symbol in this scope only. Replaces any existing symbol
    /// with the same name in this scope; parents are never touched.
    pub fn declare(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Look up a symbol by name, innermost scope first, accepting only the
    /// given kinds. The first name match wins.
    pub fn lookup(&self, name: &str, kinds: &[SymbolKind]) -> Option<&Symbol> {
        if let Some(symbol) = self.symbols.get(name) {
            if kinds.contains(&symbol.kind) {
                return Some(symbol);
            }
        }

        self.parent.as_ref().and_then(|p| p.lookup(name, kinds))
    }

    /// The number of symbols declared directly in this scope.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
