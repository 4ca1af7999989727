// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! What the analyzer knows about declared symbols.

use std::collections::HashMap;

use pipet_resolve::{SymbolId, SymbolTable};

use crate::types::TypeId;

/// Read-only view of the symbol table during analysis.
pub trait SymbolEnv {
    /// Name for diagnostics. Never fails, even for `None` or unnamed symbols.
    fn symbol_name(&self, symbol: Option<SymbolId>) -> &str;

    /// Declared type, if the symbol has one.
    fn symbol_type(&self, symbol: SymbolId) -> Option<TypeId>;
}

/// Symbol table plus the types attached to its symbols.
#[derive(Debug)]
pub struct Bindings<'a> {
    symbols: &'a SymbolTable,
    types: HashMap<SymbolId, TypeId>,
}

impl<'a> Bindings<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            types: HashMap::new(),
        }
    }

    pub fn with_types(symbols: &'a SymbolTable, types: HashMap<SymbolId, TypeId>) -> Self {
        Self { symbols, types }
    }

    /// Attach a type to `symbol`, replacing any earlier one.
    pub fn bind(&mut self, symbol: SymbolId, ty: TypeId) {
        self.types.insert(symbol, ty);
    }

    pub fn get(&self, symbol: SymbolId) -> Option<TypeId> {
        self.types.get(&symbol).copied()
    }
}

impl SymbolEnv for Bindings<'_> {
    fn symbol_name(&self, symbol: Option<SymbolId>) -> &str {
        self.symbols.display_name(symbol)
    }

    fn symbol_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.get(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipet_ast::Span;
    use pipet_resolve::{ScopeId, ScopeTree};

    use crate::TypeSystem;

    #[test]
    fn names_and_types() {
        let mut ts = TypeSystem::new();
        let mut scopes = ScopeTree::new();
        let mut symbols = SymbolTable::new();
        let src = symbols.declare(&mut scopes, "src", Span::default());
        let hidden = symbols.insert(None, ScopeId(0), Span::default());

        let mut env = Bindings::new(&symbols);
        env.bind(src, ts.file());

        assert_eq!(env.symbol_name(Some(src)), "src");
        assert_eq!(env.symbol_name(Some(hidden)), "<unnamed symbol>");
        assert_eq!(env.symbol_name(None), "<no symbol attached>");
        assert_eq!(env.symbol_type(src), Some(ts.file()));
        assert_eq!(env.symbol_type(hidden), None);
    }
}
