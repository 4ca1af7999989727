//! Symbol definitions and symbol table.

use pipet_ast::{Span, SymbolId};

use crate::error::{ResolveError, ResolveErrorKind};
use crate::scope::{ScopeId, ScopeTree};

/// A declared symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    /// `None` for compiler-introduced bindings.
    pub name: Option<String>,
    /// The scope the symbol was declared in.
    pub scope: ScopeId,
    /// Where this symbol was declared.
    pub span: Span,
}

/// Table of all symbols in a program.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Insert a new symbol and return its ID.
    pub fn insert(&mut self, name: Option<String>, scope: ScopeId, span: Span) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name,
            scope,
            span,
        });
        id
    }

    /// Declare `name` in the current scope of `scopes`. Earlier bindings of the
    /// same name are shadowed.
    pub fn declare(&mut self, scopes: &mut ScopeTree, name: &str, span: Span) -> SymbolId {
        let id = self.insert(Some(name.to_string()), scopes.current(), span);
        scopes.define(name.to_string(), id);
        id
    }

    /// Fails if `name` is already declared in the current scope. Bindings
    /// from enclosing scopes may be shadowed.
    pub fn check_redeclaration(&self, scopes: &ScopeTree, name: &str, span: Span) -> Result<(), ResolveError> {
        let previous = scopes
            .lookup(name)
            .and_then(|id| self.get(id))
            .filter(|symbol| scopes.is_inside(symbol.scope, scopes.current()));
        match previous {
            Some(previous) => Err(ResolveError {
                kind: ResolveErrorKind::DuplicateDefinition {
                    name: name.to_string(),
                    previous: previous.span,
                },
                span,
            }),
            None => Ok(()),
        }
    }

    /// Resolve `name` from the current scope, newest binding first.
    pub fn resolve(&self, scopes: &ScopeTree, name: &str, span: Span) -> Result<SymbolId, ResolveError> {
        scopes.lookup(name).ok_or_else(|| ResolveError {
            kind: ResolveErrorKind::UndefinedSymbol {
                name: name.to_string(),
            },
            span,
        })
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// Name to show in diagnostics. Never fails.
    pub fn display_name(&self, id: Option<SymbolId>) -> &str {
        match id.map(|id| self.get(id)) {
            None => "<no symbol attached>",
            Some(None) => "<unknown symbol>",
            Some(Some(Symbol { name: None, .. })) => "<unnamed symbol>",
            Some(Some(Symbol { name: Some(name), .. })) => name.as_str(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadowing_resolves_to_newest() {
        let mut scopes = ScopeTree::new();
        let mut symbols = SymbolTable::new();
        let first = symbols.declare(&mut scopes, "src", Span::new(0, 3));
        let second = symbols.declare(&mut scopes, "src", Span::new(10, 13));

        assert_ne!(first, second);
        assert_eq!(symbols.resolve(&scopes, "src", Span::default()).unwrap(), second);
    }

    #[test]
    fn redeclaration_is_reported_with_previous_span() {
        let mut scopes = ScopeTree::new();
        let mut symbols = SymbolTable::new();
        symbols.declare(&mut scopes, "out", Span::new(4, 7));

        let err = symbols
            .check_redeclaration(&scopes, "out", Span::new(20, 23))
            .unwrap_err();
        assert_eq!(
            err.kind,
            ResolveErrorKind::DuplicateDefinition {
                name: "out".to_string(),
                previous: Span::new(4, 7),
            }
        );
        assert!(symbols.check_redeclaration(&scopes, "other", Span::default()).is_ok());

        scopes.push();
        assert!(symbols.check_redeclaration(&scopes, "out", Span::default()).is_ok());
    }

    #[test]
    fn undefined_name_is_an_error() {
        let scopes = ScopeTree::new();
        let symbols = SymbolTable::new();
        let err = symbols.resolve(&scopes, "nope", Span::new(1, 5)).unwrap_err();
        assert_eq!(err.to_string(), "undefined symbol `nope`");
    }

    #[test]
    fn display_names_have_placeholders() {
        let scopes = ScopeTree::new();
        let mut symbols = SymbolTable::new();
        let anon = symbols.insert(None, scopes.current(), Span::default());

        assert_eq!(symbols.display_name(None), "<no symbol attached>");
        assert_eq!(symbols.display_name(Some(anon)), "<unnamed symbol>");
        assert_eq!(symbols.display_name(Some(SymbolId(99))), "<unknown symbol>");
    }
}
