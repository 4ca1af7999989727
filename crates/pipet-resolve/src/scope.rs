// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope tree for name resolution.

use pipet_ast::SymbolId;

/// Unique identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// A scope in the scope tree.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    /// Bindings in declaration order. Later entries shadow earlier ones.
    pub bindings: Vec<(String, SymbolId)>,
}

/// Tree of scopes for name lookup.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeTree {
    /// A tree holding only the global scope, which is also current.
    pub fn new() -> Self {
        let global = Scope {
            id: ScopeId(0),
            parent: None,
            bindings: Vec::new(),
        };
        Self {
            scopes: vec![global],
            current: ScopeId(0),
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Push a new scope nested in the current one.
    pub fn push(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent: Some(self.current),
            bindings: Vec::new(),
        });
        self.current = id;
        id
    }

    /// Return to the parent scope. No-op at the global scope.
    pub fn pop(&mut self) {
        if let Some(parent) = self.get(self.current).and_then(|scope| scope.parent) {
            self.current = parent;
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// `from` and its enclosing scopes, innermost first.
    fn chain(&self, from: ScopeId) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(self.get(from), |scope| scope.parent.and_then(|p| self.get(p)))
    }

    /// Resolve `name` from the current scope outward, newest binding first.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.chain(self.current).find_map(|scope| {
            scope
                .bindings
                .iter()
                .rev()
                .find(|(bound, _)| bound == name)
                .map(|&(_, symbol)| symbol)
        })
    }

    /// Define a name in the current scope.
    pub fn define(&mut self, name: String, symbol: SymbolId) {
        let current = self.current.0 as usize;
        self.scopes[current].bindings.push((name, symbol));
    }

    /// Whether `inner` is `outer` or nested anywhere below it.
    pub fn is_inside(&self, inner: ScopeId, outer: ScopeId) -> bool {
        self.chain(inner).any(|scope| scope.id == outer)
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
