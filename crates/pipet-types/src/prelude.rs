// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Builtin functions every program can use.

use std::collections::HashMap;

use pipet_ast::Span;
use pipet_resolve::{ScopeTree, SymbolId, SymbolTable};

use crate::parse_type::{parse_type, ParseTypeError};
use crate::system::TypeSystem;
use crate::types::TypeId;

/// Builtin names and their types, in declaration order.
pub const PRELUDE: &[(&str, &str)] = &[
    ("size", "File -> Int"),
    ("read", "File -> Str"),
    ("lines", "Str -> [Str]"),
    ("exists", "File -> Bool"),
    ("cat", "[File] -> Str"),
    ("count", "forall 'a. ['a] -> Int"),
    ("head", "forall 'a. ['a] -> 'a"),
    ("id", "forall 'a. 'a -> 'a"),
    ("pair", "forall 'a, 'b. 'a -> 'b -> ('a, 'b)"),
];

/// Declare every builtin in the current scope and return their types.
///
/// Builtins have no source location; user declarations of the same name
/// shadow them.
pub fn declare_prelude(
    ts: &mut TypeSystem,
    symbols: &mut SymbolTable,
    scopes: &mut ScopeTree,
) -> Result<HashMap<SymbolId, TypeId>, ParseTypeError> {
    let mut types = HashMap::new();
    for &(name, notation) in PRELUDE {
        let ty = parse_type(ts, notation)?;
        let id = symbols.declare(scopes, name, Span::default());
        types.insert(id, ty);
    }
    tracing::debug!(count = types.len(), "declared prelude");
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_parses_and_renders_back() {
        let mut ts = TypeSystem::new();
        let mut symbols = SymbolTable::new();
        let mut scopes = ScopeTree::new();
        let types = declare_prelude(&mut ts, &mut symbols, &mut scopes).unwrap();
        assert_eq!(types.len(), PRELUDE.len());

        for &(name, notation) in PRELUDE {
            let id = symbols.resolve(&scopes, name, Span::default()).unwrap();
            assert_eq!(ts.render(types[&id]), notation, "{}", name);
        }
    }
}
