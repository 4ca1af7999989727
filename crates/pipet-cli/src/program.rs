// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Program documents: a pre-parsed expression tree plus the symbols it uses.
//!
//! ```json
//! {
//!   "source": "[a.txt, b.txt] | size",
//!   "symbols": [{ "name": "out", "type": "File" }],
//!   "config": { "list_literals": "unify" },
//!   "expr": { "kind": { "pipe_app": { "arg": ..., "func": ... } }, "span": ... }
//! }
//! ```
//!
//! The prelude is declared in the global scope and document symbols in a
//! scope nested inside it, so a document may shadow a builtin. Symbol
//! references without a `symbol` id are bound by name.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

use pipet_ast::{Expr, ExprKind, Span, SymbolId};
use pipet_resolve::{ResolveError, ScopeTree, SymbolTable};
use pipet_types::{declare_prelude, parse_type, AnalyzerConfig, TypeId, TypeSystem};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
pub struct ProgramDoc {
    /// Text the spans point into. Only used for diagnostics.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub symbols: Vec<SymbolDecl>,
    #[serde(default)]
    pub config: AnalyzerConfig,
    pub expr: Expr,
}

#[derive(Debug, Deserialize)]
pub struct SymbolDecl {
    pub name: String,
    /// Type notation. Missing means the symbol is declared but untyped.
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// A loaded document with its names bound and its nodes numbered.
pub struct Program {
    pub source: String,
    pub config: AnalyzerConfig,
    pub expr: Expr,
    pub ts: TypeSystem,
    pub symbols: SymbolTable,
    pub types: HashMap<SymbolId, TypeId>,
    pub resolve_errors: Vec<ResolveError>,
}

impl Program {
    pub fn load(path: &str) -> Result<Program, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        let doc: ProgramDoc = serde_json::from_str(&text).map_err(|source| CliError::Document {
            path: path.to_string(),
            source,
        })?;
        Program::from_doc(doc)
    }

    pub fn from_doc(doc: ProgramDoc) -> Result<Program, CliError> {
        let mut ts = TypeSystem::new();
        let mut symbols = SymbolTable::new();
        let mut scopes = ScopeTree::new();
        let mut types = declare_prelude(&mut ts, &mut symbols, &mut scopes).map_err(|source| {
            CliError::TypeNotation {
                symbol: "<prelude>".to_string(),
                source,
            }
        })?;

        scopes.push();
        let mut resolve_errors = Vec::new();
        for decl in &doc.symbols {
            if let Err(err) = symbols.check_redeclaration(&scopes, &decl.name, decl.span) {
                resolve_errors.push(err);
                continue;
            }
            let id = symbols.declare(&mut scopes, &decl.name, decl.span);
            if let Some(notation) = &decl.ty {
                let ty = parse_type(&mut ts, notation).map_err(|source| CliError::TypeNotation {
                    symbol: decl.name.clone(),
                    source,
                })?;
                types.insert(id, ty);
            }
        }

        let mut expr = doc.expr;
        expr.walk_mut(&mut |node| {
            let span = node.span;
            if let ExprKind::Symbol { name, symbol } = &mut node.kind {
                if symbol.is_none() {
                    match symbols.resolve(&scopes, name, span) {
                        Ok(id) => *symbol = Some(id),
                        Err(err) => resolve_errors.push(err),
                    }
                }
            }
        });
        let nodes = expr.number();
        tracing::debug!(nodes, symbols = symbols.len(), "loaded program");

        Ok(Program {
            source: doc.source,
            config: doc.config,
            expr,
            ts,
            symbols,
            types,
            resolve_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Program {
        let doc: ProgramDoc = serde_json::from_str(json).unwrap();
        Program::from_doc(doc).unwrap()
    }

    #[test]
    fn binds_references_by_name() {
        let program = doc(
            r#"{
                "symbols": [{ "name": "out", "type": "File" }],
                "expr": { "kind": { "pipe_app": {
                    "arg": { "kind": { "symbol": { "name": "out" } } },
                    "func": { "kind": { "symbol": { "name": "size" } } }
                } } }
            }"#,
        );
        assert!(program.resolve_errors.is_empty());
        let mut bound = Vec::new();
        program.expr.walk(&mut |node| {
            if let ExprKind::Symbol { symbol, .. } = &node.kind {
                bound.push(program.symbols.display_name(*symbol).to_string());
            }
        });
        assert_eq!(bound, ["out", "size"]);
        assert_eq!(program.expr.children()[1].id.0, 2);
    }

    #[test]
    fn document_symbols_shadow_the_prelude() {
        let program = doc(
            r#"{
                "symbols": [{ "name": "size", "type": "Str -> Int" }],
                "expr": { "kind": { "symbol": { "name": "size" } } }
            }"#,
        );
        assert!(program.resolve_errors.is_empty());
        let ExprKind::Symbol { symbol: Some(id), .. } = &program.expr.kind else {
            panic!("expected a bound symbol");
        };
        let ty = program.types[id];
        assert_eq!(program.ts.render(ty), "Str -> Int");
    }

    #[test]
    fn unknown_and_duplicate_names_are_reported() {
        let program = doc(
            r#"{
                "symbols": [{ "name": "a" }, { "name": "a" }],
                "expr": { "kind": { "symbol": { "name": "b" } } }
            }"#,
        );
        assert_eq!(program.resolve_errors.len(), 2);
    }

    #[test]
    fn bad_type_notation_is_an_error() {
        let doc: ProgramDoc = serde_json::from_str(
            r#"{ "symbols": [{ "name": "a", "type": "Integer" }], "expr": { "kind": "unit" } }"#,
        )
        .unwrap();
        assert!(matches!(
            Program::from_doc(doc),
            Err(CliError::TypeNotation { ref symbol, .. }) if symbol == "a"
        ));
    }
}
