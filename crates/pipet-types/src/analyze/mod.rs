// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Bottom-up type assignment over the AST.

use std::collections::{HashMap, HashSet};

use pipet_ast::{Expr, ExprKind, NodeId};

use crate::config::AnalyzerConfig;
use crate::env::SymbolEnv;
use crate::errors::{MalformedType, TypeError};
use crate::system::TypeSystem;
use crate::types::TypeId;

mod apply;
mod literals;

/// Result of analyzing one expression tree.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Type of the root node.
    pub root: TypeId,
    /// Type of every node, `Invalid` where typing failed.
    pub node_types: HashMap<NodeId, TypeId>,
    /// Pipe applications that map their function over a list argument.
    pub broadcasts: HashSet<NodeId>,
    /// Recoverable errors in the order they were found.
    pub errors: Vec<TypeError>,
}

impl Analysis {
    pub fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    pub fn is_broadcast(&self, node: NodeId) -> bool {
        self.broadcasts.contains(&node)
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Assigns a type to every node of an expression tree.
///
/// Node ids must be unique within the tree (see [`Expr::number`]); results
/// are keyed by them.
pub struct Analyzer<'a, E: SymbolEnv + ?Sized> {
    ts: &'a mut TypeSystem,
    env: &'a E,
    config: AnalyzerConfig,
    node_types: HashMap<NodeId, TypeId>,
    broadcasts: HashSet<NodeId>,
    errors: Vec<TypeError>,
}

impl<'a, E: SymbolEnv + ?Sized> Analyzer<'a, E> {
    pub fn new(ts: &'a mut TypeSystem, env: &'a E) -> Self {
        Self::with_config(ts, env, AnalyzerConfig::default())
    }

    pub fn with_config(ts: &'a mut TypeSystem, env: &'a E, config: AnalyzerConfig) -> Self {
        Self {
            ts,
            env,
            config,
            node_types: HashMap::new(),
            broadcasts: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Type the whole tree.
    ///
    /// Type errors are collected in the returned [`Analysis`]; only a
    /// malformed type representation stops the pass.
    pub fn analyze(mut self, root: &Expr) -> Result<Analysis, MalformedType> {
        let root = self.expr(root)?;
        Ok(Analysis {
            root,
            node_types: self.node_types,
            broadcasts: self.broadcasts,
            errors: self.errors,
        })
    }

    fn expr(&mut self, e: &Expr) -> Result<TypeId, MalformedType> {
        let ty = match &e.kind {
            ExprKind::Symbol { name, symbol } => self.symbol(name, *symbol, e.span),
            ExprKind::Str(_) | ExprKind::File(_) => self.ts.file(),
            ExprKind::Glob(_) => {
                let file = self.ts.file();
                self.ts.make_list(file)
            }
            ExprKind::Int(_) => self.ts.int(),
            ExprKind::Bool(_) => self.ts.bool(),
            ExprKind::Unit => self.ts.unit(),
            ExprKind::List(items) => self.list(items, e.span)?,
            ExprKind::Tuple(items) => self.tuple(items)?,
            ExprKind::PipeApp { arg, func } => self.pipe(e.id, arg, func, e.span)?,
            ExprKind::FnApp { func, args } => self.fn_app(func, args, e.span)?,
            ExprKind::Binary { .. } | ExprKind::Let { .. } => self.unhandled(e)?,
            // Already reported by the parser.
            ExprKind::Invalid => self.ts.invalid(),
        };
        tracing::debug!(
            node = e.id.0,
            kind = e.kind.name(),
            ty = self.ts.render(ty),
            "typed node"
        );
        self.node_types.insert(e.id, ty);
        Ok(ty)
    }

    /// Analyze the children of a node kind without a typing rule, then give
    /// up on the node itself.
    fn unhandled(&mut self, e: &Expr) -> Result<TypeId, MalformedType> {
        for child in e.children() {
            self.expr(child)?;
        }
        self.error(TypeError::UnhandledNodeKind {
            kind: e.kind.name(),
            span: e.span,
        });
        Ok(self.ts.invalid())
    }

    fn error(&mut self, error: TypeError) {
        tracing::debug!(%error, "type error");
        self.errors.push(error);
    }

    fn render(&self, ty: TypeId) -> String {
        self.ts.render(ty).to_string()
    }
}

/// Analyze `root` with the default configuration.
pub fn analyze<E: SymbolEnv + ?Sized>(
    ts: &mut TypeSystem,
    env: &E,
    root: &Expr,
) -> Result<Analysis, MalformedType> {
    Analyzer::new(ts, env).analyze(root)
}
