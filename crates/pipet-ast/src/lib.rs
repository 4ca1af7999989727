// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Pipet language.
//!
//! The parser produces these nodes with symbol references already bound;
//! semantic analysis reads them and records its results in side tables
//! keyed by [`NodeId`].

pub mod span;
pub mod expr;

pub use span::{Span, LineMap};
pub use expr::{BinOp, Expr, ExprKind};

/// Unique identifier for AST nodes.
///
/// Used by semantic analysis passes to attach types and application flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Unique identifier for a declared symbol, handed out by the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub u32);
