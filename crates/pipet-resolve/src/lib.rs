// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbol table and scope tree for the Pipet language.
//!
//! The parser declares symbols here while it builds the AST and binds each
//! symbol reference to a [`SymbolId`]. Later passes only read from it.

mod error;
mod scope;
mod symbol;

pub use error::{ResolveError, ResolveErrorKind};
pub use scope::{Scope, ScopeId, ScopeTree};
pub use symbol::{Symbol, SymbolTable};

pub use pipet_ast::SymbolId;
