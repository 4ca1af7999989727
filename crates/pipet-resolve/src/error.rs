// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name resolution errors.

use pipet_ast::Span;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveErrorKind {
    #[error("symbol named `{name}` already declared")]
    DuplicateDefinition { name: String, previous: Span },
    #[error("undefined symbol `{name}`")]
    UndefinedSymbol { name: String },
}
