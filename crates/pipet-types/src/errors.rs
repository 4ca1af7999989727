// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker error types.

use pipet_ast::Span;

/// A recoverable type error. The offending node is typed `Invalid` and
/// analysis continues. Types are carried pre-rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("untyped symbol `{name}`")]
    UntypedSymbol { name: String, span: Span },
    #[error("cannot apply `{function}` to an argument of type `{argument}`")]
    ApplicationMismatch {
        function: String,
        argument: String,
        /// Parameter type of `function`, when it is a function at all.
        expected: Option<String>,
        /// Argument position in a multi-argument application.
        position: Option<usize>,
        span: Span,
    },
    #[error("list element {index} has type `{found}`, which does not agree with `{expected}`")]
    ElementMismatch {
        expected: String,
        found: String,
        index: usize,
        span: Span,
    },
    #[error("empty list literals are not supported")]
    EmptyListLiteral { span: Span },
    #[error("no typing rule for {kind}")]
    UnhandledNodeKind { kind: &'static str, span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UntypedSymbol { span, .. }
            | TypeError::ApplicationMismatch { span, .. }
            | TypeError::ElementMismatch { span, .. }
            | TypeError::EmptyListLiteral { span }
            | TypeError::UnhandledNodeKind { span, .. } => *span,
        }
    }
}

/// The type representation itself is inconsistent. Analysis stops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedType {
    #[error("type variables `{left}` and `{right}` compared for equality; variables need unification")]
    VariableEquality { left: String, right: String },
    #[error("quantified types `{left}` and `{right}` compared for equality; quantifiers need unification")]
    QuantifierEquality { left: String, right: String },
    #[error("`{ty}` is not a function type")]
    NotAFunction { ty: String },
}
