// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from error types to `Diagnostic`.

use crate::suggestions::did_you_mean;
use crate::{Diagnostic, ToDiagnostic};

/// Primitive type names accepted in type notation.
const PRIMITIVE_TYPES: [&str; 5] = ["Int", "Num", "Bool", "Str", "File"];

// ============================================================================
// Resolve Errors
// ============================================================================

impl ToDiagnostic for pipet_resolve::ResolveError {
    fn to_diagnostic(&self) -> Diagnostic {
        use pipet_resolve::ResolveErrorKind::*;

        match &self.kind {
            UndefinedSymbol { name } => Diagnostic::error(format!("undefined symbol: `{}`", name))
                .with_code("E0200")
                .with_primary(self.span, "not found in this scope"),

            DuplicateDefinition { name, previous } => {
                Diagnostic::error(format!("duplicate definition: `{}`", name))
                    .with_code("E0201")
                    .with_primary(self.span, "redefined here")
                    .with_secondary(*previous, "previously defined here")
            }
        }
    }
}

// ============================================================================
// Type Errors
// ============================================================================

impl ToDiagnostic for pipet_types::TypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        use pipet_types::TypeError::*;

        match self {
            UntypedSymbol { name, span } => {
                Diagnostic::error(format!("symbol `{}` has no type", name))
                    .with_code("E0300")
                    .with_primary(*span, "type unknown")
                    .with_help("declare the symbol with a type before using it")
            }

            ApplicationMismatch {
                function,
                argument,
                expected,
                position,
                span,
            } => {
                let message = match position {
                    Some(pos) => format!(
                        "argument {} does not fit `{}`",
                        pos + 1,
                        function
                    ),
                    None => format!("cannot apply `{}`", function),
                };
                let label = match expected {
                    Some(expected) => format!("expected `{}`, found `{}`", expected, argument),
                    None => format!("`{}` is not a function", function),
                };
                let mut diag = Diagnostic::error(message)
                    .with_code("E0301")
                    .with_primary(*span, label);
                if position.is_none() && expected.is_some() {
                    diag = diag.with_note(
                        "a list argument is mapped over only when its elements fit the function",
                    );
                }
                diag
            }

            ElementMismatch {
                expected,
                found,
                index,
                span,
            } => Diagnostic::error("list elements have different types")
                .with_code("E0302")
                .with_primary(
                    *span,
                    format!("element {} is `{}`, expected `{}`", index, found, expected),
                ),

            EmptyListLiteral { span } => Diagnostic::error("empty list literal")
                .with_code("E0303")
                .with_primary(*span, "element type cannot be determined")
                .with_note("empty list literals are not supported yet"),

            UnhandledNodeKind { kind, span } => {
                Diagnostic::error(format!("no typing rule for {}", kind))
                    .with_code("E0399")
                    .with_primary(*span, "cannot type this expression")
                    .with_note("this is a bug in the analyzer, not in the program")
            }
        }
    }
}

impl ToDiagnostic for pipet_types::MalformedType {
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_code("E0398")
            .with_note("analysis stopped: the type representation is inconsistent")
    }
}

impl ToDiagnostic for pipet_types::ParseTypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        use pipet_types::ParseTypeError::*;

        let diag = Diagnostic::error(format!("invalid type: {}", self)).with_code("E0304");
        match self {
            UnknownType { name, .. } => match did_you_mean(name, PRIMITIVE_TYPES) {
                Some(hint) => diag.with_help(hint),
                None => diag.with_help(format!(
                    "known types are {}",
                    PRIMITIVE_TYPES.join(", ")
                )),
            },
            _ => diag,
        }
    }
}
