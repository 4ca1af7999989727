// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors that stop a command before any diagnostics are produced.

use pipet_diagnostics::{Diagnostic, ToDiagnostic};
use pipet_types::{MalformedType, ParseTypeError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("`{path}` is not a valid program document: {source}")]
    Document {
        path: String,
        source: serde_json::Error,
    },
    #[error("bad type for symbol `{symbol}`: {source}")]
    TypeNotation {
        symbol: String,
        source: ParseTypeError,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedType),
    #[error("cannot serialize output: {0}")]
    Output(serde_json::Error),
}

impl CliError {
    /// Errors that carry enough detail to be shown as a diagnostic.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            CliError::TypeNotation { symbol, source } => Some(
                source
                    .to_diagnostic()
                    .with_note(format!("in the declared type of `{}`", symbol)),
            ),
            CliError::Malformed(err) => Some(err.to_diagnostic()),
            _ => None,
        }
    }
}
