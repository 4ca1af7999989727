// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pipet diagnostics.
//!
//! Every error type produced by the symbol table and the type checker
//! converts to a [`Diagnostic`] through [`ToDiagnostic`]. The CLI renders
//! them for the terminal or as JSON.

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;
pub mod suggestions;

use std::fmt;

use pipet_ast::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

/// Registered code such as `E0301`. See [`codes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Underlined with `^`.
    Primary,
    /// Underlined with `-`.
    Secondary,
}

/// A source span with an optional message.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub span: Span,
    pub style: LabelStyle,
    pub message: Option<String>,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            style: LabelStyle::Primary,
            message: Some(message.into()),
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            style: LabelStyle::Secondary,
            message: Some(message.into()),
        }
    }
}

/// One reportable problem: a headline, the spans it points at, and
/// free-form notes and help shown below the snippet.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(ErrorCode(code));
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_primary(self, span: Span, message: impl Into<String>) -> Self {
        self.with_label(Label::primary(span, message))
    }

    pub fn with_secondary(self, span: Span, message: impl Into<String>) -> Self {
        self.with_label(Label::secondary(span, message))
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Replaces any earlier help.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The first primary label's span, else the first label's.
    pub fn primary_span(&self) -> Option<Span> {
        let mut labels = self.labels.iter();
        labels
            .clone()
            .find(|label| label.style == LabelStyle::Primary)
            .or_else(|| labels.next())
            .map(|label| label.span)
    }
}

/// Conversion from a pass's error type.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_span_prefers_primary_labels() {
        let diag = Diagnostic::error("duplicate definition: `src`")
            .with_secondary(Span::new(0, 3), "previously defined here")
            .with_primary(Span::new(4, 7), "redefined here");
        assert_eq!(diag.primary_span(), Some(Span::new(4, 7)));

        let diag = Diagnostic::error("x").with_secondary(Span::new(1, 2), "here");
        assert_eq!(diag.primary_span(), Some(Span::new(1, 2)));
        assert_eq!(Diagnostic::error("x").primary_span(), None);
    }

    #[test]
    fn serializes_codes_as_strings() {
        let diag = Diagnostic::error("empty list literal").with_code("E0303");
        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["code"], "E0303");
        assert_eq!(value["severity"], "error");
        assert!(diag.is_error());
    }
}
