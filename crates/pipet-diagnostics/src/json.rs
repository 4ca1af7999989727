//! JSON diagnostic output for machine consumption.
//!
//! Use `pipet check --format json` to get this output.

use serde::Serialize;

use pipet_ast::LineMap;

use crate::codes::{self, ErrorCategory};
use crate::{Diagnostic, ErrorCode, Label, LabelStyle, Severity};

/// Every diagnostic of one run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport<'a> {
    /// Schema version.
    pub version: u32,
    pub file: &'a str,
    /// The pass that produced these diagnostics: `resolve` or `types`.
    pub phase: &'a str,
    pub success: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic<'a> {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    pub message: &'a str,
    /// Start of the primary label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Position>,
    pub labels: Vec<JsonLabel<'a>>,
    #[serde(skip_serializing_if = "no_notes")]
    pub notes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct JsonLabel<'a> {
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub start: Position,
    pub end: Position,
    /// Text of the line `start` is on.
    pub source_line: &'a str,
}

/// 1-based line and column plus the byte offset they were computed from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

fn no_notes(notes: &&[String]) -> bool {
    notes.is_empty()
}

struct Locator<'a> {
    source: &'a str,
    lines: LineMap,
}

impl<'a> Locator<'a> {
    fn position(&self, offset: usize) -> Position {
        let (line, column) = self.lines.offset_to_line_col(offset);
        Position {
            line: line as usize,
            column: column as usize,
            byte_offset: offset,
        }
    }

    fn label(&self, label: &'a Label) -> JsonLabel<'a> {
        let start = self.position(label.span.start);
        JsonLabel {
            role: label.style,
            message: label.message.as_deref(),
            start,
            end: self.position(label.span.end),
            source_line: self
                .lines
                .line_text(self.source, start.line as u32)
                .unwrap_or(""),
        }
    }

    fn diagnostic(&self, diag: &'a Diagnostic) -> JsonDiagnostic<'a> {
        JsonDiagnostic {
            severity: diag.severity,
            code: diag.code,
            category: diag
                .code
                .and_then(|code| codes::lookup(code.as_str()))
                .map(|info| info.category),
            message: &diag.message,
            location: diag.primary_span().map(|span| self.position(span.start)),
            labels: diag.labels.iter().map(|label| self.label(label)).collect(),
            notes: &diag.notes,
            help: diag.help.as_deref(),
        }
    }
}

pub fn to_json_report<'a>(
    diagnostics: &'a [Diagnostic],
    source: &'a str,
    file: &'a str,
    phase: &'a str,
) -> DiagnosticReport<'a> {
    let locator = Locator {
        source,
        lines: LineMap::new(source),
    };
    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let error_count = count(Severity::Error);

    DiagnosticReport {
        version: 1,
        file,
        phase,
        success: error_count == 0,
        error_count,
        warning_count: count(Severity::Warning),
        diagnostics: diagnostics.iter().map(|d| locator.diagnostic(d)).collect(),
    }
}

/// Pretty-printed report.
pub fn to_json_string(report: &DiagnosticReport<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipet_ast::Span;

    #[test]
    fn report_counts_and_locates() {
        let source = "[a.txt, b.txt]\n  | size";
        let diags = vec![Diagnostic::error("list elements have different types")
            .with_code("E0302")
            .with_primary(Span::new(8, 13), "element 1 is `Int`, expected `File`")];

        let report = to_json_report(&diags, source, "build.json", "types");
        assert!(!report.success);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.warning_count, 0);

        let diag = &report.diagnostics[0];
        assert_eq!(diag.category, Some(ErrorCategory::Type));
        assert_eq!(
            diag.location,
            Some(Position {
                line: 1,
                column: 9,
                byte_offset: 8
            })
        );
        assert_eq!(diag.labels[0].source_line, "[a.txt, b.txt]");

        let json = to_json_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["diagnostics"][0]["code"], "E0302");
        assert_eq!(value["diagnostics"][0]["category"], "Type");
        assert_eq!(value["diagnostics"][0]["labels"][0]["role"], "primary");
        assert!(value["diagnostics"][0].get("help").is_none());
        assert!(value["diagnostics"][0].get("notes").is_none());
    }
}
