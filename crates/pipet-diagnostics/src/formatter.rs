// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0301]: cannot apply `File -> Int`
//!   --> build.pt:1:1
//!     |
//!   1 | true | size
//!     | ^^^^^^^^^^^ expected `File`, found `Bool`
//!     = note: a list argument is mapped over only when its elements fit the function
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use pipet_ast::LineMap;

use crate::{Diagnostic, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with the labels that start on it.
struct AnnotatedLine<'d> {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation<'d>>,
}

struct Annotation<'d> {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<&'d str>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let gutter_width = annotated
            .last()
            .map(|a| a.line_num.to_string().len())
            .unwrap_or(1)
            .max(2);

        if let (false, Some(span)) = (annotated.is_empty(), diagnostic.primary_span()) {
            let (line, col) = self.offset_to_line_col(span.start);
            out.push_str(&format!(
                "{}{} {}:{}:{}\n",
                " ".repeat(gutter_width),
                "-->".blue(),
                self.file_name.unwrap_or("<source>"),
                line,
                col
            ));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));

            let mut prev_line_num: Option<usize> = None;
            for line in &annotated {
                if matches!(prev_line_num, Some(prev) if line.line_num > prev + 1) {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
                out.push_str(&format!(
                    "{:>width$} {} {}\n",
                    line.line_num.to_string().blue().bold(),
                    "|".blue(),
                    line.text,
                    width = gutter_width + 1,
                ));
                self.format_annotations(&mut out, line, gutter_width);
                prev_line_num = Some(line.line_num);
            }
        }

        self.format_footer(&mut out, diagnostic, gutter_width);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter_width: usize) {
        let indent = " ".repeat(gutter_width + 1);
        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "note".cyan().bold(), note));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines<'d>(&self, diagnostic: &'d Diagnostic) -> Vec<AnnotatedLine<'d>> {
        let mut lines: BTreeMap<usize, AnnotatedLine<'d>> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.offset_to_line_col(label.span.end);
            let text = self.get_line(line_num).unwrap_or("");

            // Multi-line spans are underlined to the end of their first line.
            let col_end = if end_line == line_num {
                col_end
            } else {
                text.len() + 1
            };

            lines
                .entry(line_num)
                .or_insert_with(|| AnnotatedLine {
                    line_num,
                    text: text.to_string(),
                    annotations: Vec::new(),
                })
                .annotations
                .push(Annotation {
                    col_start,
                    col_end: col_end.max(col_start + 1),
                    style: label.style,
                    message: label.message.as_deref(),
                });
        }

        lines.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, line: &AnnotatedLine<'_>, gutter_width: usize) {
        let mut sorted: Vec<&Annotation<'_>> = line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style == LabelStyle::Secondary, a.col_start));

        let width = sorted.iter().map(|a| a.col_end).max().unwrap_or(0);
        let mut underline = vec![' '; width];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();
        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in &mut underline[ann.col_start - 1..ann.col_end - 1] {
                if *slot == ' ' {
                    *slot = ch;
                }
            }
            if let Some(msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline: String = underline.into_iter().collect();
        let underline = color_underline(underline.trim_end());
        let gutter = format!("{} {}", " ".repeat(gutter_width + 1), "|".blue());

        match messages.as_slice() {
            [] => out.push_str(&format!("{} {}\n", gutter, underline)),
            [(_, style, msg)] => {
                out.push_str(&format!("{} {} {}\n", gutter, underline, styled(msg, *style)))
            }
            many => {
                out.push_str(&format!("{} {}\n", gutter, underline));
                for (col, style, msg) in many.iter().rev() {
                    out.push_str(&format!(
                        "{} {}{} {}\n",
                        gutter,
                        " ".repeat(col - 1),
                        styled("|", *style),
                        styled(msg, *style),
                    ));
                }
            }
        }
    }

    /// Convert byte offset to (line, col), both 1-based.
    fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let (line, col) = self.line_map.offset_to_line_col(offset);
        (line as usize, col as usize)
    }

    /// Source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&'a str> {
        self.line_map.line_text(self.source, line_num as u32)
    }
}

fn styled(text: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => text.red().bold().to_string(),
        LabelStyle::Secondary => text.blue().to_string(),
    }
}

/// Color runs of `^` red and runs of `-` blue.
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        let run_len = rest.find(|c| c != first).unwrap_or(rest.len());
        let (run, tail) = rest.split_at(run_len);
        match first {
            '^' => result.push_str(&styled(run, LabelStyle::Primary)),
            '-' => result.push_str(&styled(run, LabelStyle::Secondary)),
            _ => result.push_str(run),
        }
        rest = tail;
    }
    result
}
