// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `check` and `types` commands.

use serde::Serialize;

use pipet_diagnostics::{
    formatter::DiagnosticFormatter,
    json::{to_json_report, to_json_string},
    Diagnostic, ToDiagnostic,
};
use pipet_types::{Analysis, Analyzer, Bindings, ListLiteralPolicy, QuantifierPolicy};

use crate::error::CliError;
use crate::output;
use crate::program::Program;

/// Options shared by every command that reads a program document.
#[derive(Debug, Default)]
pub struct Options {
    pub path: String,
    pub json: bool,
    pub unify_lists: bool,
    pub prune_quantifiers: bool,
}

impl Options {
    pub fn parse(args: &[String], command: &str) -> Result<Options, CliError> {
        let mut opts = Options::default();
        let mut path = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => opts.json = true,
                "--format" => match iter.next().map(String::as_str) {
                    Some("json") => opts.json = true,
                    Some("human") => opts.json = false,
                    other => {
                        return Err(CliError::Usage(format!(
                            "--format expects `json` or `human`, got `{}`",
                            other.unwrap_or("")
                        )))
                    }
                },
                "--unify-lists" => opts.unify_lists = true,
                "--prune-quantifiers" => opts.prune_quantifiers = true,
                flag if flag.starts_with('-') => {
                    return Err(CliError::Usage(format!("unknown option: {}", flag)))
                }
                file if path.is_none() => path = Some(file.to_string()),
                extra => {
                    return Err(CliError::Usage(format!("unexpected argument: {}", extra)))
                }
            }
        }
        opts.path = path.ok_or_else(|| {
            CliError::Usage(format!("Usage: pipet {} <file.json>", command))
        })?;
        Ok(opts)
    }
}

/// Which diagnostics a run ended with.
struct Outcome {
    phase: &'static str,
    diagnostics: Vec<Diagnostic>,
}

/// Resolution errors end the run before analysis.
fn run(program: &mut Program, opts: &Options) -> Result<(Option<Analysis>, Outcome), CliError> {
    if !program.resolve_errors.is_empty() {
        let diagnostics = program.resolve_errors.iter().map(|e| e.to_diagnostic()).collect();
        return Ok((None, Outcome { phase: "resolve", diagnostics }));
    }

    let mut config = program.config;
    if opts.unify_lists {
        config.list_literals = ListLiteralPolicy::Unify;
    }
    if opts.prune_quantifiers {
        config.quantifiers = QuantifierPolicy::Prune;
    }

    let env = Bindings::with_types(&program.symbols, program.types.clone());
    let analysis = Analyzer::with_config(&mut program.ts, &env, config).analyze(&program.expr)?;
    let diagnostics = analysis.errors.iter().map(|e| e.to_diagnostic()).collect();
    Ok((Some(analysis), Outcome { phase: "types", diagnostics }))
}

/// Print diagnostics. Returns true when there were none.
fn report(program: &Program, opts: &Options, outcome: &Outcome) -> Result<bool, CliError> {
    if opts.json {
        let report = to_json_report(&outcome.diagnostics, &program.source, &opts.path, outcome.phase);
        let success = report.success;
        println!("{}", to_json_string(&report).map_err(CliError::Output)?);
        return Ok(success);
    }

    let formatter = DiagnosticFormatter::new(&program.source).with_file_name(&opts.path);
    for diag in &outcome.diagnostics {
        eprint!("{}", formatter.format(diag));
        eprintln!();
    }
    Ok(outcome.diagnostics.is_empty())
}

pub fn check(opts: &Options) -> Result<bool, CliError> {
    let mut program = Program::load(&opts.path)?;
    let (analysis, outcome) = run(&mut program, opts)?;
    let ok = report(&program, opts, &outcome)?;

    if !opts.json {
        if let (true, Some(analysis)) = (ok, &analysis) {
            println!("{}", output::type_name(program.ts.render(analysis.root)));
            println!("{}", output::banner("Check", 0));
        } else {
            eprintln!("{}", output::banner("Check", outcome.diagnostics.len()));
        }
    }
    Ok(ok)
}

#[derive(Serialize)]
struct NodeType<'a> {
    id: u32,
    kind: &'static str,
    #[serde(rename = "type")]
    ty: Option<&'a str>,
    broadcast: bool,
}

pub fn types(opts: &Options) -> Result<bool, CliError> {
    let mut program = Program::load(&opts.path)?;
    let (analysis, outcome) = run(&mut program, opts)?;

    if let Some(analysis) = &analysis {
        let mut rows = Vec::new();
        program.expr.walk(&mut |node| {
            rows.push(NodeType {
                id: node.id.0,
                kind: node.kind.name(),
                ty: analysis.type_of(node.id).map(|ty| program.ts.render(ty)),
                broadcast: analysis.is_broadcast(node.id),
            });
        });

        if opts.json {
            let json = serde_json::to_string_pretty(&rows).map_err(CliError::Output)?;
            println!("{}", json);
        } else {
            for row in &rows {
                let marker = if row.broadcast {
                    format!(" {}", output::broadcast_marker())
                } else {
                    String::new()
                };
                println!(
                    "{:>4}  {:<22} {}{}",
                    row.id,
                    row.kind,
                    output::type_name(row.ty.unwrap_or("?")),
                    marker
                );
            }
        }
    }

    if opts.json {
        // Rows own stdout in JSON mode.
        let formatter = DiagnosticFormatter::new(&program.source).with_file_name(&opts.path);
        for diag in &outcome.diagnostics {
            eprint!("{}", formatter.format(diag));
        }
        return Ok(outcome.diagnostics.is_empty());
    }
    report(&program, opts, &outcome)
}
