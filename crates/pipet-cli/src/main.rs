// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pipet type checker CLI.

mod commands;
mod error;
mod help;
mod output;
mod program;

use std::env;
use std::process;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use pipet_diagnostics::formatter::DiagnosticFormatter;

use commands::Options;
use error::CliError;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PIPET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    output::init();
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        help::print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => Options::parse(&args[2..], "check").and_then(|opts| commands::check(&opts)),
        "types" => Options::parse(&args[2..], "types").and_then(|opts| commands::types(&opts)),
        "help" | "--help" | "-h" => {
            help::print_usage();
            Ok(true)
        }
        "version" | "--version" | "-V" => {
            println!("pipet {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        other => Err(CliError::Usage(format!(
            "unknown command: {}\nRun 'pipet help' for usage",
            other
        ))),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            match err.diagnostic() {
                Some(diag) => eprint!("{}", DiagnosticFormatter::new("").format(&diag)),
                None => eprintln!("{}: {}", output::error_label(), err),
            }
            process::exit(if matches!(err, CliError::Usage(_)) { 2 } else { 1 });
        }
    }
}
