// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use colored::Colorize;

use crate::output::{arg, command, heading};

pub fn print_usage() {
    println!(
        "{} {} - type checker for Pipet programs",
        "pipet".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!();
    println!("{}: {} {} {}", heading("Usage"), command("pipet"), arg("<command>"), arg("[options]"));
    println!();

    println!("{}", heading("Commands:"));
    let commands = [
        ("check <file.json>", "Type check a program document"),
        ("types <file.json>", "Print the type of every expression"),
        ("help", "Show this help"),
        ("version", "Show version"),
    ];
    for (usage, about) in commands {
        println!("  {} {}", command(&format!("{:<20}", usage)), about);
    }
    println!();

    println!("{}", heading("Options:"));
    let options = [
        ("--format json", "Output as structured JSON"),
        ("--unify-lists", "Require list literal elements to agree"),
        ("--prune-quantifiers", "Drop unused quantified variables from results"),
    ];
    for (flag, about) in options {
        println!("  {} {}", arg(&format!("{:<20}", flag)), about);
    }
    println!();

    println!("{}", heading("Environment:"));
    println!("  {} Log filter, e.g. pipet_types=debug (default warn)", arg(&format!("{:<20}", "PIPET_LOG")));
    println!("  {} Disable colors", arg(&format!("{:<20}", "NO_COLOR")));
    println!("  {} Force colors when piped", arg(&format!("{:<20}", "FORCE_COLOR")));
}
