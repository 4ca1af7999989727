//! Terminal styling for CLI output.
//!
//! NO_COLOR wins over FORCE_COLOR. Without either, `colored` decides from
//! the terminal.

use colored::{ColoredString, Colorize};

pub fn init() {
    let env_set = |name: &str| std::env::var_os(name).is_some();
    if env_set("NO_COLOR") {
        colored::control::set_override(false);
    } else if env_set("FORCE_COLOR") {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

/// `=== Check OK ===` or `=== Check FAILED: 2 errors ===`.
pub fn banner(phase: &str, errors: usize) -> String {
    let text = match errors {
        0 => format!("{} OK", phase).green().bold(),
        1 => format!("{} FAILED: 1 error", phase).red().bold(),
        n => format!("{} FAILED: {} errors", phase, n).red().bold(),
    };
    let rule = "===".dimmed();
    format!("{} {} {}", rule, text, rule)
}

pub fn type_name(rendered: &str) -> ColoredString {
    rendered.cyan()
}

pub fn broadcast_marker() -> ColoredString {
    "(broadcast)".yellow()
}

// Help text

pub fn heading(text: &str) -> ColoredString {
    text.yellow().bold()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}
