//! Terminal output helpers for CLI reports.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print a section heading.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<14} {}", format!("{label}:").dimmed(), value);
}

/// Print a success line.
pub fn success(message: impl Display) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: impl Display) {
    println!("  {} {}", "!".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: impl Display) {
    eprintln!("  {} {}", "✗".red(), message);
}
