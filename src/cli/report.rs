//! Status and summary output for the CLI.
//!
//! Generated source lists go to stdout; everything in here goes to the
//! writer the caller picks (stdout for final status lines, stderr for the
//! verbose per-platform summary) so piping `generate` stays clean.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::manifest::PlatformSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_success(message: &str) {
    print_success_to(message, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

pub fn print_failure(message: &str) {
    print_failure_to(message, &mut io::stdout().lock());
}

pub fn print_failure_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}

/// Print one line per extracted platform to stderr.
pub fn print_summaries(summaries: &[PlatformSummary]) {
    print_summaries_to(summaries, &mut io::stderr().lock());
}

pub fn print_summaries_to<W: Write>(summaries: &[PlatformSummary], writer: &mut W) {
    let name_width = summaries
        .iter()
        .map(|s| UnicodeWidthStr::width(s.name.as_str()))
        .max()
        .unwrap_or(0);

    for summary in summaries {
        let padding = name_width - UnicodeWidthStr::width(summary.name.as_str());
        let mut line = format!(
            "{}{:padding$}  {} compiled, {} assembly",
            summary.name.bold(),
            "",
            summary.compiled_count,
            summary.assembly_count,
            padding = padding
        );
        if !summary.block_found {
            line.push_str(&format!("  {}", "(no sources block)".yellow()));
        }
        if summary.diverged {
            line.push_str(&format!("  {}", "(compiled sources diverge)".yellow()));
        }
        let _ = writeln!(writer, "{}", line);
        let _ = writeln!(
            writer,
            "  {} {}",
            "-->".blue(),
            summary.path.display()
        );
    }
}
