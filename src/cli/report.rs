//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format on stdout; progress notes and
//! warnings go to stderr.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExportSummary, ImportSummary, InitSummary, PatchSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a warning about dialogue blocks missing from the table.
pub fn print_lookup_miss_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} dialogue block(s) have no translation in the table (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})\n",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

/// Print a command's issues and summary.
///
/// Lookup misses are folded into one warning line unless `verbose` is set.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    let (shown, folded): (Vec<Issue>, Vec<Issue>) = result
        .issues
        .iter()
        .cloned()
        .partition(|issue| verbose || !matches!(issue, Issue::LookupMiss(_)));

    report_to(&shown, out);
    print_lookup_miss_warning_to(folded.len(), err);

    match &result.summary {
        CommandSummary::Export(summary) => print_export(summary, result.files_processed, out),
        CommandSummary::Patch(summary) => print_patch(summary, out),
        CommandSummary::Import(summary) => print_import(summary, result.files_processed, out),
        CommandSummary::Init(summary) => print_init(summary, out),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_export<W: Write>(summary: &ExportSummary, files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Exported {} from {} to {}",
            plural(summary.unit_count, "unit"),
            plural(files, "file"),
            summary.table_path
        )
        .green()
    );
    if summary.replaced_existing {
        let _ = writeln!(writer, "{} overwrote the existing table", "note:".bold());
    }
}

fn print_patch<W: Write>(summary: &PatchSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Patched {} in {}",
            plural(summary.patched_rows, "row"),
            summary.table_path
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  - unique: {}, repeat: {}, unmatched: {}",
        summary.unique_count, summary.ambiguous_count, summary.unmatched_count
    );
    if summary.unrecognized_lines > 0 {
        let _ = writeln!(
            writer,
            "{} {} inside conditional blocks not recognized as dialogue",
            "note:".bold(),
            plural(summary.unrecognized_lines, "quoted line")
        );
    }
}

fn print_import<W: Write>(summary: &ImportSummary, files: usize, writer: &mut W) {
    let message = if summary.substitutions == 0 {
        format!(
            "Translation scripts are up to date ({} checked)",
            plural(files, "file")
        )
    } else {
        format!(
            "Updated {} in {}",
            plural(summary.substitutions, "line"),
            plural(summary.files_written, "file")
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    if summary.skipped_rows > 0 {
        let _ = writeln!(
            writer,
            "{} {} without original, translation or location ignored",
            "note:".bold(),
            plural(summary.skipped_rows, "table row")
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
