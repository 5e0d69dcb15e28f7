//! Report formatting and printing utilities.
//!
//! Separate from core logic so the engine can be used as a library. Every
//! printer has a `_to` variant writing to any [`Write`] for testing.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CreateSummary, FileChange, FileFailure};
use crate::core::{MatchResult, TallyRecord};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Pad `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Print a table with a bold header row; column widths follow the widest cell.
fn print_table_to<W: Write>(header: &[&str], rows: &[Vec<String>], writer: &mut W) {
    let mut widths: Vec<usize> = header.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let last = header.len().saturating_sub(1);
    let header_line: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, h)| if i == last { h.to_string() } else { pad(h, widths[i]) })
        .collect();
    let _ = writeln!(writer, "{}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| if i == last { cell.clone() } else { pad(cell, widths[i]) })
            .collect();
        let _ = writeln!(writer, "{}", line.join("  ").trim_end());
    }
}

// ============================================================
// create
// ============================================================

/// Print the line changes `create` would make, cargo-style.
pub fn print_changes_to<W: Write>(changes: &[FileChange], writer: &mut W) {
    for change in changes {
        let max_line_width = change
            .edits
            .iter()
            .map(|edit| edit.line.to_string().len())
            .max()
            .unwrap_or(1);

        let _ = writeln!(writer, "  {} {}", "-->".blue(), change.path);
        for edit in &change.edits {
            let line_number = format!("{:>width$}", edit.line, width = max_line_width + 1);
            let _ = writeln!(writer, "{} {} {}", line_number.blue(), "-".red(), edit.before);
            let _ = writeln!(
                writer,
                "{} {} {}",
                " ".repeat(max_line_width + 1),
                "+".green(),
                edit.after
            );
        }
        let _ = writeln!(writer);
    }
}

/// Print the audit listing of every visited field.
pub fn print_results_to<W: Write>(results: &[MatchResult], writer: &mut W) {
    if results.is_empty() {
        return;
    }
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.file_path.clone(),
                r.field_path.clone(),
                r.value.clone(),
                r.comment.clone(),
            ]
        })
        .collect();
    print_table_to(&["FILE", "FIELD", "VALUE", "COMMENT"], &rows, writer);
    let _ = writeln!(writer);
}

pub fn print_create_summary_to<W: Write>(summary: &CreateSummary, writer: &mut W) {
    let field_count: usize = summary.changes.iter().map(|c| c.edits.len()).sum();
    let file_count = summary.changes.len();

    if field_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - no new annotations",
                summary.files_checked,
                plural(summary.files_checked, "file", "files")
            )
            .green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} annotation(s) in {} file(s).",
            "Wrote".green().bold(),
            field_count,
            file_count
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} annotation(s) in {} file(s).",
            "Would write".yellow().bold(),
            field_count,
            file_count
        );
        let _ = writeln!(
            writer,
            "Run with {} to write these annotations.",
            "--apply".cyan()
        );
    }

    if summary.unwritable_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} annotation(s) cannot be written as trailing comments (multi-line values)",
            "warning:".bold().yellow(),
            summary.unwritable_count
        );
    }
}

pub fn print_create(summary: &CreateSummary, verbose: bool) {
    let mut stdout = io::stdout().lock();
    if verbose {
        print_results_to(&summary.results, &mut stdout);
    }
    if !summary.is_apply {
        print_changes_to(&summary.changes, &mut stdout);
    }
    print_create_summary_to(summary, &mut stdout);
}

// ============================================================
// list
// ============================================================

/// Print one row per setter: name, recorded value, type and usage count.
pub fn print_tally_to<W: Write>(records: &[TallyRecord], writer: &mut W) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.value.clone(),
                r.kind.as_str().to_string(),
                r.count.to_string(),
            ]
        })
        .collect();
    print_table_to(&["NAME", "VALUE", "TYPE", "COUNT"], &rows, writer);
}

pub fn print_tally(records: &[TallyRecord]) {
    print_tally_to(records, &mut io::stdout().lock());
}

// ============================================================
// errors
// ============================================================

/// Print files that could not be read or parsed.
pub fn print_failures_to<W: Write>(failures: &[FileFailure], skipped_count: usize, writer: &mut W) {
    for failure in failures {
        let _ = writeln!(
            writer,
            "{}: failed to load {}: {}",
            "error".bold().red(),
            failure.path,
            failure.message
        );
    }
    if skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed",
            "warning:".bold().yellow(),
            skipped_count
        );
    }
    if !failures.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} {} skipped",
            FAILURE_MARK.red(),
            failures.len(),
            plural(failures.len(), "file", "files")
        );
    }
}

pub fn print_failures(failures: &[FileFailure], skipped_count: usize) {
    print_failures_to(failures, skipped_count, &mut io::stderr().lock());
}
