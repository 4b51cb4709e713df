//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored messages, the
//! scan progress bar, the per-file report table and the closing summary.

use crate::file_organizer::{Action, MoveOutcome};
use crate::report::Summary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Title printed above the per-file table.
pub const REPORT_TITLE: &str = "Declutter Report";

/// Placeholder for empty table cells.
const PLACEHOLDER: &str = "-";

const HEADERS: [&str; 4] = ["File", "Action", "Destination", "Reason"];

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for a scan over `total` files.
    ///
    /// Hidden entirely when `visible` is false.
    pub fn create_progress_bar(total: u64, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Returns the plain-text cells of the report table, one row per outcome.
    pub fn table_rows(outcomes: &[MoveOutcome]) -> Vec<[String; 4]> {
        outcomes
            .iter()
            .map(|outcome| {
                [
                    outcome.path.display().to_string(),
                    outcome.action.to_string(),
                    outcome
                        .dest
                        .as_ref()
                        .map(|dest| dest.display().to_string())
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    outcome
                        .reason
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                ]
            })
            .collect()
    }

    /// Prints the per-file report table.
    ///
    /// Always prints every outcome, whatever their action.
    pub fn report_table(outcomes: &[MoveOutcome]) {
        let rows = Self::table_rows(outcomes);

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        println!("\n{}", REPORT_TITLE.bold());
        let header = HEADERS
            .iter()
            .zip(widths)
            .map(|(title, width)| format!("{:<width$}", title, width = width))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{}", header.bold());
        println!("{}", "-".repeat(rule_len));

        for (row, outcome) in rows.iter().zip(outcomes) {
            // Pad before coloring so escape codes don't skew the columns
            let [file, action, dest, reason] = row;
            let file = format!("{:<width$}", file, width = widths[0]).cyan();
            let action = format!("{:<width$}", action, width = widths[1]);
            let action = match outcome.action {
                Action::Moved => action.green(),
                Action::Skipped => action.yellow(),
                Action::Error => action.red(),
            };
            let dest = format!("{:<width$}", dest, width = widths[2]).green();
            let reason = format!("{:<width$}", reason, width = widths[3]).yellow();
            println!("{} | {} | {} | {}", file, action, dest, reason);
        }

        println!("{}", "-".repeat(rule_len));
    }

    /// Prints the closing summary in bold green.
    pub fn summary(summary: &Summary) {
        println!("\n{}", summary.to_string().green().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_organizer::Reason;
    use std::path::PathBuf;

    #[test]
    fn test_table_rows_use_placeholders() {
        let outcomes = vec![
            MoveOutcome::excluded(&PathBuf::from("secret.key")),
            MoveOutcome {
                path: PathBuf::from("a.txt"),
                action: Action::Moved,
                reason: None,
                dest: Some(PathBuf::from("Documents/a.txt")),
            },
            MoveOutcome {
                path: PathBuf::from("b.png"),
                action: Action::Moved,
                reason: Some(Reason::DryRun),
                dest: Some(PathBuf::from("Images/b.png")),
            },
        ];

        let rows = OutputFormatter::table_rows(&outcomes);

        assert_eq!(rows[0], ["secret.key", "skipped", "-", "excluded"].map(String::from));
        assert_eq!(rows[1][3], "-");
        assert_eq!(rows[1][2], PathBuf::from("Documents/a.txt").display().to_string());
        assert_eq!(rows[2][1], "moved");
        assert_eq!(rows[2][3], "dry-run");
    }

    #[test]
    fn test_hidden_progress_bar() {
        let pb = OutputFormatter::create_progress_bar(10, false);
        assert!(pb.is_hidden());
        pb.inc(1);
        assert_eq!(pb.position(), 1);
    }
}
