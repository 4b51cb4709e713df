/// Run summaries and the JSON report.
///
/// The summary aggregates a list of outcomes into counts; the JSON report
/// bundles the summary with every outcome and a timestamp.
use crate::file_organizer::{Action, MoveOutcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Aggregate counts over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of files visited.
    pub total: usize,
    /// Moves planned in dry-run mode.
    pub planned: usize,
    /// Moves actually performed.
    pub moved: usize,
    /// Files skipped for any reason.
    pub skipped: usize,
    /// Files that hit an error.
    pub errors: usize,
}

impl Summary {
    /// Counts the outcomes of a run.
    pub fn from_outcomes(outcomes: &[MoveOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut summary, outcome| {
                match outcome.action {
                    Action::Moved if outcome.is_planned() => summary.planned += 1,
                    Action::Moved => summary.moved += 1,
                    Action::Skipped => summary.skipped += 1,
                    Action::Error => summary.errors += 1,
                }
                summary
            },
        )
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total files: {}", self.total)?;
        writeln!(f, "Planned moves (dry-run): {}", self.planned)?;
        writeln!(f, "Moved: {}", self.moved)?;
        writeln!(f, "Skipped: {}", self.skipped)?;
        write!(f, "Errors: {}", self.errors)
    }
}

/// Errors that can occur while writing the JSON report.
#[derive(Debug)]
pub enum ReportError {
    /// Serializing the report failed.
    Serialize(serde_json::Error),
    /// Writing the report file failed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(e) => write!(f, "Failed to serialize report: {}", e),
            Self::Write { path, source } => {
                write!(f, "Failed to write report {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// Everything known about one run, as written to the JSON report.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// RFC 3339 timestamp of when the report was produced.
    pub generated_at: String,
    pub source: &'a Path,
    pub dest: &'a Path,
    pub dry_run: bool,
    pub summary: Summary,
    pub outcomes: &'a [MoveOutcome],
}

impl<'a> RunReport<'a> {
    pub fn new(source: &'a Path, dest: &'a Path, dry_run: bool, outcomes: &'a [MoveOutcome]) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source,
            dest,
            dry_run,
            summary: Summary::from_outcomes(outcomes),
            outcomes,
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(ReportError::Serialize)
    }

    /// Writes the report to `path`.
    pub fn write(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_organizer::Reason;
    use tempfile::TempDir;

    fn outcome(action: Action, reason: Option<Reason>) -> MoveOutcome {
        MoveOutcome {
            path: PathBuf::from("f"),
            action,
            reason,
            dest: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            outcome(Action::Moved, Some(Reason::DryRun)),
            outcome(Action::Moved, Some(Reason::DryRun)),
            outcome(Action::Moved, None),
            outcome(Action::Skipped, Some(Reason::Excluded)),
            outcome(Action::Error, Some(Reason::OsError("x".to_string()))),
        ];

        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            Summary {
                total: 5,
                planned: 2,
                moved: 1,
                skipped: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            total: 3,
            planned: 3,
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "Total files: 3\nPlanned moves (dry-run): 3\nMoved: 0\nSkipped: 0\nErrors: 0"
        );
    }

    #[test]
    fn test_report_json_roundtrip_fields() {
        let outcomes = vec![outcome(Action::Skipped, Some(Reason::NotAFile))];
        let report = RunReport::new(Path::new("/src"), Path::new("/dst"), true, &outcomes);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["source"], "/src");
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["summary"]["skipped"], 1);
        assert_eq!(value["outcomes"][0]["reason"], "not-a-file");
        assert!(value["generated_at"].as_str().is_some());
    }

    #[test]
    fn test_report_write_to_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let report = RunReport::new(temp_dir.path(), temp_dir.path(), true, &[]);
        let result = report.write(&temp_dir.path().join("missing").join("report.json"));
        assert!(matches!(result, Err(ReportError::Write { .. })));
    }
}
