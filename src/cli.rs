//! Command-line interface for declutter.
//!
//! This module handles argument parsing and validation, and drives a run:
//! configuration loading, the scan itself, and the final report.

use crate::config::{Config, ConfigError};
use crate::output::OutputFormatter;
use crate::report::{ReportError, RunReport, Summary};
use crate::scanner;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Sort a folder into category subfolders (Images, Documents, ...).
///
/// Nothing is moved unless `--execute` is given.
#[derive(Debug, Parser)]
#[command(name = "declutter")]
#[command(about = "Digital declutter assistant: organize files into category folders")]
#[command(version)]
pub struct Args {
    /// Folder to clean up
    pub source: PathBuf,

    /// Where to move organized files (defaults to the source folder)
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Preview without changes (the default)
    #[arg(long, conflicts_with = "execute")]
    pub dry_run: bool,

    /// Actually perform the moves
    #[arg(long)]
    pub execute: bool,

    /// Glob patterns to skip
    #[arg(long, value_name = "PATTERN", num_args = 0.., action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Configuration file (defaults to .declutterrc.toml, then ~/.config/declutter/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write the report as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Preview is on unless `--execute` was given explicitly.
    pub fn preview(&self) -> bool {
        !self.execute
    }

    /// Log level selected by the `-v` count.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Source and destination roots after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Expands a leading `~` to `$HOME`.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    path.to_path_buf()
}

/// Validates the source folder and resolves both roots to absolute paths.
///
/// # Errors
///
/// Returns a message if the source does not exist or is not a directory, or
/// if the destination cannot be made absolute.
pub fn resolve_paths(source: &Path, dest: Option<&Path>) -> Result<ResolvedPaths, String> {
    let source = expand_home(source);
    let source = source
        .canonicalize()
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| {
            format!(
                "Source path does not exist or is not a directory: {}",
                source.display()
            )
        })?;

    let dest = match dest {
        Some(dest) => {
            let dest = expand_home(dest);
            // The destination may not exist yet, so it can't be canonicalized
            std::path::absolute(&dest)
                .map_err(|e| format!("Invalid destination {}: {}", dest.display(), e))?
        }
        None => source.clone(),
    };

    Ok(ResolvedPaths { source, dest })
}

/// Why a run stopped before or after the scan.
#[derive(Debug)]
pub enum RunError {
    /// The source folder or destination given on the command line is unusable.
    InvalidPath(String),
    /// An exclusion pattern or regex does not compile.
    InvalidFilter(ConfigError),
    /// The configuration file could not be loaded.
    Config(ConfigError),
    /// The JSON report could not be written.
    Report(ReportError),
}

impl RunError {
    /// The clap error kind for errors caused by bad command-line input.
    ///
    /// `None` for failures that are not usage errors.
    pub fn usage_kind(&self) -> Option<ErrorKind> {
        match self {
            RunError::InvalidPath(_) => Some(ErrorKind::ValueValidation),
            RunError::InvalidFilter(_) => Some(ErrorKind::InvalidValue),
            RunError::Config(_) | RunError::Report(_) => None,
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::InvalidPath(msg) => f.write_str(msg),
            RunError::InvalidFilter(e) => write!(f, "{}", e),
            RunError::Config(e) => write!(f, "Error loading configuration: {}", e),
            RunError::Report(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {}

/// Runs a full declutter pass for the parsed arguments.
///
/// Every per-file problem ends up in the printed report; only problems with
/// the run as a whole are returned.
///
/// # Errors
///
/// Returns [`RunError::InvalidPath`] or [`RunError::InvalidFilter`] for bad
/// command-line input (see [`RunError::usage_kind`]), and
/// [`RunError::Config`] or [`RunError::Report`] if the configuration cannot
/// be loaded or the JSON report cannot be written.
pub fn run(args: &Args) -> Result<Summary, RunError> {
    let paths =
        resolve_paths(&args.source, args.dest.as_deref()).map_err(RunError::InvalidPath)?;
    let preview = args.preview();

    let mut config = Config::load(args.config.as_deref()).map_err(RunError::Config)?;
    config.add_exclude_patterns(args.exclude.iter().cloned());
    let filters = config.compile_filters().map_err(RunError::InvalidFilter)?;
    let mapper = config.file_mapper();

    if preview {
        OutputFormatter::dry_run_notice(&format!(
            "Previewing {} (use --execute to move files)",
            paths.source.display()
        ));
    } else {
        OutputFormatter::info(&format!("Organizing {}", paths.source.display()));
    }

    let show_progress = !args.quiet && std::io::stderr().is_terminal();
    let files = scanner::collect_files(&paths.source);
    let pb = OutputFormatter::create_progress_bar(files.len() as u64, show_progress);
    let outcomes = scanner::organize_files(
        files,
        &paths.dest,
        preview,
        &filters,
        &mapper,
        |outcome| {
            pb.set_message(
                outcome
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            pb.inc(1);
        },
    );
    pb.finish_and_clear();

    OutputFormatter::report_table(&outcomes);
    let summary = Summary::from_outcomes(&outcomes);
    OutputFormatter::summary(&summary);

    if summary.errors > 0 {
        OutputFormatter::warning("Some files could not be organized. See the report above.");
    }

    if let Some(json_path) = &args.json {
        RunReport::new(&paths.source, &paths.dest, preview, &outcomes)
            .write(json_path)
            .map_err(RunError::Report)?;
        OutputFormatter::info(&format!("Report written to {}", json_path.display()));
    }

    Ok(summary)
}
