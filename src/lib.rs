//! declutter - sort a directory tree into category folders
//!
//! This library classifies files by extension, moves them into category
//! subfolders without ever overwriting, and reports one outcome per file.
//! Moves are only planned unless explicitly executed.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod permissions;
pub mod report;
pub mod scanner;

pub use config::{CompiledFilters, Config, ConfigError};
pub use file_category::{Category, FileMapper, categorize};
pub use file_organizer::{Action, FileOrganizer, MoveOutcome, Reason};
pub use permissions::can_access;
pub use report::{RunReport, Summary};
pub use scanner::{scan, scan_with_progress};

pub use cli::{Args, RunError, run};
