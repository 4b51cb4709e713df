//! Recursive directory scan feeding every file through the organizer.
//!
//! The walk is collected in full before anything moves, so files relocated
//! into category folders under the scanned root are never visited twice.

use crate::config::CompiledFilters;
use crate::file_category::FileMapper;
use crate::file_organizer::{FileOrganizer, MoveOutcome};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every non-directory entry below `root`.
///
/// Directories are descended into but not returned. Entries that cannot be
/// read are logged and left out.
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        // Follows symlinks, so a link to a directory is not treated as a file
        .filter(|entry| !entry.path().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Scans `root` and organizes every file into `out_root/<category>`.
///
/// See [`scan_with_progress`].
pub fn scan(
    root: &Path,
    out_root: &Path,
    preview: bool,
    filters: &CompiledFilters,
    mapper: &FileMapper,
) -> Vec<MoveOutcome> {
    scan_with_progress(root, out_root, preview, filters, mapper, |_| {})
}

/// Scans `root` and organizes every file into `out_root/<category>`,
/// calling `on_outcome` after each file is processed.
///
/// Each file yields exactly one outcome. Excluded files are reported as
/// skipped without being classified; everything else is handed to
/// [`FileOrganizer::move_file_safe`]. Failures never abort the scan.
///
/// # Examples
///
/// ```no_run
/// use declutter::config::CompiledFilters;
/// use declutter::file_category::FileMapper;
/// use declutter::scanner::scan;
/// use std::path::Path;
///
/// let filters = CompiledFilters::from_patterns(&["*.key"]).unwrap();
/// let root = Path::new("/home/user/Downloads");
/// let outcomes = scan(root, root, true, &filters, &FileMapper::default());
/// println!("{} files", outcomes.len());
/// ```
pub fn scan_with_progress<F>(
    root: &Path,
    out_root: &Path,
    preview: bool,
    filters: &CompiledFilters,
    mapper: &FileMapper,
    on_outcome: F,
) -> Vec<MoveOutcome>
where
    F: FnMut(&MoveOutcome),
{
    organize_files(collect_files(root), out_root, preview, filters, mapper, on_outcome)
}

/// Organizes an already collected list of files.
pub fn organize_files<F>(
    files: Vec<PathBuf>,
    out_root: &Path,
    preview: bool,
    filters: &CompiledFilters,
    mapper: &FileMapper,
    mut on_outcome: F,
) -> Vec<MoveOutcome>
where
    F: FnMut(&MoveOutcome),
{
    tracing::info!(
        out_root = %out_root.display(),
        files = files.len(),
        preview,
        "scan started"
    );

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let outcome = if filters.is_excluded(&path) {
            tracing::debug!(path = %path.display(), "excluded");
            MoveOutcome::excluded(&path)
        } else {
            let category = mapper.categorize(&path);
            let dest_dir = out_root.join(category.dir_name());
            FileOrganizer::move_file_safe(&path, &dest_dir, preview)
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    tracing::info!(files = outcomes.len(), "scan finished");
    outcomes
}
