/// Safe relocation of single files into category directories.
///
/// This module computes collision-free destination names and moves files,
/// classifying every possible failure into a [`MoveOutcome`] instead of
/// returning an error. Nothing here panics or propagates I/O errors.
use crate::permissions::can_access;
use serde::{Serialize, Serializer};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Terminal classification of one file in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Moved,
    Skipped,
    Error,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Moved => "moved",
            Action::Skipped => "skipped",
            Action::Error => "error",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an outcome is what it is.
///
/// The `Display` form is the stable, user-visible reason string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Preview only, nothing was touched.
    DryRun,
    /// Matched an exclusion rule.
    Excluded,
    /// The source is not a regular file.
    NotAFile,
    /// The source cannot be read.
    NoReadPermission,
    /// The destination directory is not writable.
    NoWritePermissionDest,
    /// The destination directory could not be created.
    DestMkdirFailed(String),
    /// The move itself was refused by the OS.
    PermissionDenied(String),
    /// Any other OS error during the move.
    OsError(String),
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::DryRun => f.write_str("dry-run"),
            Reason::Excluded => f.write_str("excluded"),
            Reason::NotAFile => f.write_str("not-a-file"),
            Reason::NoReadPermission => f.write_str("no-read-permission"),
            Reason::NoWritePermissionDest => f.write_str("no-write-permission-dest"),
            Reason::DestMkdirFailed(detail) => write!(f, "dest-mkdir-failed: {}", detail),
            Reason::PermissionDenied(detail) => write!(f, "permission-denied: {}", detail),
            Reason::OsError(detail) => write!(f, "oserror: {}", detail),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The outcome record for a single file.
///
/// Exactly one is produced per file visited by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// The source file that was processed.
    pub path: PathBuf,
    /// What happened to it.
    pub action: Action,
    /// Explanation, absent only for a plain successful move.
    pub reason: Option<Reason>,
    /// The computed destination, when one was computed.
    pub dest: Option<PathBuf>,
}

impl MoveOutcome {
    fn new(path: &Path, action: Action, reason: Option<Reason>, dest: Option<PathBuf>) -> Self {
        Self {
            path: path.to_path_buf(),
            action,
            reason,
            dest,
        }
    }

    /// A file rejected by the exclusion rules.
    pub fn excluded(path: &Path) -> Self {
        Self::new(path, Action::Skipped, Some(Reason::Excluded), None)
    }

    /// True for a move that was only planned.
    pub fn is_planned(&self) -> bool {
        self.action == Action::Moved && self.reason == Some(Reason::DryRun)
    }

    /// True for a move that actually happened.
    pub fn is_moved(&self) -> bool {
        self.action == Action::Moved && self.reason != Some(Reason::DryRun)
    }
}

/// Moves files into category directories without ever overwriting.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Returns a path in `dest_dir` for `file_name` that does not exist yet.
    ///
    /// If `dest_dir/file_name` is free it is returned as is. Otherwise
    /// `"{stem} ({i}){.ext}"` is probed for i = 2, 3, ... and the first free
    /// name wins. Nothing is created; a concurrent writer may still take the
    /// name before it is used.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use declutter::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// // With "a.txt" already present this yields ".../Documents/a (2).txt"
    /// let dest = FileOrganizer::unique_destination(Path::new("/tmp/Documents"), "a.txt");
    /// println!("{}", dest.display());
    /// ```
    pub fn unique_destination(dest_dir: &Path, file_name: impl AsRef<OsStr>) -> PathBuf {
        let file_name = file_name.as_ref();
        let candidate = dest_dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        // Built on OsString so names that are not valid UTF-8 survive intact
        let name = Path::new(file_name);
        let stem = name.file_stem().unwrap_or(file_name);
        let extension = name.extension();
        let numbered = |i: u64| {
            let mut numbered = OsString::from(stem);
            numbered.push(format!(" ({})", i));
            if let Some(extension) = extension {
                numbered.push(".");
                numbered.push(extension);
            }
            numbered
        };

        (2u64..)
            .map(|i| dest_dir.join(numbered(i)))
            .find(|candidate| !candidate.exists())
            .unwrap_or(candidate)
    }

    /// Moves `source` into `dest_dir`, or plans the move when `preview` is set.
    ///
    /// Checks run in a fixed order and the first failing one decides the
    /// outcome:
    ///
    /// 1. `source` must be a regular file (`not-a-file`)
    /// 2. `source` must be readable (`no-read-permission`)
    /// 3. in preview mode, the planned destination is reported (`dry-run`)
    /// 4. `dest_dir` is created if missing (`dest-mkdir-failed: ...`)
    /// 5. `dest_dir` must be writable (`no-write-permission-dest`)
    /// 6. the move itself (`permission-denied: ...` or `oserror: ...`)
    ///
    /// A source that already sits in `dest_dir` is not special: it is moved
    /// next to itself under a numbered name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use declutter::file_organizer::{Action, FileOrganizer};
    /// use std::path::Path;
    ///
    /// let outcome = FileOrganizer::move_file_safe(
    ///     Path::new("/home/user/Downloads/photo.jpg"),
    ///     Path::new("/home/user/Downloads/Images"),
    ///     true,
    /// );
    /// assert_eq!(outcome.action, Action::Moved);
    /// ```
    pub fn move_file_safe(source: &Path, dest_dir: &Path, preview: bool) -> MoveOutcome {
        if !source.is_file() {
            return MoveOutcome::new(source, Action::Skipped, Some(Reason::NotAFile), None);
        }

        if !can_access(source, false) {
            return MoveOutcome::new(
                source,
                Action::Skipped,
                Some(Reason::NoReadPermission),
                None,
            );
        }

        // is_file() guarantees a final component
        let file_name = source.file_name().unwrap_or_default();
        let dest = Self::unique_destination(dest_dir, file_name);

        if preview {
            tracing::debug!(src = %source.display(), dest = %dest.display(), "planned move");
            return MoveOutcome::new(source, Action::Moved, Some(Reason::DryRun), Some(dest));
        }

        if !dest_dir.exists()
            && let Err(e) = fs::create_dir_all(dest_dir)
        {
            tracing::warn!(dir = %dest_dir.display(), error = %e, "could not create destination");
            return MoveOutcome::new(
                source,
                Action::Error,
                Some(Reason::DestMkdirFailed(e.to_string())),
                None,
            );
        }

        if !can_access(dest_dir, true) {
            return MoveOutcome::new(
                source,
                Action::Skipped,
                Some(Reason::NoWritePermissionDest),
                Some(dest),
            );
        }

        match move_file(source, &dest) {
            Ok(()) => {
                tracing::debug!(src = %source.display(), dest = %dest.display(), "moved");
                MoveOutcome::new(source, Action::Moved, None, Some(dest))
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => MoveOutcome::new(
                source,
                Action::Skipped,
                Some(Reason::PermissionDenied(e.to_string())),
                Some(dest),
            ),
            Err(e) => MoveOutcome::new(
                source,
                Action::Error,
                Some(Reason::OsError(e.to_string())),
                Some(dest),
            ),
        }
    }
}

/// Renames `src` to `dest`, copying and removing when they sit on different
/// filesystems.
fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::warn!(error = %e, "rename across devices, falling back to copy+remove");
            fs::copy(src, dest)?;
            if let Err(e) = fs::remove_file(src) {
                // Leave exactly one copy behind
                let _ = fs::remove_file(dest);
                return Err(e);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
