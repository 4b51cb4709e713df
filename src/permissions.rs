/// Read/write access probing for source files and destination directories.
///
/// Probing never fails loudly: a path that is missing or cannot be inspected
/// counts as inaccessible.
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Checks whether `path` is readable and, if `require_write` is set, writable.
///
/// Any OS error raised while probing is treated as "no access".
///
/// # Examples
///
/// ```
/// use declutter::permissions::can_access;
/// use std::path::Path;
///
/// assert!(!can_access(Path::new("/definitely/not/here"), false));
/// ```
pub fn can_access(path: &Path, require_write: bool) -> bool {
    match check_access(path, require_write) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "access check failed");
            false
        }
    }
}

/// Probes access to `path`, returning the first error encountered.
///
/// Read access is tested by opening the file, or listing the directory.
/// Write access asks the OS whether the calling user may write, so the
/// owner, group and other classes are applied the way the kernel applies
/// them. A path with no write bit set at all is refused even when the OS
/// would let a privileged caller through.
pub fn check_access(path: &Path, require_write: bool) -> io::Result<()> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        fs::read_dir(path)?;
    } else {
        File::open(path)?;
    }

    if require_write {
        check_write(path)?;
        if metadata.permissions().readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
    }

    Ok(())
}

#[cfg(unix)]
fn check_write(path: &Path) -> io::Result<()> {
    use rustix::fs::{Access, access};

    access(path, Access::WRITE_OK).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn check_write(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_readable_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("a.txt");
        fs::write(&file_path, "hello").expect("Failed to write test file");

        assert!(can_access(&file_path, false));
        assert!(can_access(&file_path, true));
    }

    #[test]
    fn test_writable_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(can_access(temp_dir.path(), false));
        assert!(can_access(temp_dir.path(), true));
    }

    #[test]
    fn test_missing_path_is_not_accessible() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("nope").join("deeper");

        assert!(!can_access(&missing, false));
        assert!(!can_access(&missing, true));
        assert!(check_access(&missing, false).is_err());
    }

    #[test]
    fn test_readonly_file_fails_write_check() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("locked.txt");
        fs::write(&file_path, "hello").expect("Failed to write test file");

        let mut perms = fs::metadata(&file_path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file_path, perms).unwrap();

        assert!(can_access(&file_path, false));
        assert!(!can_access(&file_path, true));
        let err = check_access(&file_path, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        let mut perms = fs::metadata(&file_path).unwrap().permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        fs::set_permissions(&file_path, perms).unwrap();
    }

    #[cfg(unix)]
    fn is_privileged() -> bool {
        rustix::process::geteuid().is_root()
    }

    #[cfg(unix)]
    #[test]
    fn test_readonly_directory_fails_write_check() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        assert!(can_access(&locked, false));
        assert!(!can_access(&locked, true));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_without_write_bit_fails_write_check() {
        use std::os::unix::fs::PermissionsExt;

        if is_privileged() {
            return;
        }

        // Group and other may write, the owner (us) may not
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o575)).unwrap();

        assert!(can_access(&locked, false));
        assert!(!can_access(&locked, true));
        let err = check_access(&locked, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_fails_read_check() {
        use std::os::unix::fs::PermissionsExt;

        if is_privileged() {
            return;
        }

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("secret.txt");
        fs::write(&file_path, "hidden").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o000)).unwrap();

        assert!(!can_access(&file_path, false));
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644)).unwrap();
    }
}
