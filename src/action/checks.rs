//! Read-only precondition checks shared by the filesystem actions.
//!
//! Each check names the role of the path (`"source"`, `"target directory"`)
//! so failures read like `source must be a file: /tmp/x`.

use crate::error::{BatchError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

fn metadata(path: &Path, role: &str, wants_dir: bool) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound if wants_dir => {
            BatchError::missing_directory(path, format!("{role} does not exist"))
        }
        ErrorKind::NotFound => BatchError::precondition(path, format!("{role} does not exist")),
        _ => BatchError::precondition(path, format!("cannot inspect {role} ({e})")),
    })
}

pub(crate) fn require_file(path: &Path, role: &str) -> Result<()> {
    if !metadata(path, role, false)?.is_file() {
        return Err(BatchError::precondition(
            path,
            format!("{role} must be a file"),
        ));
    }
    Ok(())
}

pub(crate) fn require_dir(path: &Path, role: &str) -> Result<()> {
    if !metadata(path, role, true)?.is_dir() {
        return Err(BatchError::precondition(
            path,
            format!("{role} must be a directory"),
        ));
    }
    Ok(())
}

/// Directory exists, is a directory, and carries write permission.
///
/// Uses the permission bits (`readonly()`), not an access probe, so it never
/// creates anything to find out.
pub(crate) fn require_writable_dir(path: &Path, role: &str) -> Result<()> {
    let metadata = metadata(path, role, true)?;

    if !metadata.is_dir() {
        return Err(BatchError::precondition(
            path,
            format!("{role} must be a directory"),
        ));
    }

    if metadata.permissions().readonly() {
        return Err(BatchError::precondition(
            path,
            format!("{role} must be writable"),
        ));
    }

    Ok(())
}

/// Parent directory of `path`, with `.` for bare file names.
pub(crate) fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreconditionKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_reports_role() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = require_file(&missing, "source").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("source does not exist: {}", missing.display())
        );
    }

    #[test]
    fn test_missing_kind_follows_expected_type() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let kind_of = |result: Result<()>| match result.unwrap_err() {
            BatchError::PreconditionFailed { kind, .. } => kind,
            other => panic!("unexpected error: {other}"),
        };

        assert_eq!(
            kind_of(require_file(&missing, "source")),
            PreconditionKind::Unmet
        );
        assert_eq!(
            kind_of(require_dir(&missing, "target")),
            PreconditionKind::MissingDirectory
        );
        assert_eq!(
            kind_of(require_writable_dir(&missing, "parent directory")),
            PreconditionKind::MissingDirectory
        );
    }

    #[test]
    fn test_require_file_rejects_directory() {
        let temp = TempDir::new().unwrap();
        let err = require_file(temp.path(), "source").unwrap_err();
        assert!(err.to_string().starts_with("source must be a file"));
    }

    #[test]
    fn test_require_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        let err = require_dir(&file, "target directory").unwrap_err();
        assert!(matches!(
            err,
            BatchError::PreconditionFailed { ref path, .. } if path == &file
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_require_writable_dir_rejects_readonly() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = require_writable_dir(&locked, "target directory");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("target directory must be writable"));
    }

    #[test]
    fn test_parent_of_bare_name_is_current_dir() {
        assert_eq!(parent_of(Path::new("a.txt")), Path::new("."));
        assert_eq!(parent_of(Path::new("out/a.txt")), Path::new("out"));
    }
}
