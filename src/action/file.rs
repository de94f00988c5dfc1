//! File-level actions: move, copy, write and remove.

use super::checks::{parent_of, require_file, require_writable_dir};
use super::{Action, required_path, required_text};
use crate::error::{BatchError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// Moves a regular file into a directory, keeping its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFile {
    source: PathBuf,
    target_dir: PathBuf,
}

impl MoveFile {
    pub fn new(source: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            source: required_path("MoveFile", "source", source)?,
            target_dir: required_path("MoveFile", "target", target_dir)?,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Final location of the file after commit.
    pub fn destination(&self) -> PathBuf {
        destination(&self.source, &self.target_dir)
    }
}

impl Action for MoveFile {
    fn validate(&self) -> Result<()> {
        validate_transfer(&self.source, &self.target_dir)
    }

    fn describe(&self) -> String {
        format!(
            "~ mv {} {}",
            self.source.display(),
            self.target_dir.display()
        )
    }

    /// Renames in place when source and target share a filesystem; otherwise
    /// copies then unlinks the source.
    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        let to = self.destination();
        let failed = |e| BatchError::operation(format!("move {}", self.source.display()), e);

        if is_same_filesystem(&self.source, &self.target_dir).map_err(failed)? {
            fs::rename(&self.source, &to).map_err(failed)?;
        } else {
            log::debug!(
                "{} and {} are on different filesystems, copying",
                self.source.display(),
                self.target_dir.display()
            );
            fs::copy(&self.source, &to).map_err(failed)?;
            fs::remove_file(&self.source).map_err(failed)?;
        }

        log::info!("Moved: {} → {}", self.source.display(), to.display());
        Ok(())
    }
}

/// Copies a regular file into a directory, keeping the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFile {
    source: PathBuf,
    target_dir: PathBuf,
}

impl CopyFile {
    pub fn new(source: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            source: required_path("CopyFile", "source", source)?,
            target_dir: required_path("CopyFile", "target", target_dir)?,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn destination(&self) -> PathBuf {
        destination(&self.source, &self.target_dir)
    }
}

impl Action for CopyFile {
    fn validate(&self) -> Result<()> {
        validate_transfer(&self.source, &self.target_dir)
    }

    fn describe(&self) -> String {
        format!(
            "~ cp {} {}",
            self.source.display(),
            self.target_dir.display()
        )
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        let to = self.destination();
        let bytes = fs::copy(&self.source, &to)
            .map_err(|e| BatchError::operation(format!("copy {}", self.source.display()), e))?;

        log::info!(
            "Copied: {} → {} ({} bytes)",
            self.source.display(),
            to.display(),
            bytes
        );
        Ok(())
    }
}

/// Creates or truncates a file with the given content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFile {
    path: PathBuf,
    content: String,
}

impl WriteFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        Ok(Self {
            path: required_path("WriteFile", "path", path)?,
            content: required_text("WriteFile", "content", content)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Action for WriteFile {
    fn validate(&self) -> Result<()> {
        require_writable_dir(parent_of(&self.path), "parent directory")
    }

    fn describe(&self) -> String {
        format!("~ Writing {}", self.path.display())
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        fs::write(&self.path, &self.content)
            .map_err(|e| BatchError::operation(format!("write {}", self.path.display()), e))?;
        log::debug!("Wrote: {}", self.path.display());
        Ok(())
    }
}

/// Unlinks a regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFile {
    path: PathBuf,
}

impl RemoveFile {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: required_path("RemoveFile", "path", path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Action for RemoveFile {
    fn validate(&self) -> Result<()> {
        require_file(&self.path, "target")
    }

    fn describe(&self) -> String {
        format!("~ rm {}", self.path.display())
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        fs::remove_file(&self.path)
            .map_err(|e| BatchError::operation(format!("remove {}", self.path.display()), e))?;
        log::debug!("Removed: {}", self.path.display());
        Ok(())
    }
}

fn validate_transfer(source: &Path, target_dir: &Path) -> Result<()> {
    require_file(source, "source")?;
    require_writable_dir(target_dir, "target directory")
}

fn destination(source: &Path, target_dir: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => target_dir.join(name),
        None => target_dir.to_path_buf(),
    }
}

/// Checks if paths are on same filesystem.
///
/// Determines if an atomic `rename()` is possible, or if a cross-filesystem
/// copy+delete is required.
fn is_same_filesystem(source: &Path, target_dir: &Path) -> std::io::Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let source_meta = fs::metadata(source)?;
        let target_meta = fs::metadata(target_dir)?;
        Ok(source_meta.dev() == target_meta.dev())
    }

    #[cfg(not(unix))]
    {
        let source_str = source.to_string_lossy();
        let target_str = target_dir.to_string_lossy();

        if source_str.len() >= 2 && target_str.len() >= 2 {
            Ok(source_str.chars().next() == target_str.chars().next())
        } else {
            Ok(true)
        }
    }
}
