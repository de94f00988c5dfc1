//! Directory actions: create, ensure and recursive remove.

use super::checks::{parent_of, require_dir, require_writable_dir};
use super::{Action, required_path};
use crate::error::{BatchError, Result};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates a directory. Fails at commit if it already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDirectory {
    path: PathBuf,
}

impl CreateDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: required_path("CreateDirectory", "path", path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Action for CreateDirectory {
    fn validate(&self) -> Result<()> {
        require_writable_dir(parent_of(&self.path), "parent directory")
    }

    fn describe(&self) -> String {
        format!("~ mkdir {}", self.path.display())
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        create(&self.path)
    }

    fn creates_directory(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Creates a directory unless one is already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureDirectory {
    path: PathBuf,
}

impl EnsureDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: required_path("EnsureDirectory", "path", path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Action for EnsureDirectory {
    fn validate(&self) -> Result<()> {
        require_writable_dir(parent_of(&self.path), "parent directory")
    }

    fn describe(&self) -> String {
        format!("~ mkdir -p {}", self.path.display())
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        if self.path.is_dir() {
            log::debug!("Directory exists, skipping: {}", self.path.display());
            return Ok(());
        }
        create(&self.path)
    }

    fn creates_directory(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Deletes a directory and everything below it.
///
/// Entries are classified by their own file type, so a symlink is unlinked
/// rather than followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveDirectory {
    path: PathBuf,
}

impl RemoveDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: required_path("RemoveDirectory", "path", path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Action for RemoveDirectory {
    fn validate(&self) -> Result<()> {
        require_dir(&self.path, "target")
    }

    fn describe(&self) -> String {
        format!("~ rm -r {}", self.path.display())
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        remove_tree(&self.path)
            .map_err(|e| BatchError::operation(format!("remove {}", self.path.display()), e))?;
        log::info!("Removed directory: {}", self.path.display());
        Ok(())
    }
}

fn create(path: &Path) -> Result<()> {
    fs::create_dir(path)
        .map_err(|e| BatchError::operation(format!("create {}", path.display()), e))?;
    log::debug!("Created directory: {}", path.display());
    Ok(())
}

/// Depth-first delete: children first, then the directory itself.
fn remove_tree(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            remove_tree(&path)?;
        } else {
            fs::remove_file(&path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
        }
    }

    fs::remove_dir(dir).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", dir.display(), e)))
}
