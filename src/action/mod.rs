//! Actions: single validatable, describable, committable mutations.
//!
//! Every action follows the same three-step contract:
//!
//! 1. **Validate**: read-only precondition checks against the live filesystem
//! 2. **Describe**: a one-line preview such as `~ mkdir out`
//! 3. **Commit**: perform the mutation
//!
//! Actions hold only their parameters. Nothing is opened or cached between
//! construction and commit, so every check sees the filesystem as it is at
//! the moment it runs.
//!
//! ## Example
//!
//! ```no_run
//! # use fs_batch::action::{Action, CreateDirectory, WriteFile};
//! # fn example() -> fs_batch::Result<()> {
//! let mkdir = CreateDirectory::new("out")?;
//! let write = WriteFile::new("out/a.txt", "hi")?;
//!
//! mkdir.validate()?;
//! mkdir.commit(&mut |line| println!("{line}"))?;
//! write.validate()?;
//! write.commit(&mut |line| println!("{line}"))?;
//! # Ok(())
//! # }
//! ```

mod checks;
mod dir;
mod file;
mod message;
mod vcs;

pub use dir::{CreateDirectory, EnsureDirectory, RemoveDirectory};
pub use file::{CopyFile, MoveFile, RemoveFile, WriteFile};
pub use message::LogMessage;
pub use vcs::{Commit, DEFAULT_VCS_PROGRAM, StageAdd, StageRemove};

use crate::error::{BatchError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// A unit of work that can take part in an [`ActionBatch`](crate::ActionBatch).
pub trait Action: fmt::Debug {
    /// Checks preconditions without touching anything.
    ///
    /// Returns `PreconditionFailed` naming the offending path.
    fn validate(&self) -> Result<()>;

    /// One-line preview of what `commit()` will do.
    fn describe(&self) -> String;

    /// Performs the mutation.
    ///
    /// `log` is the batch's log sink. Only actions whose effect *is* logging
    /// write to it; the batch itself logs each description.
    fn commit(&self, log: &mut dyn FnMut(&str)) -> Result<()>;

    /// Directory this action brings into existence, if any.
    ///
    /// A batch treats it as present when validating the actions after this
    /// one.
    fn creates_directory(&self) -> Option<&Path> {
        None
    }
}

/// The closed set of built-in actions.
///
/// Plans are made of these; custom [`Action`] implementors can still be
/// added to a batch directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsAction {
    MoveFile(MoveFile),
    CopyFile(CopyFile),
    WriteFile(WriteFile),
    CreateDirectory(CreateDirectory),
    EnsureDirectory(EnsureDirectory),
    RemoveFile(RemoveFile),
    RemoveDirectory(RemoveDirectory),
    LogMessage(LogMessage),
    StageAdd(StageAdd),
    StageRemove(StageRemove),
    Commit(Commit),
}

impl FsAction {
    /// Plan document name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            FsAction::MoveFile(_) => "move",
            FsAction::CopyFile(_) => "copy",
            FsAction::WriteFile(_) => "write",
            FsAction::CreateDirectory(_) => "mkdir",
            FsAction::EnsureDirectory(_) => "ensure-dir",
            FsAction::RemoveFile(_) => "rm",
            FsAction::RemoveDirectory(_) => "rm-dir",
            FsAction::LogMessage(_) => "log",
            FsAction::StageAdd(_) => "git-add",
            FsAction::StageRemove(_) => "git-rm",
            FsAction::Commit(_) => "git-commit",
        }
    }

    /// Returns true for the version-control family.
    pub fn is_vcs(&self) -> bool {
        matches!(
            self,
            FsAction::StageAdd(_) | FsAction::StageRemove(_) | FsAction::Commit(_)
        )
    }

    fn inner(&self) -> &dyn Action {
        match self {
            FsAction::MoveFile(a) => a,
            FsAction::CopyFile(a) => a,
            FsAction::WriteFile(a) => a,
            FsAction::CreateDirectory(a) => a,
            FsAction::EnsureDirectory(a) => a,
            FsAction::RemoveFile(a) => a,
            FsAction::RemoveDirectory(a) => a,
            FsAction::LogMessage(a) => a,
            FsAction::StageAdd(a) => a,
            FsAction::StageRemove(a) => a,
            FsAction::Commit(a) => a,
        }
    }
}

impl Action for FsAction {
    fn validate(&self) -> Result<()> {
        self.inner().validate()
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }

    fn commit(&self, log: &mut dyn FnMut(&str)) -> Result<()> {
        self.inner().commit(log)
    }

    fn creates_directory(&self) -> Option<&Path> {
        self.inner().creates_directory()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for FsAction {
                fn from(action: $variant) -> Self {
                    FsAction::$variant(action)
                }
            }
        )*
    };
}

impl_from_variant!(
    MoveFile,
    CopyFile,
    WriteFile,
    CreateDirectory,
    EnsureDirectory,
    RemoveFile,
    RemoveDirectory,
    LogMessage,
    StageAdd,
    StageRemove,
    Commit,
);

/// Rejects an empty path parameter.
pub(crate) fn required_path(
    action: &'static str,
    parameter: &'static str,
    value: impl Into<PathBuf>,
) -> Result<PathBuf> {
    let value = value.into();
    if value.as_os_str().is_empty() {
        return Err(BatchError::InvalidArgument { action, parameter });
    }
    Ok(value)
}

/// Rejects an empty string parameter.
pub(crate) fn required_text(
    action: &'static str,
    parameter: &'static str,
    value: impl Into<String>,
) -> Result<String> {
    let value = value.into();
    if value.is_empty() {
        return Err(BatchError::InvalidArgument { action, parameter });
    }
    Ok(value)
}
