//! Version-control actions.
//!
//! Each action runs an external VCS program (`git` unless overridden) with
//! the working root as the child's current directory. The parent process
//! never changes its own directory, so there is nothing to restore when the
//! program fails to spawn or exits non-zero.
//!
//! Arguments are passed as an argv vector. No shell is involved, so commit
//! messages are never re-parsed.

use super::checks::require_dir;
use super::{Action, required_path, required_text};
use crate::error::{BatchError, Result};

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Program used when an action does not name one.
pub const DEFAULT_VCS_PROGRAM: &str = "git";

/// Where and with what program a VCS action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkingTree {
    root: PathBuf,
    program: String,
}

impl WorkingTree {
    fn new(action: &'static str, root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            root: required_path(action, "root", root)?,
            program: DEFAULT_VCS_PROGRAM.to_string(),
        })
    }

    fn validate(&self) -> Result<()> {
        require_dir(&self.root, "working root")
    }

    fn command_line(&self, args: &[OsString]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Runs `program args...` inside the working root.
    fn run(&self, args: &[OsString]) -> io::Result<()> {
        let command_line = self.command_line(args);
        log::debug!("Running `{}` in {}", command_line, self.root.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| io::Error::new(e.kind(), format!("`{}`: {}", command_line, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(io::Error::other(format!(
                "`{}` exited with {}: {}",
                command_line, output.status, detail
            )));
        }

        Ok(())
    }
}

fn required_paths<I, P>(action: &'static str, paths: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let paths = paths
        .into_iter()
        .map(|p| required_path(action, "paths", p))
        .collect::<Result<Vec<_>>>()?;

    if paths.is_empty() {
        return Err(BatchError::InvalidArgument {
            action,
            parameter: "paths",
        });
    }
    Ok(paths)
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Warns about staged paths that are not on disk. Not an error: `rm` of an
/// already-deleted file is a normal thing to stage.
fn note_missing_paths(tree: &WorkingTree, paths: &[PathBuf]) {
    for path in paths {
        if !tree.root.join(path).exists() {
            log::debug!(
                "{} not found under {}",
                path.display(),
                tree.root.display()
            );
        }
    }
}

/// `git add <paths>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAdd {
    tree: WorkingTree,
    paths: Vec<PathBuf>,
}

impl StageAdd {
    pub fn new<I, P>(root: impl Into<PathBuf>, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Ok(Self {
            tree: WorkingTree::new("StageAdd", root)?,
            paths: required_paths("StageAdd", paths)?,
        })
    }

    /// Runs `program` instead of `git`.
    pub fn with_program(mut self, program: impl Into<String>) -> Result<Self> {
        self.tree.program = required_text("StageAdd", "program", program)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.tree.root
    }

    pub fn program(&self) -> &str {
        &self.tree.program
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("add")];
        args.extend(self.paths.iter().map(|p| p.as_os_str().to_owned()));
        args
    }
}

impl Action for StageAdd {
    fn validate(&self) -> Result<()> {
        self.tree.validate()?;
        note_missing_paths(&self.tree, &self.paths);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("~ {} add {}", self.tree.program, join_paths(&self.paths))
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        self.tree
            .run(&self.args())
            .map_err(|e| BatchError::operation("stage paths", e))
    }
}

/// `git rm [-r] <paths>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRemove {
    tree: WorkingTree,
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl StageRemove {
    pub fn new<I, P>(root: impl Into<PathBuf>, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Ok(Self {
            tree: WorkingTree::new("StageRemove", root)?,
            paths: required_paths("StageRemove", paths)?,
            recursive: false,
        })
    }

    /// Passes `-r` so directories can be removed.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Result<Self> {
        self.tree.program = required_text("StageRemove", "program", program)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.tree.root
    }

    pub fn program(&self) -> &str {
        &self.tree.program
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("rm")];
        if self.recursive {
            args.push(OsString::from("-r"));
        }
        args.extend(self.paths.iter().map(|p| p.as_os_str().to_owned()));
        args
    }
}

impl Action for StageRemove {
    fn validate(&self) -> Result<()> {
        self.tree.validate()?;
        note_missing_paths(&self.tree, &self.paths);
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "~ {} rm {}{}",
            self.tree.program,
            if self.recursive { "-r " } else { "" },
            join_paths(&self.paths)
        )
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        self.tree
            .run(&self.args())
            .map_err(|e| BatchError::operation("unstage paths", e))
    }
}

/// `git commit -m <message>`
///
/// A *soft* commit swallows its own failure (logged as a warning) so the
/// batch carries on. Useful as the last step when "nothing to commit" is an
/// acceptable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree: WorkingTree,
    message: String,
    soft: bool,
}

impl Commit {
    pub fn new(root: impl Into<PathBuf>, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            tree: WorkingTree::new("Commit", root)?,
            message: required_text("Commit", "message", message)?,
            soft: false,
        })
    }

    pub fn soft(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Result<Self> {
        self.tree.program = required_text("Commit", "program", program)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.tree.root
    }

    pub fn program(&self) -> &str {
        &self.tree.program
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_soft(&self) -> bool {
        self.soft
    }
}

impl Action for Commit {
    fn validate(&self) -> Result<()> {
        self.tree.validate()
    }

    fn describe(&self) -> String {
        format!("~ {} commit -m \"{}\"", self.tree.program, self.message)
    }

    fn commit(&self, _log: &mut dyn FnMut(&str)) -> Result<()> {
        let args = [
            OsString::from("commit"),
            OsString::from("-m"),
            OsString::from(&self.message),
        ];

        match self.tree.run(&args) {
            Ok(()) => {
                log::info!("Committed in {}", self.tree.root.display());
                Ok(())
            }
            Err(e) if self.soft => {
                log::warn!("Soft commit failed, continuing: {}", e);
                Ok(())
            }
            Err(e) => Err(BatchError::operation("commit", e)),
        }
    }
}
