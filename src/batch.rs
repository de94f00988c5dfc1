//! Ordered batch of actions with a validate-then-commit protocol.
//!
//! ## Execution Guarantees
//!
//! - **Ordering**: insertion order is validation order and commit order
//! - **Validation**: `validate()` checks every action before anything mutates;
//!   the first failure stops the pass
//! - **No atomicity**: `commit()` stops at the first failing action and does
//!   not undo the actions before it
//!
//! `validate()` is a gate against the *starting* state only. Filesystem and
//! VCS operations are not generally revocable, so put the risky or
//! recoverable steps (a soft commit, for instance) last.
//!
//! ## Example
//!
//! ```no_run
//! # use fs_batch::{ActionBatch, stdout_logger};
//! # use fs_batch::action::{CreateDirectory, WriteFile};
//! # fn example() -> fs_batch::Result<()> {
//! let mut batch = ActionBatch::new();
//! batch
//!     .add(CreateDirectory::new("/tmp/x")?)
//!     .add(WriteFile::new("/tmp/x/a.txt", "hi")?);
//!
//! batch.validate()?;
//! batch.commit(stdout_logger)?;
//! # Ok(())
//! # }
//! ```

use crate::action::Action;
use crate::error::{BatchError, PreconditionKind, Result};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Default log sink: one line per call on standard output.
pub fn stdout_logger(line: &str) {
    println!("{line}");
}

/// Ordered collection of actions.
///
/// Holds shared references; actions are never modified by the batch.
#[derive(Default, Clone)]
pub struct ActionBatch {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an owned action.
    pub fn add(&mut self, action: impl Action + 'static) -> &mut Self {
        self.actions.push(Arc::new(action));
        self
    }

    /// Appends an action the caller keeps a handle to.
    pub fn add_shared(&mut self, action: Arc<dyn Action>) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Action> {
        self.actions.iter().map(|a| a.as_ref())
    }

    /// Descriptions of every action, in commit order.
    pub fn preview(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.describe()).collect()
    }

    /// Validates every action in order.
    ///
    /// Read-only. Returns the first failing action's error unchanged; later
    /// actions are not checked.
    ///
    /// A directory created by an earlier action in the batch counts as
    /// present: a missing-directory failure about a path that will be
    /// created before this action commits is not an error. Checks that want
    /// a file are never excused.
    pub fn validate(&self) -> Result<()> {
        let mut pending: Vec<&Path> = Vec::new();

        for (idx, action) in self.actions.iter().enumerate() {
            log::debug!("Validating [{}/{}]: {:?}", idx + 1, self.len(), action);

            match action.validate() {
                Ok(()) => {}
                Err(BatchError::PreconditionFailed {
                    ref path,
                    kind: PreconditionKind::MissingDirectory,
                    ..
                }) if !path.exists() && pending.contains(&path.as_path()) =>
                {
                    log::debug!(
                        "{} is created earlier in the batch, accepting",
                        path.display()
                    );
                }
                Err(e) => {
                    log::debug!("Validation stopped at action {}: {}", idx + 1, e);
                    return Err(e);
                }
            }

            if let Some(dir) = action.creates_directory() {
                pending.push(dir);
            }
        }
        Ok(())
    }

    /// Commits every action in order.
    ///
    /// Calls `logger` with each action's description, then commits it. The
    /// first failure is returned as-is and the remaining actions never run.
    /// Nothing already committed is undone.
    pub fn commit<F>(&self, mut logger: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        for (idx, action) in self.actions.iter().enumerate() {
            logger(&action.describe());

            if let Err(e) = action.commit(&mut logger) {
                log::error!(
                    "Action {} of {} failed; {} not run",
                    idx + 1,
                    self.len(),
                    self.len() - idx - 1
                );
                return Err(e);
            }
        }

        log::info!("Committed {} actions", self.len());
        Ok(())
    }
}

impl fmt::Debug for ActionBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.iter()).finish()
    }
}

impl<A: Action + 'static> Extend<A> for ActionBatch {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        self.actions
            .extend(iter.into_iter().map(|a| Arc::new(a) as Arc<dyn Action>));
    }
}

impl<A: Action + 'static> FromIterator<A> for ActionBatch {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}
