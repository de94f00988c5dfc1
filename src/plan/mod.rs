//! Plan documents: batches of built-in actions stored as TOML.
//!
//! ```toml
//! [[action]]
//! kind = "mkdir"
//! path = "out"
//!
//! [[action]]
//! kind = "write"
//! path = "out/a.txt"
//! content = "hi"
//! ```
//!
//! Entries are committed in document order. See [`FsAction::kind`] for the
//! kind names.

mod parse;
mod render;

use crate::action::{DEFAULT_VCS_PROGRAM, FsAction};
use crate::batch::ActionBatch;
use crate::error::{BatchError, Result};

use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Ordered list of built-in actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<FsAction>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl Into<FsAction>) -> &mut Self {
        self.actions.push(action.into());
        self
    }

    pub fn actions(&self) -> &[FsAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Parses a plan document.
    ///
    /// VCS entries without a `program` key run `vcs_program`.
    pub fn parse(source: &str, vcs_program: &str) -> Result<Self> {
        let actions = parse::parse_document(source, vcs_program)?;
        log::debug!("Parsed plan with {} actions", actions.len());
        Ok(Self { actions })
    }

    /// Reads and parses a plan file.
    pub fn load(path: &Path, vcs_program: &str) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            BatchError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        Self::parse(&source, vcs_program)
    }

    /// Renders the plan back to a TOML document.
    pub fn to_toml(&self) -> String {
        render::render_document(&self.actions)
    }

    /// Builds a batch that commits the plan's actions in order.
    pub fn into_batch(self) -> ActionBatch {
        self.actions.into_iter().collect()
    }
}

impl FromStr for Plan {
    type Err = BatchError;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse(source, DEFAULT_VCS_PROGRAM)
    }
}

impl FromIterator<FsAction> for Plan {
    fn from_iter<I: IntoIterator<Item = FsAction>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
