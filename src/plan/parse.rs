use crate::action::{
    Commit, CopyFile, CreateDirectory, EnsureDirectory, FsAction, LogMessage, MoveFile,
    RemoveDirectory, RemoveFile, StageAdd, StageRemove, WriteFile,
};
use crate::error::{BatchError, Result};

use toml_edit::{DocumentMut, Item, Table};

pub(super) fn parse_document(source: &str, vcs_program: &str) -> Result<Vec<FsAction>> {
    let doc = source.parse::<DocumentMut>()?;

    let Some(item) = doc.get("action") else {
        return Ok(Vec::new());
    };

    let tables = item.as_array_of_tables().ok_or_else(|| {
        BatchError::Other(anyhow::anyhow!(
            "`action` must be an array of tables ([[action]])"
        ))
    })?;

    tables
        .iter()
        .enumerate()
        .map(|(idx, table)| {
            Entry {
                number: idx + 1,
                table,
            }
            .into_action(vcs_program)
        })
        .collect()
}

/// One `[[action]]` table. `number` is 1-based, for messages.
struct Entry<'a> {
    number: usize,
    table: &'a Table,
}

impl Entry<'_> {
    /// String value of `key`, or `""` when absent or not a string so the
    /// action constructor reports the parameter as missing.
    fn text(&self, key: &str) -> &str {
        self.table.get(key).and_then(Item::as_str).unwrap_or("")
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.table.get(key) {
            None => Ok(false),
            Some(item) => item.as_bool().ok_or_else(|| {
                BatchError::Other(anyhow::anyhow!(
                    "action #{}: `{}` must be true or false",
                    self.number,
                    key
                ))
            }),
        }
    }

    /// String array under `key`; a single string counts as a one-item list.
    fn list(&self, key: &str) -> Vec<String> {
        match self.table.get(key) {
            Some(item) => match item.as_array() {
                Some(array) => array
                    .iter()
                    .map(|v| v.as_str().unwrap_or("").to_string())
                    .collect(),
                None => item.as_str().map(|s| vec![s.to_string()]).unwrap_or_default(),
            },
            None => Vec::new(),
        }
    }

    fn program<'p>(&'p self, vcs_program: &'p str) -> &'p str {
        self.table
            .get("program")
            .and_then(Item::as_str)
            .unwrap_or(vcs_program)
    }

    fn into_action(self, vcs_program: &str) -> Result<FsAction> {
        let kind = self.table.get("kind").and_then(Item::as_str).ok_or_else(|| {
            BatchError::InvalidAction(format!("action #{} has no `kind`", self.number))
        })?;

        let action: FsAction = match kind {
            "move" => MoveFile::new(self.text("source"), self.text("target"))?.into(),
            "copy" => CopyFile::new(self.text("source"), self.text("target"))?.into(),
            "write" => WriteFile::new(self.text("path"), self.text("content"))?.into(),
            "mkdir" => CreateDirectory::new(self.text("path"))?.into(),
            "ensure-dir" => EnsureDirectory::new(self.text("path"))?.into(),
            "rm" => RemoveFile::new(self.text("path"))?.into(),
            "rm-dir" => RemoveDirectory::new(self.text("path"))?.into(),
            "log" => LogMessage::new(self.text("message"))?.into(),
            "git-add" => StageAdd::new(self.text("root"), self.list("paths"))?
                .with_program(self.program(vcs_program))?
                .into(),
            "git-rm" => StageRemove::new(self.text("root"), self.list("paths"))?
                .recursive(self.flag("recursive")?)
                .with_program(self.program(vcs_program))?
                .into(),
            "git-commit" => Commit::new(self.text("root"), self.text("message"))?
                .soft(self.flag("soft")?)
                .with_program(self.program(vcs_program))?
                .into(),
            other => {
                return Err(BatchError::InvalidAction(format!(
                    "action #{} has unknown kind `{}`",
                    self.number, other
                )));
            }
        };

        Ok(action)
    }
}
