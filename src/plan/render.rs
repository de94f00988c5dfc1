use crate::action::FsAction;

use std::path::{Path, PathBuf};
use toml_edit::{Array, ArrayOfTables, DocumentMut, Item, Table, value};

pub(super) fn render_document(actions: &[FsAction]) -> String {
    let mut tables = ArrayOfTables::new();
    for action in actions {
        tables.push(render_action(action));
    }

    let mut doc = DocumentMut::new();
    if !tables.is_empty() {
        doc.insert("action", Item::ArrayOfTables(tables));
    }
    doc.to_string()
}

fn path_value(path: &Path) -> Item {
    value(path.to_string_lossy().into_owned())
}

fn paths_value(paths: &[PathBuf]) -> Item {
    let mut array = Array::new();
    for path in paths {
        array.push(path.to_string_lossy().into_owned());
    }
    value(array)
}

fn render_action(action: &FsAction) -> Table {
    let mut table = Table::new();
    table["kind"] = value(action.kind());

    match action {
        FsAction::MoveFile(a) => {
            table["source"] = path_value(a.source());
            table["target"] = path_value(a.target_dir());
        }
        FsAction::CopyFile(a) => {
            table["source"] = path_value(a.source());
            table["target"] = path_value(a.target_dir());
        }
        FsAction::WriteFile(a) => {
            table["path"] = path_value(a.path());
            table["content"] = value(a.content());
        }
        FsAction::CreateDirectory(a) => table["path"] = path_value(a.path()),
        FsAction::EnsureDirectory(a) => table["path"] = path_value(a.path()),
        FsAction::RemoveFile(a) => table["path"] = path_value(a.path()),
        FsAction::RemoveDirectory(a) => table["path"] = path_value(a.path()),
        FsAction::LogMessage(a) => table["message"] = value(a.message()),
        FsAction::StageAdd(a) => {
            table["root"] = path_value(a.root());
            table["paths"] = paths_value(a.paths());
            table["program"] = value(a.program());
        }
        FsAction::StageRemove(a) => {
            table["root"] = path_value(a.root());
            table["paths"] = paths_value(a.paths());
            if a.is_recursive() {
                table["recursive"] = value(true);
            }
            table["program"] = value(a.program());
        }
        FsAction::Commit(a) => {
            table["root"] = path_value(a.root());
            table["message"] = value(a.message());
            if a.is_soft() {
                table["soft"] = value(true);
            }
            table["program"] = value(a.program());
        }
    }

    table
}
