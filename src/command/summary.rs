//! Categorized summary printed after a plan runs (or would run).

use crate::action::FsAction;
use crate::plan::Plan;

use colored::Colorize;
use std::path::Path;

const GROUP_LIMIT: usize = 8;

/// Path relative to the current directory with forward slashes, or the
/// path as given when no relative form exists.
fn display_path(path: &Path, base: &Path) -> String {
    let relative = if path.is_absolute() {
        pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let shown = relative.to_string_lossy().replace('\\', "/");
    if shown.is_empty() { ".".to_string() } else { shown }
}

/// Short label for one action, e.g. `write out/a.txt`.
fn label(action: &FsAction, base: &Path) -> String {
    let path = |p: &Path| display_path(p, base);
    match action {
        FsAction::MoveFile(a) => format!("move {} → {}", path(a.source()), path(a.target_dir())),
        FsAction::CopyFile(a) => format!("copy {} → {}", path(a.source()), path(a.target_dir())),
        FsAction::WriteFile(a) => format!("write {}", path(a.path())),
        FsAction::RemoveFile(a) => format!("remove {}", path(a.path())),
        FsAction::CreateDirectory(a) => format!("create {}", path(a.path())),
        FsAction::EnsureDirectory(a) => format!("ensure {}", path(a.path())),
        FsAction::RemoveDirectory(a) => format!("remove {}", path(a.path())),
        FsAction::LogMessage(a) => a.message().to_string(),
        FsAction::StageAdd(a) => format!("{} add in {}", a.program(), path(a.root())),
        FsAction::StageRemove(a) => format!("{} rm in {}", a.program(), path(a.root())),
        FsAction::Commit(a) => format!(
            "{} commit \"{}\" in {}{}",
            a.program(),
            a.message(),
            path(a.root()),
            if a.is_soft() { " (soft)" } else { "" }
        ),
    }
}

fn print_group(title: &str, icon: &str, labels: &[String], dry_run: bool) {
    if labels.is_empty() {
        return;
    }

    println!(
        "\n{} {} ({} action{})",
        icon.bold(),
        title,
        labels.len(),
        if labels.len() == 1 { "" } else { "s" }
    );

    for label in labels.iter().take(GROUP_LIMIT) {
        if dry_run {
            println!("   • {}", label.dimmed());
        } else {
            println!("   {} {}", "✓".green(), label.dimmed());
        }
    }

    if labels.len() > GROUP_LIMIT {
        println!(
            "   {} {} more...",
            if dry_run {
                "•".to_string()
            } else {
                "✓".green().to_string()
            },
            labels.len() - GROUP_LIMIT
        );
    }
}

/// Prints the plan grouped into files, directories, version control and
/// messages.
pub(crate) fn print_summary(plan: &Plan, dry_run: bool) {
    if plan.is_empty() {
        println!("\n{}", "No changes needed".yellow());
        return;
    }

    let base = std::env::current_dir().unwrap_or_default();

    let mut files = Vec::new();
    let mut directories = Vec::new();
    let mut vcs = Vec::new();
    let mut messages = Vec::new();

    for action in plan.actions() {
        let label = label(action, &base);
        match action {
            FsAction::MoveFile(_)
            | FsAction::CopyFile(_)
            | FsAction::WriteFile(_)
            | FsAction::RemoveFile(_) => files.push(label),
            FsAction::CreateDirectory(_)
            | FsAction::EnsureDirectory(_)
            | FsAction::RemoveDirectory(_) => directories.push(label),
            FsAction::StageAdd(_) | FsAction::StageRemove(_) | FsAction::Commit(_) => {
                vcs.push(label)
            }
            FsAction::LogMessage(_) => messages.push(label),
        }
    }

    if dry_run {
        println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
    } else {
        println!("\n{}", "Changes applied:".green().bold());
    }

    print_group("Files", "📝", &files, dry_run);
    print_group("Directories", "📁", &directories, dry_run);
    print_group("Version control", "🔗", &vcs, dry_run);
    print_group("Messages", "💬", &messages, dry_run);

    println!();
    let count = plan.len();
    if dry_run {
        println!(
            "{} {} validated. Run without {} to apply.",
            count.to_string().cyan().bold(),
            if count == 1 { "action" } else { "actions" },
            "--dry-run".cyan()
        );
    } else {
        println!(
            "{} Successfully completed {} {}",
            "✓".green().bold(),
            count,
            if count == 1 { "action" } else { "actions" }
        );
    }
}
