use anyhow::Result;

use super::super::args::CreateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::helper::{Workspace, ensure_setters, write_file};
use super::{CreateSummary, FileChange};
use crate::core::CreateSetters;

/// Annotate every resource file of the package.
///
/// Nothing is written unless `--apply` is given, and nothing is written at
/// all when the walk of any file fails.
pub fn create(cmd: CreateCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let workspace = Workspace::load(&args.common)?;
    let registry = workspace.load_registry()?;
    ensure_setters(&registry)?;

    let mut loaded = workspace.load_files();
    let mut creator = CreateSetters::new(&registry);
    for file in &mut loaded.files {
        creator.filter(file.documents_mut())?;
    }

    let changes: Vec<FileChange> = loaded
        .files
        .iter()
        .filter_map(|file| {
            let edits = file.edits();
            (!edits.is_empty()).then(|| FileChange {
                path: file.path().to_string(),
                edits,
            })
        })
        .collect();

    let mut unwritable_count = 0;
    for file in &loaded.files {
        let count = file.unwritable_count();
        if count > 0 {
            tracing::warn!(file = file.path(), count, "annotations cannot be written");
            unwritable_count += count;
        }
    }

    if args.apply {
        for file in loaded.files.iter().filter(|file| file.is_modified()) {
            write_file(&workspace.root, file.path(), &file.render())?;
            tracing::info!(file = file.path(), "wrote annotations");
        }
    }

    let summary = CreateSummary {
        files_checked: loaded.files.len(),
        changes,
        results: creator.into_results(),
        unwritable_count,
        is_apply: args.apply,
    };
    report::print_create(&summary, args.common.verbose);
    report::print_failures(&loaded.failures, loaded.skipped_count);

    Ok(if loaded.has_errors() {
        ExitStatus::Error
    } else if !summary.is_apply && !summary.changes.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}
