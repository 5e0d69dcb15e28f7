use anyhow::{Context, Result};

use super::super::args::ListCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::helper::{Workspace, ensure_setters};
use crate::core::{ListSetters, TallyRecord};

/// Report every configured setter with the number of fields using its value.
pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let workspace = Workspace::load(&args.common)?;
    let registry = workspace.load_registry()?;
    ensure_setters(&registry)?;

    let loaded = workspace.load_files();
    let mut lister = ListSetters::new(&registry);
    for file in &loaded.files {
        lister.filter(file.documents())?;
    }

    let records: Vec<TallyRecord> = lister.into_results().into_values().collect();
    if args.json {
        let json = serde_json::to_string_pretty(&records).context("Failed to serialize setters")?;
        println!("{}", json);
    } else {
        report::print_tally(&records);
    }
    report::print_failures(&loaded.failures, loaded.skipped_count);

    Ok(if loaded.has_errors() {
        ExitStatus::Error
    } else {
        ExitStatus::Success
    })
}
