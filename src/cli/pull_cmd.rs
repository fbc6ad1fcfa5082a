//! Pull command

use anyhow::{Context, Result};

use super::app::RunOptions;
use super::output::Output;
use crate::backend::PreferenceBackend;
use crate::sync;

pub fn run(options: &RunOptions, output: &Output, backend: &dyn PreferenceBackend) -> Result<()> {
    let file = options.entry_file();
    file.ensure_exists()
        .context("Failed to create entry file")?;

    let entries = file.read_all().context("Failed to read entry file")?;
    output.entries("Current configuration", &entries);

    let report = sync::pull(&entries, backend);
    output.entries("System configuration", &report.entries);

    if let Some(err) = report.aggregate_error() {
        output.warning(&format!(
            "{}; unreadable entries are kept without a value",
            err
        ));
    }

    if !options.assume_yes {
        let warning = format!(
            "mdefaults will overwrite {}. Proceed with caution.",
            file.path().display()
        );
        if !output.confirm(&warning, "Do you want to continue?")? {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "written": false,
                    "entries": report.entries,
                    "failures": report.failures,
                }));
            } else {
                output.success("Operation cancelled.");
            }
            return Ok(());
        }
    }

    file.write_all(&report.entries)
        .context("Failed to write entry file")?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "written": true,
            "file": file.path().display().to_string(),
            "entries": report.entries,
            "failures": report.failures,
        }));
    } else {
        output.success(&format!(
            "Pulled {} of {} entries into {}",
            report.pulled(),
            report.entries.len(),
            file.path().display()
        ));
    }

    Ok(())
}
