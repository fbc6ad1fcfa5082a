//! Push command

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
    output.entries("Configuration to push", &entries);

    let report = sync::push(&entries, backend);

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    if report.is_success() {
        output.success(&format!(
            "Pushed {} entries ({} without a value skipped)",
            report.written, report.skipped
        ));
    } else {
        output.warning(&format!(
            "Failed to write {} of {} entries (run with --verbose for details)",
            report.failures.len(),
            report.written + report.failures.len()
        ));
        output.success(&format!("Pushed {} entries", report.written));
    }

    Ok(())
}
