//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use vaultprobe_core::DiagnosticConfig;
use vaultprobe_core::diagnose_extracted;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("'{}' is not a directory", args.dir.display());
    }

    let config = DiagnosticConfig::default().with_records_dir(args.records_dir.clone());

    let result = add_archive_context(diagnose_extracted(&args.dir, &config), &args.dir)?;

    formatter.format_diagnostic_result("inspect", &args.dir, &result)
}
