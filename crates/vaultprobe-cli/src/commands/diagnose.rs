//! Diagnose command implementation.

use crate::cli::DiagnoseArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use tracing::debug;
use vaultprobe_core::DiagnosticConfig;
use vaultprobe_core::diagnose_archive;

pub fn execute(args: &DiagnoseArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = DiagnosticConfig::default()
        .with_timeout(args.timeout)
        .with_extractor(args.extractor.into());
    debug!(extractor = ?config.extractor, timeout = ?config.timeout, "starting diagnosis");

    let passphrase = match args.passphrase.as_deref() {
        Some("") => {
            formatter.format_warning("empty passphrase ignored; opening archive without one");
            None
        }
        other => other,
    };

    let result = add_archive_context(
        diagnose_archive(&args.archive, passphrase, &config),
        &args.archive,
    )?;

    formatter.format_diagnostic_result("diagnose", &args.archive, &result)
}
