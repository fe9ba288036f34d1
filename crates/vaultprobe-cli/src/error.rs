//! Error conversion utilities for CLI.
//!
//! Converts vaultprobe-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use vaultprobe_core::DiagnosticError;

/// Converts `DiagnosticError` to user-friendly anyhow error with context
pub fn convert_diagnostic_error(err: DiagnosticError, source: &Path) -> anyhow::Error {
    match &err {
        DiagnosticError::NotAnArchive { .. } => {
            anyhow!(
                "Cannot diagnose '{}': {err}\n\
                 HINT: Vault exports are 7z containers. Check that the right file was selected.",
                source.display()
            )
        }
        DiagnosticError::ExtractionFailed { output, .. } if is_password_error(output) => {
            anyhow!(
                "Failed to open '{}': {err}\n\
                 HINT: The passphrase is wrong or missing. Pass it as the second argument or set VAULTPROBE_PASSPHRASE.",
                source.display()
            )
        }
        DiagnosticError::ExtractionFailed {
            exit_code: None,
            output,
        } if is_missing_tool(output) => {
            anyhow!(
                "Failed to extract '{}': {err}\n\
                 HINT: Install 7-Zip or retry with --extractor native.",
                source.display()
            )
        }
        DiagnosticError::ExtractionFailed { .. } => {
            anyhow!(
                "Failed to extract '{}': {err}\n\
                 HINT: The archive may be truncated or corrupted.",
                source.display()
            )
        }
        DiagnosticError::ExtractionTimeout { .. } => {
            anyhow!(
                "Extraction of '{}' aborted: {err}\n\
                 HINT: Use --timeout to allow more time for large vaults.",
                source.display()
            )
        }
        DiagnosticError::MissingMetadata { path } => {
            anyhow!(
                "Vault metadata not found in '{}': expected {}\n\
                 HINT: The archive does not look like a vault export.",
                source.display(),
                path.display()
            )
        }
        DiagnosticError::MalformedMetadata { detail } => {
            anyhow!(
                "Vault metadata in '{}' is malformed: {detail}\n\
                 HINT: metadata.yml must be a YAML mapping with an integer credential_count.",
                source.display()
            )
        }
        DiagnosticError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                source.display(),
                io_err
            )
        }
    }
}

/// Adds context to a diagnostic result error
pub fn add_archive_context<T>(
    result: Result<T, DiagnosticError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_diagnostic_error(e, source))
}

fn is_password_error(output: &str) -> bool {
    let lower = output.to_ascii_lowercase();
    lower.contains("wrong password")
        || lower.contains("password is incorrect")
        || lower.contains("password required")
}

fn is_missing_tool(output: &str) -> bool {
    output.starts_with("no 7z executable found") || output.starts_with("failed to run")
}
