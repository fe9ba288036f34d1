//! Credential record scanner.
//!
//! Every immediate subdirectory of the records root yields exactly one
//! [`DirectoryFinding`]. A bad directory is recorded and skipped; it never
//! stops the scan.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::DiagnosticConfig;
use crate::types::CredentialRecord;
use crate::types::DirectoryFinding;

/// Placeholder files some vault writers leave in empty directories.
const PLACEHOLDER_FILES: &[&str] = &[".gitkeep", ".keep"];

/// Result of scanning the records root.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Records that parsed, in discovery order.
    pub records: Vec<CredentialRecord>,

    /// One finding per subdirectory in lexicographic order, or a single
    /// root-missing finding.
    pub findings: Vec<DirectoryFinding>,

    /// Advisories that do not affect classification.
    pub warnings: Vec<String>,
}

impl ScanOutcome {
    /// Number of findings tagged ok.
    #[must_use]
    pub fn ok_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_ok()).count()
    }

    fn root_missing(root: &Path, warning: Option<String>) -> Self {
        let root_name = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            records: Vec::new(),
            findings: vec![DirectoryFinding::records_root_missing(root_name)],
            warnings: warning.into_iter().collect(),
        }
    }
}

/// Scans `root` for credential directories.
///
/// A missing root, or a path that is not a directory, is reported as a
/// [`DirectoryFinding`] rather than an error. A root directory that exists
/// but cannot be listed yields no findings and a warning.
/// Within each subdirectory the record document named by
/// `config.record_file` is read:
///
/// - absent: `missing-record`
/// - unreadable or unparsable: `parse-error`
/// - parsed: `ok`, and the record is kept
///
/// Files directly under the root produce warnings only.
pub fn scan_records(root: &Path, config: &DiagnosticConfig) -> ScanOutcome {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(root = %root.display(), "records root missing");
            return ScanOutcome::root_missing(root, None);
        }
        Err(e) if root.is_dir() => {
            // Present but unreadable: no findings, so the root still counts
            // as present when classifying.
            warn!(root = %root.display(), error = %e, "records root unreadable");
            return ScanOutcome {
                warnings: vec![format!(
                    "records root {} could not be read: {e}",
                    root.display()
                )],
                ..ScanOutcome::default()
            };
        }
        Err(e) => {
            warn!(root = %root.display(), error = %e, "records root is not a directory");
            let warning = format!("records root {} is not a directory", root.display());
            return ScanOutcome::root_missing(root, Some(warning));
        }
    };

    let mut outcome = ScanOutcome::default();
    let mut dirs = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                outcome
                    .warnings
                    .push(format!("failed to read an entry of {}: {e}", root.display()));
                continue;
            }
        };
        let name = entry.file_name();
        let path = entry.path();

        if path.is_dir() {
            dirs.push(name);
            continue;
        }

        let display = name.to_string_lossy();
        if PLACEHOLDER_FILES.iter().any(|p| *p == display) {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == "yml" || ext == "yaml") {
            outcome.warnings.push(format!(
                "legacy flat record file {display} is not counted; records live in <id>/{}",
                config.record_file
            ));
        } else {
            outcome
                .warnings
                .push(format!("unexpected file in records root: {display}"));
        }
    }

    dirs.sort();
    info!(root = %root.display(), directories = dirs.len(), "scanning credential directories");

    for name in dirs {
        let dir_name = name.to_string_lossy().into_owned();
        let record_path = root.join(&name).join(&config.record_file);
        let finding = match fs::read_to_string(&record_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                DirectoryFinding::missing_record(&dir_name)
            }
            Err(e) => DirectoryFinding::parse_error(&dir_name, format!("cannot read record: {e}")),
            Ok(text) => match CredentialRecord::from_yaml(&text) {
                Ok(record) => {
                    if record.id != dir_name {
                        outcome.warnings.push(format!(
                            "record id '{}' does not match its directory '{dir_name}'",
                            record.id
                        ));
                    }
                    outcome.records.push(record);
                    DirectoryFinding::ok(&dir_name)
                }
                Err(detail) => DirectoryFinding::parse_error(&dir_name, detail),
            },
        };

        if finding.is_ok() {
            debug!(dir = %dir_name, "record ok");
        } else {
            warn!(finding = %finding, "credential directory not recoverable");
        }
        outcome.findings.push(finding);
    }

    outcome.warnings.extend(duplicate_id_warnings(&outcome.records));
    outcome
}

fn duplicate_id_warnings(records: &[CredentialRecord]) -> Vec<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *seen.entry(record.id.as_str()).or_default() += 1;
    }
    seen.into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, count)| format!("record id '{id}' appears in {count} directories"))
        .collect()
}
