//! Diagnostic run reporting.

use std::time::Duration;

use crate::inspection::Classification;
use crate::inspection::Inventory;
use crate::types::CredentialRecord;
use crate::types::DirectoryFinding;
use crate::types::VaultMetadata;

/// Outcome of a completed diagnostic run.
///
/// A run that reaches this point always carries a classification;
/// [`Classification::Consistent`] is reported explicitly rather than implied
/// by the absence of problems.
#[derive(Debug, Clone)]
pub struct DiagnosticResult {
    /// `credential_count` declared by the metadata document.
    pub expected_count: u64,

    /// Number of findings tagged ok.
    pub actual_count: u64,

    /// Overall diagnosis.
    pub classification: Classification,

    /// One finding per credential directory, in scan order.
    pub findings: Vec<DirectoryFinding>,

    /// Records that parsed, in discovery order.
    pub records: Vec<CredentialRecord>,

    /// The parsed metadata document.
    pub metadata: VaultMetadata,

    /// Files and directories found after extraction. Empty when diagnosing a
    /// tree that was not extracted by this run.
    pub inventory: Inventory,

    /// Advisories that did not affect classification.
    pub warnings: Vec<String>,

    /// Wall time of the run.
    pub duration: Duration,
}

impl DiagnosticResult {
    /// Findings that are not ok, in scan order.
    pub fn offending_findings(&self) -> impl Iterator<Item = &DirectoryFinding> {
        self.findings.iter().filter(|f| !f.is_ok())
    }

    /// Declared credentials that were not recovered.
    #[must_use]
    pub const fn missing_count(&self) -> u64 {
        self.expected_count.saturating_sub(self.actual_count)
    }

    /// Returns whether the run found nothing wrong.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.classification.is_consistent()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
