//! Configuration for vault diagnostic runs.

use std::time::Duration;

/// Which extraction backend a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    /// Use an external `7z` binary when one is installed, otherwise the
    /// in-process decoder.
    #[default]
    Auto,
    /// Always use the in-process decoder.
    Native,
    /// Always use an external `7z`-family binary.
    Command,
}

/// Settings for a diagnostic run.
///
/// Mirrors the on-disk vault layout: a metadata document at the root and one
/// subdirectory per credential, each holding a record document.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vaultprobe_core::DiagnosticConfig;
///
/// let config = DiagnosticConfig::default().with_timeout(Some(Duration::from_secs(30)));
/// assert_eq!(config.metadata_file, "metadata.yml");
/// assert_eq!(config.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// File name of the metadata document at the vault root.
    pub metadata_file: String,

    /// Directory holding one subdirectory per credential.
    pub records_dir: String,

    /// File name of the record document inside each credential directory.
    pub record_file: String,

    /// Upper bound on the extraction step. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Extraction backend.
    pub extractor: ExtractorKind,

    /// Name prefix for the scratch directory created for each run.
    pub scratch_prefix: String,
}

impl Default for DiagnosticConfig {
    /// Default values:
    /// - `metadata_file`: `metadata.yml`
    /// - `records_dir`: `credentials`
    /// - `record_file`: `record.yml`
    /// - `timeout`: none
    /// - `extractor`: [`ExtractorKind::Auto`]
    /// - `scratch_prefix`: `vaultprobe-`
    fn default() -> Self {
        Self {
            metadata_file: "metadata.yml".to_string(),
            records_dir: "credentials".to_string(),
            record_file: "record.yml".to_string(),
            timeout: None,
            extractor: ExtractorKind::Auto,
            scratch_prefix: "vaultprobe-".to_string(),
        }
    }
}

impl DiagnosticConfig {
    /// Sets the extraction timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the extraction backend.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ExtractorKind) -> Self {
        self.extractor = extractor;
        self
    }

    /// Sets the records directory name.
    #[must_use]
    pub fn with_records_dir(mut self, records_dir: impl Into<String>) -> Self {
        self.records_dir = records_dir.into();
        self
    }

    /// Sets the metadata document file name.
    #[must_use]
    pub fn with_metadata_file(mut self, metadata_file: impl Into<String>) -> Self {
        self.metadata_file = metadata_file.into();
        self
    }

    /// Sets the per-credential record document file name.
    #[must_use]
    pub fn with_record_file(mut self, record_file: impl Into<String>) -> Self {
        self.record_file = record_file.into();
        self
    }
}
