//! High-level public API for vault diagnostics.

use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::info_span;
use tracing::warn;

use crate::DiagnosticConfig;
use crate::DiagnosticResult;
use crate::Result;
use crate::extraction::ArchiveExtractor;
use crate::extraction::ScratchDir;
use crate::extraction::extractor_for;
use crate::formats::check_signature;
use crate::inspection::Inventory;
use crate::inspection::diagnose;
use crate::inspection::read_metadata;
use crate::inspection::scan_records;

/// Diagnoses a vault archive with the extractor selected by `config`.
///
/// Runs signature check, extraction into a fresh scratch directory, metadata
/// read, record scan and classification. The scratch directory is removed on
/// every exit path.
///
/// # Errors
///
/// Returns an error only when no diagnosis is possible: the file is not a
/// supported container, extraction fails or times out, or the metadata
/// document is missing or malformed. Problems with individual records are
/// reported in the result.
///
/// # Examples
///
/// ```no_run
/// use vaultprobe_core::DiagnosticConfig;
/// use vaultprobe_core::diagnose_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DiagnosticConfig::default();
/// let result = diagnose_archive("vault.7z", Some("passphrase"), &config)?;
/// println!(
///     "{}: expected {}, recovered {}",
///     result.classification, result.expected_count, result.actual_count
/// );
/// # Ok(())
/// # }
/// ```
pub fn diagnose_archive<P: AsRef<Path>>(
    archive_path: P,
    passphrase: Option<&str>,
    config: &DiagnosticConfig,
) -> Result<DiagnosticResult> {
    let archive_path = archive_path.as_ref();
    let format = check_signature(archive_path)?;
    debug!(format = format.name(), "container signature ok");
    let extractor = extractor_for(config)?;
    run_extracted(&*extractor, archive_path, passphrase, config)
}

/// Diagnoses a vault archive using the given extractor.
///
/// `config.timeout` is not applied here; configure it on the extractor.
///
/// # Errors
///
/// Same as [`diagnose_archive`].
pub fn diagnose_archive_with<E, P>(
    extractor: &E,
    archive_path: P,
    passphrase: Option<&str>,
    config: &DiagnosticConfig,
) -> Result<DiagnosticResult>
where
    E: ArchiveExtractor + ?Sized,
    P: AsRef<Path>,
{
    let archive_path = archive_path.as_ref();
    let format = check_signature(archive_path)?;
    debug!(format = format.name(), "container signature ok");
    run_extracted(extractor, archive_path, passphrase, config)
}

/// Diagnoses a vault that is already unpacked at `root`.
///
/// # Errors
///
/// Returns [`crate::DiagnosticError::MissingMetadata`] or
/// [`crate::DiagnosticError::MalformedMetadata`] if the metadata document
/// cannot be used. Record scanning never fails.
pub fn diagnose_extracted<P: AsRef<Path>>(
    root: P,
    config: &DiagnosticConfig,
) -> Result<DiagnosticResult> {
    let start = Instant::now();
    let root = root.as_ref();

    let metadata = read_metadata(&root.join(&config.metadata_file))?;
    info!(expected = metadata.credential_count, "metadata loaded");

    let outcome = scan_records(&root.join(&config.records_dir), config);
    let actual = outcome.ok_count() as u64;
    let classification = diagnose(metadata.credential_count, actual, &outcome.findings);

    if classification.is_consistent() {
        info!(count = actual, "vault is consistent");
    } else {
        warn!(
            expected = metadata.credential_count,
            actual,
            classification = %classification,
            "credential count mismatch"
        );
    }

    Ok(DiagnosticResult {
        expected_count: metadata.credential_count,
        actual_count: actual,
        classification,
        findings: outcome.findings,
        records: outcome.records,
        metadata,
        inventory: Inventory::default(),
        warnings: outcome.warnings,
        duration: start.elapsed(),
    })
}

fn run_extracted<E: ArchiveExtractor + ?Sized>(
    extractor: &E,
    archive_path: &Path,
    passphrase: Option<&str>,
    config: &DiagnosticConfig,
) -> Result<DiagnosticResult> {
    let start = Instant::now();
    let span = info_span!("diagnose", archive = %archive_path.display(), extractor = extractor.name());
    let _guard = span.enter();

    let scratch = ScratchDir::new(&config.scratch_prefix)?;
    extractor.extract(archive_path, passphrase, scratch.path())?;

    let inventory = Inventory::collect(scratch.path());
    let mut result = diagnose_extracted(scratch.path(), config)?;

    let mut warnings = inventory.warnings.clone();
    warnings.append(&mut result.warnings);
    result.warnings = warnings;
    result.inventory = inventory;
    result.duration = start.elapsed();

    scratch.close();
    Ok(result)
}
