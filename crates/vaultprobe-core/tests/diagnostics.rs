//! End-to-end diagnostic runs over fake-extracted vaults.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::FakeExtractor;
use common::VaultLayout;
use common::signed_archive;
use tempfile::TempDir;
use vaultprobe_core::Classification;
use vaultprobe_core::DiagnosticConfig;
use vaultprobe_core::DiagnosticError;
use vaultprobe_core::diagnose_archive_with;
use vaultprobe_core::diagnose_extracted;
use vaultprobe_core::types::DirectoryFinding;
use vaultprobe_core::types::FindingKind;

fn run(layout: VaultLayout) -> vaultprobe_core::Result<vaultprobe_core::DiagnosticResult> {
    let temp = TempDir::new().unwrap();
    let archive = signed_archive(temp.path());
    diagnose_archive_with(
        &FakeExtractor::new(layout),
        &archive,
        None,
        &DiagnosticConfig::default(),
    )
}

#[test]
fn test_scenario_a_single_empty_directory() {
    let result = run(VaultLayout::new()
        .metadata("credential_count: 1\n")
        .empty_credential_dir("abc123"))
    .unwrap();

    assert_eq!(result.expected_count, 1);
    assert_eq!(result.actual_count, 0);
    assert_eq!(result.findings, vec![DirectoryFinding::missing_record("abc123")]);
    assert_eq!(result.classification, Classification::AllRecordsLost);
}

#[test]
fn test_scenario_b_two_valid_records() {
    let result = run(VaultLayout::new()
        .metadata("credential_count: 2\n")
        .record("a")
        .record("b"))
    .unwrap();

    assert_eq!(result.classification, Classification::Consistent);
    assert!(result.is_consistent());
    let ids: Vec<_> = result.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_root_missing() {
    let result = run(VaultLayout::new().count(3)).unwrap();
    assert_eq!(result.classification, Classification::RootMissing);
    assert_eq!(result.actual_count, 0);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].kind, FindingKind::RecordsRootMissing);
}

#[test]
fn test_root_present_but_empty() {
    let result = run(VaultLayout::new().count(2).records_root()).unwrap();
    assert_eq!(result.classification, Classification::AllRecordsLost);
    assert!(result.findings.is_empty());
}

#[test]
fn test_partial_loss_lists_offending_directories() {
    let result = run(VaultLayout::new()
        .count(4)
        .record("a")
        .empty_credential_dir("b")
        .record("c")
        .raw_record("d", "id: d\nname: D\n"))
    .unwrap();

    assert_eq!(result.classification, Classification::PartialLoss);
    assert_eq!(result.actual_count, 2);
    assert_eq!(result.missing_count(), 2);
    let offending: Vec<_> = result
        .offending_findings()
        .map(|f| (f.dir_name.as_str(), f.tag()))
        .collect();
    assert_eq!(offending, [("b", "missing-record"), ("d", "parse-error")]);
}

#[test]
fn test_stale_metadata_undercount() {
    let result = run(VaultLayout::new().count(1).record("a").record("b").record("c")).unwrap();
    assert_eq!(result.classification, Classification::StaleMetadataUndercount);
    assert_eq!(result.actual_count, 3);
}

#[test]
fn test_inconsistent_when_counts_agree_by_coincidence() {
    let result = run(VaultLayout::new()
        .count(2)
        .record("a")
        .record("b")
        .raw_record("c", "::: not yaml :::\n  - ["))
    .unwrap();
    assert_eq!(result.classification, Classification::Inconsistent);
    assert_eq!(result.offending_findings().count(), 1);
}

#[test]
fn test_bad_directory_does_not_stop_scan() {
    let result = run(VaultLayout::new()
        .count(3)
        .empty_credential_dir("0-first")
        .record("m")
        .record("z"))
    .unwrap();

    let tags: Vec<_> = result.findings.iter().map(DirectoryFinding::tag).collect();
    assert_eq!(tags, ["missing-record", "ok", "ok"]);
    assert_eq!(result.actual_count, 2);
}

#[test]
fn test_actual_count_matches_ok_findings() {
    let result = run(VaultLayout::new()
        .count(5)
        .record("a")
        .empty_credential_dir("b")
        .raw_record("c", "")
        .record("d"))
    .unwrap();

    let ok = result.findings.iter().filter(|f| f.is_ok()).count() as u64;
    assert_eq!(result.actual_count, ok);
    assert_eq!(result.records.len() as u64, ok);
}

#[test]
fn test_malformed_metadata_aborts_before_scanning() {
    let err = run(VaultLayout::new()
        .metadata("credential_count: lots\n")
        .record("a"))
    .unwrap_err();
    assert!(matches!(err, DiagnosticError::MalformedMetadata { .. }));
}

#[test]
fn test_missing_metadata_is_fatal() {
    let err = run(VaultLayout::new().record("a")).unwrap_err();
    assert!(matches!(err, DiagnosticError::MissingMetadata { .. }));
}

#[test]
fn test_wrong_passphrase_is_fatal() {
    let temp = TempDir::new().unwrap();
    let archive = signed_archive(temp.path());
    let extractor = FakeExtractor::new(VaultLayout::new().count(1).record("a")).with_passphrase("right");

    let err = diagnose_archive_with(&extractor, &archive, Some("wrong"), &DiagnosticConfig::default())
        .unwrap_err();
    match err {
        DiagnosticError::ExtractionFailed { exit_code, output } => {
            assert_eq!(exit_code, Some(2));
            assert!(output.contains("Wrong password"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let result =
        diagnose_archive_with(&extractor, &archive, Some("right"), &DiagnosticConfig::default())
            .unwrap();
    assert!(result.is_consistent());
}

#[test]
fn test_not_an_archive() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vault.7z");
    std::fs::write(&path, "metadata.yml\n").unwrap();

    let err = diagnose_archive_with(
        &FakeExtractor::new(VaultLayout::new().count(0)),
        &path,
        None,
        &DiagnosticConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DiagnosticError::NotAnArchive { .. }));
}

#[test]
fn test_windows_separators_reported() {
    let result = run(VaultLayout::new()
        .count(1)
        .file(r"credentials\abc\record.yml", common::record_yaml("abc")))
    .unwrap();

    if cfg!(windows) {
        assert_eq!(result.classification, Classification::Consistent);
    } else {
        assert_eq!(result.classification, Classification::RootMissing);
        assert!(result.warnings.iter().any(|w| w.contains("backslash")));
    }
}

#[test]
fn test_metadata_extra_keys_preserved() {
    let result = run(VaultLayout::new().count(0).records_root()).unwrap();
    assert_eq!(result.classification, Classification::Consistent);
    assert_eq!(result.metadata.extra_str("format"), Some("memory-v1"));
    assert_eq!(result.metadata.extra_str("version"), Some("1.0"));
}

#[test]
fn test_custom_layout_names() {
    let layout = VaultLayout::new()
        .file("vault.yml", "credential_count: 1\n")
        .file("items/a/entry.yml", common::record_yaml("a"));
    let temp = layout.materialize();

    let config = DiagnosticConfig::default()
        .with_metadata_file("vault.yml")
        .with_records_dir("items")
        .with_record_file("entry.yml");
    let result = diagnose_extracted(temp.path(), &config).unwrap();
    assert!(result.is_consistent());
}

#[test]
fn test_inventory_lists_extracted_files() {
    let result = run(VaultLayout::new().count(1).record("a")).unwrap();
    assert_eq!(result.inventory.file_count(), 2);
    assert!(
        result
            .inventory
            .entries
            .iter()
            .any(|e| e.path.ends_with("record.yml"))
    );
}
