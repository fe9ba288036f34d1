//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use vaultprobe_core::DiagnosticResult;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct FindingOutput {
    directory: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecordOutput {
    id: String,
    name: String,
    credential_type: String,
    field_count: usize,
}

#[derive(Debug, Serialize)]
struct DiagnosticOutput {
    source: String,
    classification: &'static str,
    consistent: bool,
    description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    likely_causes: Vec<&'static str>,
    expected_count: u64,
    actual_count: u64,
    missing_count: u64,
    findings: Vec<FindingOutput>,
    records: Vec<RecordOutput>,
    extracted_files: usize,
    extracted_bytes: u64,
    warnings: Vec<String>,
    duration_ms: u128,
}

impl DiagnosticOutput {
    fn new(source: &Path, result: &DiagnosticResult) -> Self {
        Self {
            source: source.display().to_string(),
            classification: result.classification.as_str(),
            consistent: result.is_consistent(),
            description: result.classification.description(),
            likely_causes: result.classification.likely_causes().to_vec(),
            expected_count: result.expected_count,
            actual_count: result.actual_count,
            missing_count: result.missing_count(),
            findings: result
                .findings
                .iter()
                .map(|f| FindingOutput {
                    directory: f.dir_name.clone(),
                    kind: f.tag(),
                    detail: f.detail().map(str::to_string),
                })
                .collect(),
            records: result
                .records
                .iter()
                .map(|r| RecordOutput {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    credential_type: r.credential_type.clone(),
                    field_count: r.field_count(),
                })
                .collect(),
            extracted_files: result.inventory.file_count(),
            extracted_bytes: result.inventory.total_size(),
            warnings: result.warnings.clone(),
            duration_ms: result.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T, mut writer: impl Write) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_diagnostic_result(
        &self,
        operation: &str,
        source: &Path,
        result: &DiagnosticResult,
    ) -> Result<()> {
        let output = JsonOutput::success(operation, DiagnosticOutput::new(source, result));
        Self::output(&output, io::stdout())
    }

    // Warnings go to stderr so stdout stays a single JSON document.
    fn format_warning(&self, message: &str) {
        let output = JsonOutput::<()>::warning("warning", message);
        let _ = Self::output(&output, io::stderr());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vaultprobe_core::diagnose;
    use vaultprobe_core::inspection::Inventory;
    use vaultprobe_core::types::DirectoryFinding;
    use vaultprobe_core::types::VaultMetadata;

    fn partial_loss() -> DiagnosticResult {
        let findings = vec![
            DirectoryFinding::ok("a"),
            DirectoryFinding::missing_record("b"),
            DirectoryFinding::parse_error("c", "invalid type"),
        ];
        DiagnosticResult {
            expected_count: 3,
            actual_count: 1,
            classification: diagnose(3, 1, &findings),
            findings,
            records: Vec::new(),
            metadata: VaultMetadata::from_yaml("credential_count: 3\n").unwrap(),
            inventory: Inventory::default(),
            warnings: vec!["unexpected file: notes.txt".into()],
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_diagnostic_output_structure() {
        let result = partial_loss();
        let output = JsonOutput::success(
            "inspect",
            DiagnosticOutput::new(Path::new("/vault"), &result),
        );
        let json: serde_json::Value = serde_json::to_value(&output).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["operation"], "inspect");
        assert_eq!(json["data"]["classification"], "partial-loss");
        assert_eq!(json["data"]["missing_count"], 2);
        assert_eq!(json["data"]["findings"][1]["kind"], "missing-record");
        assert!(json["data"]["findings"][1].get("detail").is_none());
        assert_eq!(json["data"]["findings"][2]["detail"], "invalid type");
        assert!(json.get("error").is_none());
        assert_eq!(json["data"]["likely_causes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_warning_output_structure() {
        let output = JsonOutput::<()>::warning("warning", "careful");
        let mut buf = Vec::new();
        JsonFormatter::output(&output, &mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["error"], "careful");
        assert!(json.get("data").is_none());
    }
}
