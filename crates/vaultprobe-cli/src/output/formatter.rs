//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use vaultprobe_core::DiagnosticResult;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a completed diagnosis of `source`
    fn format_diagnostic_result(
        &self,
        operation: &str,
        source: &Path,
        result: &DiagnosticResult,
    ) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn warning(operation: impl Into<String>, message: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Warning,
            data: None,
            error: Some(message.into()),
        }
    }
}
