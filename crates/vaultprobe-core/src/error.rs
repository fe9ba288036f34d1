//! Error types for vault diagnostic runs.
//!
//! Only conditions that make a diagnosis impossible are errors. Problems with
//! individual credential records are reported as findings instead (see
//! [`crate::types::DirectoryFinding`]).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `DiagnosticError`.
pub type Result<T> = std::result::Result<T, DiagnosticError>;

/// Errors that abort a diagnostic run.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File header does not carry the expected container signature.
    #[error("not a 7z archive (header bytes: {})", hex(.header))]
    NotAnArchive {
        /// Leading bytes read from the file.
        header: Vec<u8>,
    },

    /// The unpacking step reported failure.
    #[error("extraction failed{}: {output}", exit_suffix(.exit_code))]
    ExtractionFailed {
        /// Exit code of the external tool, `None` when no process completed.
        exit_code: Option<i32>,
        /// Captured tool output or library error message.
        output: String,
    },

    /// Extraction did not finish within the configured timeout.
    #[error("extraction timed out after {:.1}s", .timeout.as_secs_f64())]
    ExtractionTimeout {
        /// Configured timeout.
        timeout: Duration,
    },

    /// The metadata document is absent from the extracted vault.
    #[error("metadata document not found: {path}")]
    MissingMetadata {
        /// Expected location of the metadata document.
        path: PathBuf,
    },

    /// The metadata document could not be parsed or lacks `credential_count`.
    #[error("malformed metadata: {detail}")]
    MalformedMetadata {
        /// Parser or validation message.
        detail: String,
    },
}

impl DiagnosticError {
    /// Returns `true` if the error happened while unpacking the container.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultprobe_core::DiagnosticError;
    ///
    /// use std::time::Duration;
    ///
    /// let err = DiagnosticError::ExtractionTimeout {
    ///     timeout: Duration::from_secs(5),
    /// };
    /// assert!(err.is_extraction_failure());
    ///
    /// let err = DiagnosticError::MalformedMetadata {
    ///     detail: "bad yaml".into(),
    /// };
    /// assert!(!err.is_extraction_failure());
    /// ```
    #[must_use]
    pub const fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAnArchive { .. } | Self::ExtractionFailed { .. } | Self::ExtractionTimeout { .. }
        )
    }

    /// Returns `true` if the error concerns the metadata document.
    #[must_use]
    pub const fn is_metadata_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingMetadata { .. } | Self::MalformedMetadata { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultprobe_core::DiagnosticError;
    ///
    /// let err = DiagnosticError::MalformedMetadata {
    ///     detail: "credential_count missing".into(),
    /// };
    /// assert_eq!(err.context(), Some("credential_count missing"));
    ///
    /// let err = DiagnosticError::ExtractionTimeout {
    ///     timeout: std::time::Duration::from_secs(1),
    /// };
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ExtractionFailed { output, .. } if !output.is_empty() => Some(output),
            Self::MalformedMetadata { detail } => Some(detail),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn exit_suffix(code: &Option<i32>) -> String {
    code.map_or_else(String::new, |c| format!(" (exit code {c})"))
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
