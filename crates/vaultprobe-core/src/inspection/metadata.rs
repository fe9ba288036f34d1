//! Metadata document reader.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::DiagnosticError;
use crate::Result;
use crate::types::VaultMetadata;

/// Reads and validates the metadata document at `path`.
///
/// # Errors
///
/// - [`DiagnosticError::MissingMetadata`] if the file does not exist.
/// - [`DiagnosticError::MalformedMetadata`] if it is not valid UTF-8 YAML or
///   `credential_count` is absent or not a non-negative integer.
/// - [`DiagnosticError::Io`] for other read failures.
pub fn read_metadata(path: &Path) -> Result<VaultMetadata> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DiagnosticError::MissingMetadata {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(DiagnosticError::MalformedMetadata {
                detail: format!("not valid UTF-8: {e}"),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let metadata = VaultMetadata::from_yaml(&text)?;
    debug!(
        credential_count = metadata.credential_count,
        extra_keys = metadata.extra.len(),
        "parsed metadata"
    );
    Ok(metadata)
}
