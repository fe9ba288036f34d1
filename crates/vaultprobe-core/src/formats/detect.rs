//! Container signature detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::DiagnosticError;
use crate::Result;

/// 7z format magic bytes (signature).
///
/// 7z archives start with the signature: `37 7A BC AF 27 1C`
/// This is the string "7z" followed by format version bytes.
pub const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// 7z archive, optionally AES-encrypted.
    SevenZ,
}

impl ContainerFormat {
    /// Short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SevenZ => "7z",
        }
    }
}

/// Reads the start of `path` and confirms it is a supported container.
///
/// # Errors
///
/// Returns [`DiagnosticError::Io`] if the file cannot be opened and
/// [`DiagnosticError::NotAnArchive`] if the signature does not match,
/// including files shorter than the signature.
pub fn check_signature(path: &Path) -> Result<ContainerFormat> {
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(SEVENZ_MAGIC.len());
    file.by_ref()
        .take(SEVENZ_MAGIC.len() as u64)
        .read_to_end(&mut header)?;

    if header == SEVENZ_MAGIC {
        Ok(ContainerFormat::SevenZ)
    } else {
        Err(DiagnosticError::NotAnArchive { header })
    }
}
